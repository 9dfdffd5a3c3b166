//! Keyboard selection over the rendered result list.

/// Direction of a selection step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Up,
}

/// Selection state: nothing selected, or one index below `count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultNavigator {
    count: usize,
    selected: Option<usize>,
}

impl ResultNavigator {
    /// Navigator over `count` results with nothing selected.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            selected: None,
        }
    }

    /// Start over with a new result count.
    pub fn reset(&mut self, count: usize) {
        *self = Self::new(count);
    }

    /// Drop all results.
    pub fn clear(&mut self) {
        self.reset(0);
    }

    /// Number of results being navigated.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Currently selected index.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Move the selection one step with wraparound and return it.
    ///
    /// From no selection, `Down` lands on the first result and `Up` on the
    /// last. With no results nothing changes.
    pub fn step(&mut self, direction: Direction) -> Option<usize> {
        if self.count == 0 {
            return None;
        }

        let next = match (direction, self.selected) {
            (Direction::Down, None) => 0,
            (Direction::Down, Some(i)) => (i + 1) % self.count,
            (Direction::Up, None) => self.count - 1,
            (Direction::Up, Some(i)) => (i + self.count - 1) % self.count,
        };

        self.selected = Some(next);
        self.selected
    }

    /// Result that Enter activates: the selection, else the first result.
    pub fn activation_target(&self) -> Option<usize> {
        if self.count == 0 {
            None
        } else {
            Some(self.selected.unwrap_or(0))
        }
    }
}
