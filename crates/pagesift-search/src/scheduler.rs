//! Restartable delayed tasks.
//!
//! The widget owns two timers, one per [`TimerKind`]. Scheduling a kind
//! replaces whatever was pending for it, so at most one task of each kind is
//! ever outstanding. When a task comes due the host calls
//! [`crate::SearchWidget::on_timer`] with its kind.

use std::time::Duration;

/// The kinds of delayed work the widget schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Trailing-edge search after input settles.
    Search,
    /// Removal of the highlight from a jumped-to element.
    Unhighlight,
}

/// Something that can run a [`TimerKind`] after a delay.
pub trait Scheduler {
    /// Schedule `kind` to fire after `delay`, replacing any pending task of that kind.
    fn schedule(&mut self, kind: TimerKind, delay: Duration);

    /// Drop the pending task of `kind`, if any.
    fn cancel(&mut self, kind: TimerKind);
}

/// Virtual-clock scheduler for headless hosts.
///
/// Time only moves through [`ManualScheduler::advance`], which hands back the
/// kinds that came due.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    now: Duration,
    pending: Vec<(TimerKind, Duration)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Whether a task of `kind` is waiting.
    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending.iter().any(|(k, _)| *k == kind)
    }

    /// Number of waiting tasks.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Move the clock forward and return the kinds that came due, earliest first.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerKind> {
        self.now += by;

        let now = self.now;
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|(_, at)| *at <= now);
        self.pending = waiting;

        due.sort_by_key(|(_, at)| *at);
        due.into_iter().map(|(kind, _)| kind).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, kind: TimerKind, delay: Duration) {
        self.cancel(kind);
        self.pending.push((kind, self.now + delay));
    }

    fn cancel(&mut self, kind: TimerKind) {
        self.pending.retain(|(k, _)| *k != kind);
    }
}
