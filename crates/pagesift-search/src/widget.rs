//! The in-page search widget.
//!
//! [`SearchWidget`] holds everything one search box needs: the text index,
//! the last result set, the keyboard selection, the pending debounced query
//! and the currently highlighted element. It reacts to input, key, click and
//! timer events; all rendering goes through a [`WidgetHost`] and all delays
//! through a [`Scheduler`].

use std::time::Duration;

use pagesift_core::WidgetConfig;
use tracing::{debug, trace};

use crate::{
    document::ContentProvider,
    indexer::TextIndex,
    navigator::{Direction, ResultNavigator},
    query::{MatchEntry, SearchQuery},
    render::render_results,
    scheduler::{ManualScheduler, Scheduler, TimerKind},
    snippet::SnippetWindow,
};

/// Visibility of the results panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    /// Panel hidden, no results state.
    Hidden,
    /// Panel visible, showing results or the empty state.
    Shown,
}

/// Keys the widget reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Other,
}

impl Key {
    /// Map a `KeyboardEvent.key` name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowDown" => Self::ArrowDown,
            "ArrowUp" => Self::ArrowUp,
            "Enter" => Self::Enter,
            "Escape" => Self::Escape,
            _ => Self::Other,
        }
    }
}

/// The surface a widget renders into.
pub trait WidgetHost {
    /// Handle to a page element, as stored in the index.
    type Element: Clone;

    /// Replace the search input's value.
    fn set_input_value(&mut self, value: &str);

    /// Replace the results panel's markup.
    fn set_results_html(&mut self, html: &str);

    /// Show or hide the results panel.
    fn set_panel(&mut self, panel: Panel);

    /// Mark the result at `index` active, unmark the rest, and scroll it
    /// into the nearest visible position inside the panel.
    fn mark_active(&mut self, index: usize);

    /// Element that should receive the highlight for `element`.
    fn highlight_container(&self, element: &Self::Element) -> Self::Element;

    /// Smoothly scroll `element` to the center of the viewport.
    fn reveal(&mut self, element: &Self::Element);

    fn add_class(&mut self, element: &Self::Element, class: &str);

    fn remove_class(&mut self, element: &Self::Element, class: &str);
}

/// One search box bound to a page.
pub struct SearchWidget<H: WidgetHost, S: Scheduler> {
    config: WidgetConfig,
    index: TextIndex<H::Element>,
    host: H,
    scheduler: S,
    matches: Vec<MatchEntry>,
    navigator: ResultNavigator,
    pending_query: Option<String>,
    highlighted: Option<H::Element>,
}

impl<H: WidgetHost, S: Scheduler> SearchWidget<H, S> {
    /// Create a widget over an existing index.
    pub fn new(config: WidgetConfig, index: TextIndex<H::Element>, host: H, scheduler: S) -> Self {
        Self {
            config,
            index,
            host,
            scheduler,
            matches: Vec::new(),
            navigator: ResultNavigator::default(),
            pending_query: None,
            highlighted: None,
        }
    }

    /// Index `provider` and create a widget over it.
    pub fn attach<P>(provider: &P, config: WidgetConfig, host: H, scheduler: S) -> Self
    where
        P: ContentProvider<Element = H::Element>,
    {
        let index = TextIndex::build(provider, &config);
        debug!(entries = index.len(), "Search widget attached");
        Self::new(config, index, host, scheduler)
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn index(&self) -> &TextIndex<H::Element> {
        &self.index
    }

    /// Matches of the last search.
    pub fn matches(&self) -> &[MatchEntry] {
        &self.matches
    }

    /// Currently selected result.
    pub fn selected(&self) -> Option<usize> {
        self.navigator.selected()
    }

    /// Element currently carrying the highlight class.
    pub fn highlighted(&self) -> Option<&H::Element> {
        self.highlighted.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Input changed: restart the debounce with the latest value.
    pub fn on_input(&mut self, value: &str) {
        self.pending_query = Some(value.to_string());
        self.scheduler.cancel(TimerKind::Search);
        self.scheduler.schedule(
            TimerKind::Search,
            Duration::from_millis(self.config.debounce_ms),
        );
    }

    /// A scheduled task came due.
    pub fn on_timer(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::Search => {
                if let Some(query) = self.pending_query.take() {
                    self.perform_search(&query);
                }
            }
            TimerKind::Unhighlight => {
                if let Some(element) = self.highlighted.take() {
                    self.host.remove_class(&element, &self.config.highlight_class);
                }
            }
        }
    }

    /// Run a search immediately and render its results.
    pub fn perform_search(&mut self, raw: &str) {
        let query = SearchQuery::parse(raw);
        if query.is_empty() {
            self.dismiss();
            return;
        }

        self.matches = self.index.search(&query, self.config.results_limit);
        self.navigator.reset(self.matches.len());

        let html = render_results(&self.index, &self.matches, SnippetWindow::from(&self.config));
        self.host.set_results_html(&html);
        self.host.set_panel(Panel::Shown);

        debug!(
            query_len = query.len,
            matches = self.matches.len(),
            "Search performed"
        );
    }

    /// Handle a key press in the search input.
    ///
    /// Returns `true` when the browser's default action should be suppressed.
    pub fn on_key(&mut self, key: Key) -> bool {
        match key {
            Key::ArrowDown => {
                self.select(Direction::Down);
                true
            }
            Key::ArrowUp => {
                self.select(Direction::Up);
                true
            }
            Key::Enter => {
                if let Some(position) = self.navigator.activation_target() {
                    self.activate(position);
                }
                false
            }
            Key::Escape => {
                self.scheduler.cancel(TimerKind::Search);
                self.pending_query = None;
                self.host.set_input_value("");
                self.dismiss();
                false
            }
            Key::Other => false,
        }
    }

    /// Move the keyboard selection.
    pub fn select(&mut self, direction: Direction) -> Option<usize> {
        let selected = self.navigator.step(direction)?;
        self.host.mark_active(selected);
        trace!(selected, "Result selected");
        Some(selected)
    }

    /// Jump to the result at `position` in the current list.
    ///
    /// Returns `false` when no such result exists.
    pub fn activate(&mut self, position: usize) -> bool {
        let Some(m) = self.matches.get(position) else {
            return false;
        };

        let element = self.index.resolve(m).element.clone();
        let target = self.host.highlight_container(&element);
        self.host.reveal(&target);
        self.highlight(target);

        debug!(position, "Result activated");
        true
    }

    /// Clear results and hide the panel.
    pub fn dismiss(&mut self) {
        self.matches.clear();
        self.navigator.clear();
        self.host.set_results_html("");
        self.host.set_panel(Panel::Hidden);
    }

    /// Stop every pending task and undo the current highlight.
    ///
    /// Call before the widget is torn down; results are left as they are.
    pub fn detach(&mut self) {
        self.scheduler.cancel(TimerKind::Search);
        self.scheduler.cancel(TimerKind::Unhighlight);
        self.pending_query = None;
        self.on_timer(TimerKind::Unhighlight);
        debug!("Widget detached");
    }

    fn highlight(&mut self, target: H::Element) {
        self.scheduler.cancel(TimerKind::Unhighlight);
        if let Some(previous) = self.highlighted.take() {
            self.host.remove_class(&previous, &self.config.highlight_class);
        }

        self.host.add_class(&target, &self.config.highlight_class);
        self.highlighted = Some(target);
        self.scheduler.schedule(
            TimerKind::Unhighlight,
            Duration::from_millis(self.config.highlight_ms),
        );
    }
}

impl<H: WidgetHost> SearchWidget<H, ManualScheduler> {
    /// Advance the virtual clock and run whatever came due.
    pub fn advance(&mut self, by: Duration) {
        for kind in self.scheduler.advance(by) {
            self.on_timer(kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::IndexEntry;

    /// Host over plain element ids that records what it was told.
    #[derive(Debug, Default)]
    struct RecordingHost {
        input: String,
        results: String,
        panel: Option<Panel>,
        active: Option<usize>,
        revealed: Vec<usize>,
        classes: Vec<(usize, String)>,
    }

    impl WidgetHost for RecordingHost {
        type Element = usize;

        fn set_input_value(&mut self, value: &str) {
            self.input = value.to_string();
        }

        fn set_results_html(&mut self, html: &str) {
            self.results = html.to_string();
        }

        fn set_panel(&mut self, panel: Panel) {
            self.panel = Some(panel);
        }

        fn mark_active(&mut self, index: usize) {
            self.active = Some(index);
        }

        fn highlight_container(&self, element: &usize) -> usize {
            // elements 10.. live inside container 100
            if *element >= 10 { 100 } else { *element }
        }

        fn reveal(&mut self, element: &usize) {
            self.revealed.push(*element);
        }

        fn add_class(&mut self, element: &usize, class: &str) {
            self.classes.push((*element, class.to_string()));
        }

        fn remove_class(&mut self, element: &usize, class: &str) {
            self.classes.retain(|(e, c)| !(e == element && c == class));
        }
    }

    fn entry(text: &str, element: usize) -> IndexEntry<usize> {
        IndexEntry {
            text: text.to_string(),
            text_lower: text.to_lowercase(),
            element,
            heading: "Page".to_string(),
        }
    }

    fn widget(entries: Vec<IndexEntry<usize>>) -> SearchWidget<RecordingHost, ManualScheduler> {
        SearchWidget::new(
            WidgetConfig::default(),
            TextIndex::from_entries(entries),
            RecordingHost::default(),
            ManualScheduler::new(),
        )
    }

    fn fruit() -> SearchWidget<RecordingHost, ManualScheduler> {
        widget(vec![
            entry("apple pie", 1),
            entry("banana bread", 2),
            entry("apple tart", 11),
            entry("apple crumble", 3),
        ])
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_key_from_name() {
        assert_eq!(Key::from_name("ArrowDown"), Key::ArrowDown);
        assert_eq!(Key::from_name("Escape"), Key::Escape);
        assert_eq!(Key::from_name("a"), Key::Other);
    }

    #[test]
    fn test_debounce_runs_only_last_input() {
        let mut w = fruit();
        w.on_input("b");
        w.advance(ms(100));
        w.on_input("ap");
        w.advance(ms(100));
        w.on_input("apple");

        w.advance(ms(159));
        assert!(w.matches().is_empty());
        assert_eq!(w.host().panel, None);

        w.advance(ms(1));
        assert_eq!(w.matches().len(), 3);
        assert_eq!(w.host().panel, Some(Panel::Shown));
        assert!(!w.scheduler().is_pending(TimerKind::Search));
    }

    #[test]
    fn test_empty_input_hides_panel() {
        let mut w = fruit();
        w.perform_search("apple");
        assert_eq!(w.host().panel, Some(Panel::Shown));

        w.on_input("   ");
        w.advance(ms(160));
        assert_eq!(w.host().panel, Some(Panel::Hidden));
        assert_eq!(w.host().results, "");
        assert!(w.matches().is_empty());
        assert_eq!(w.selected(), None);
    }

    #[test]
    fn test_no_results_renders_empty_state() {
        let mut w = fruit();
        w.perform_search("cherry");
        assert_eq!(w.host().panel, Some(Panel::Shown));
        assert_eq!(w.host().results, crate::EMPTY_RESULTS_HTML);

        // navigation is inert without results
        assert!(w.on_key(Key::ArrowDown));
        assert_eq!(w.selected(), None);
        assert!(!w.on_key(Key::Enter));
        assert!(w.host().revealed.is_empty());
    }

    #[test]
    fn test_arrow_navigation_wraps() {
        let mut w = fruit();
        w.perform_search("apple");

        assert!(w.on_key(Key::ArrowDown));
        assert_eq!(w.selected(), Some(0));
        assert_eq!(w.host().active, Some(0));

        w.on_key(Key::ArrowUp);
        assert_eq!(w.selected(), Some(2));

        for _ in 0..4 {
            w.on_key(Key::ArrowDown);
        }
        assert_eq!(w.selected(), Some(0));
    }

    #[test]
    fn test_new_search_resets_selection() {
        let mut w = fruit();
        w.perform_search("apple");
        w.on_key(Key::ArrowDown);
        w.on_key(Key::ArrowDown);
        w.perform_search("bread");
        assert_eq!(w.selected(), None);
    }

    #[test]
    fn test_enter_activates_first_result_without_selection() {
        let mut w = fruit();
        w.perform_search("apple");
        assert!(!w.on_key(Key::Enter));

        assert_eq!(w.host().revealed, vec![1]);
        assert_eq!(w.host().classes, vec![(1, "search-target".to_string())]);
    }

    #[test]
    fn test_enter_activates_selection_in_container() {
        let mut w = fruit();
        w.perform_search("apple");
        w.on_key(Key::ArrowDown);
        w.on_key(Key::ArrowDown);
        w.on_key(Key::Enter);

        // "apple tart" lives in element 11, highlighted through its container
        assert_eq!(w.host().revealed, vec![100]);
        assert_eq!(w.highlighted(), Some(&100));
    }

    #[test]
    fn test_highlight_expires() {
        let mut w = fruit();
        w.perform_search("apple");
        w.activate(0);

        w.advance(ms(1799));
        assert_eq!(w.host().classes.len(), 1);
        w.advance(ms(1));
        assert!(w.host().classes.is_empty());
        assert_eq!(w.highlighted(), None);
    }

    #[test]
    fn test_new_highlight_restarts_timer() {
        let mut w = fruit();
        w.perform_search("apple");
        w.activate(0);
        w.advance(ms(1000));
        w.activate(2);

        // the first target lost its highlight when the second was applied
        assert_eq!(w.host().classes, vec![(3, "search-target".to_string())]);

        w.advance(ms(1000));
        assert_eq!(w.host().classes.len(), 1);
        w.advance(ms(800));
        assert!(w.host().classes.is_empty());
    }

    #[test]
    fn test_detach_clears_highlight_and_timers() {
        let mut w = fruit();
        w.perform_search("apple");
        w.activate(0);
        w.on_input("pear");
        assert_eq!(w.scheduler().pending_count(), 2);

        w.detach();
        assert!(w.host().classes.is_empty());
        assert_eq!(w.highlighted(), None);
        assert_eq!(w.scheduler().pending_count(), 0);

        // nothing left to fire
        w.advance(ms(5000));
        assert_eq!(w.matches().len(), 3);
    }

    #[test]
    fn test_activate_out_of_range() {
        let mut w = fruit();
        w.perform_search("apple");
        assert!(!w.activate(3));
        assert!(w.host().revealed.is_empty());
    }

    #[test]
    fn test_escape_clears_everything() {
        let mut w = fruit();
        w.host_mut().input = "apple".to_string();
        w.perform_search("apple");
        w.on_key(Key::ArrowDown);

        w.on_input("apple p");
        assert!(!w.on_key(Key::Escape));

        assert_eq!(w.host().input, "");
        assert_eq!(w.host().results, "");
        assert_eq!(w.host().panel, Some(Panel::Hidden));
        assert_eq!(w.selected(), None);
        assert!(w.matches().is_empty());

        // the pending search was dropped with the input
        w.advance(ms(500));
        assert_eq!(w.host().panel, Some(Panel::Hidden));
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let mut w = fruit();
        w.perform_search("apple");
        assert!(!w.on_key(Key::Other));
        assert_eq!(w.matches().len(), 3);
    }

    #[test]
    fn test_results_limit_from_config() {
        let entries = (0..30).map(|i| entry(&format!("row {i}"), i)).collect();
        let mut w = SearchWidget::new(
            WidgetConfig {
                results_limit: 5,
                ..WidgetConfig::default()
            },
            TextIndex::from_entries(entries),
            RecordingHost::default(),
            ManualScheduler::new(),
        );

        w.perform_search("row");
        assert_eq!(w.matches().len(), 5);
    }
}
