//! Which list the books page is showing.
//!
//! Three mutually exclusive modes. Search, month filter and reset share one
//! generation counter: a search or filter response is applied only when no
//! later view transition has been issued since.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// The canonical, paginated list.
    #[default]
    All,
    /// Result of an ISBN search.
    SearchResult,
    /// Books sold in one year/month.
    MonthFilter { year: i32, month: u32 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    mode: ViewMode,
    search_term: String,
    generation: u64,
}

impl ViewState {
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
    }

    /// True whenever the displayed list is not the canonical list.
    pub fn is_filter_active(&self) -> bool {
        self.mode != ViewMode::All
    }

    /// Issue a new view request, superseding any outstanding one.
    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub fn enter(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    /// Back to `All` without touching the search term.
    pub fn deactivate(&mut self) {
        self.mode = ViewMode::All;
    }

    /// Back to `All`, search term cleared, outstanding requests superseded.
    pub fn reset(&mut self) {
        self.mode = ViewMode::All;
        self.search_term.clear();
        self.next_generation();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_request_supersedes_earlier() {
        let mut view = ViewState::default();
        let first = view.next_generation();
        let second = view.next_generation();
        assert!(!view.is_current(first));
        assert!(view.is_current(second));
    }

    #[test]
    fn reset_clears_term_and_supersedes() {
        let mut view = ViewState::default();
        view.set_search_term("9780000000013");
        let gen = view.next_generation();
        view.enter(ViewMode::SearchResult);
        assert!(view.is_filter_active());

        view.reset();
        assert_eq!(view.mode(), ViewMode::All);
        assert_eq!(view.search_term(), "");
        assert!(!view.is_current(gen));
    }

    #[test]
    fn month_filter_replaces_search_directly() {
        let mut view = ViewState::default();
        view.enter(ViewMode::SearchResult);
        view.enter(ViewMode::MonthFilter { year: 2024, month: 5 });
        assert_eq!(view.mode(), ViewMode::MonthFilter { year: 2024, month: 5 });
    }
}
