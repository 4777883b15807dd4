// Directory search: local substring matching over the fetched directory, or
// a hand-off to an external engine, plus the results-panel state machine.
//
// The panel is a plain state object (`Idle` or `Results`); the overlay is
// rendered from it and every close path funnels through one idempotent
// transition.

use serde::Deserialize;

use crate::directory::DirectoryEntry;

// ---------------------------------------------------------------------------
// SearchMode
// ---------------------------------------------------------------------------

/// Where a submitted query goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Filter the fetched directory in-process.
    Local,
    /// Open the external engine in the system browser.
    External,
}

impl SearchMode {
    pub fn toggled(self) -> SearchMode {
        match self {
            SearchMode::Local => SearchMode::External,
            SearchMode::External => SearchMode::Local,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SearchMode::Local => "Local",
            SearchMode::External => "Web",
        }
    }
}

// ---------------------------------------------------------------------------
// SearchResult
// ---------------------------------------------------------------------------

/// One match from a local search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    /// The category heading itself matched, independently of its sites.
    Category {
        category: String,
        icon: String,
        match_text: String,
    },
    /// A site matched on name, desc, or href (first matching field wins).
    Site {
        category: String,
        name: String,
        desc: String,
        href: String,
        logo: String,
        match_text: String,
    },
}

impl SearchResult {
    pub fn category(&self) -> &str {
        match self {
            SearchResult::Category { category, .. } => category,
            SearchResult::Site { category, .. } => category,
        }
    }

    pub fn match_text(&self) -> &str {
        match self {
            SearchResult::Category { match_text, .. } => match_text,
            SearchResult::Site { match_text, .. } => match_text,
        }
    }
}

// ---------------------------------------------------------------------------
// Local matching
// ---------------------------------------------------------------------------

/// Case-insensitive substring search over the directory.
///
/// The category label is matched independently of its sites; per site the
/// first matching field of name, desc, href wins and becomes the match
/// text. Result order is document order: each category's own match (if any)
/// followed by its matching sites.
pub fn search_local_data(
    entries: &[DirectoryEntry],
    query: &str,
    default_logo: &str,
) -> Vec<SearchResult> {
    let needle = query.to_lowercase();
    let mut results = Vec::new();

    for entry in entries {
        if entry.classify.to_lowercase().contains(&needle) {
            results.push(SearchResult::Category {
                category: entry.classify.clone(),
                icon: entry.icon.clone(),
                match_text: entry.classify.clone(),
            });
        }

        for site in &entry.sites {
            let matched = [&site.name, &site.desc, &site.href]
                .into_iter()
                .find(|field| field.to_lowercase().contains(&needle));

            if let Some(match_text) = matched {
                results.push(SearchResult::Site {
                    category: entry.classify.clone(),
                    name: site.name.clone(),
                    desc: site.desc.clone(),
                    href: site.href.clone(),
                    logo: site.logo_or_default(default_logo),
                    match_text: match_text.clone(),
                });
            }
        }
    }

    results
}

// ---------------------------------------------------------------------------
// Result grouping
// ---------------------------------------------------------------------------

/// Results under one category heading, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultGroup {
    pub category: String,
    pub items: Vec<SearchResult>,
}

/// The rendered shape of a finished search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub query: String,
    pub total: usize,
    pub groups: Vec<ResultGroup>,
}

impl ResultsView {
    pub fn new(query: impl Into<String>, results: Vec<SearchResult>) -> Self {
        let total = results.len();
        ResultsView {
            query: query.into(),
            total,
            groups: group_results(results),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Group results by category label in first-seen order. Labels shared by
/// several directory entries merge into one group.
pub fn group_results(results: Vec<SearchResult>) -> Vec<ResultGroup> {
    let mut groups: Vec<ResultGroup> = Vec::new();

    for result in results {
        match groups
            .iter_mut()
            .find(|g| g.category == result.category())
        {
            Some(group) => group.items.push(result),
            None => groups.push(ResultGroup {
                category: result.category().to_string(),
                items: vec![result],
            }),
        }
    }

    groups
}

// ---------------------------------------------------------------------------
// External redirect
// ---------------------------------------------------------------------------

/// Build the external engine URL for a query (query URL-encoded and appended
/// to the configured prefix).
pub fn external_search_url(engine_url: &str, query: &str) -> String {
    format!("{engine_url}{}", urlencoding::encode(query))
}

// ---------------------------------------------------------------------------
// SearchPanel
// ---------------------------------------------------------------------------

/// Panel lifecycle: input visible and overlay hidden, or overlay showing a
/// finished search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelState {
    Idle,
    Results(ResultsView),
}

/// What a submit should do, decided from input and mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAction {
    /// Empty trimmed query: nothing happens, input keeps focus.
    None,
    /// Fetch the directory and run a local search for this query.
    Local(String),
    /// Open the external engine for this query; the panel stays idle.
    External(String),
}

/// The five equivalent ways out of the results overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    BackButton,
    OverlayBackground,
    OutsideClick,
    RightClick,
    Escape,
}

impl CloseTrigger {
    pub const ALL: [CloseTrigger; 5] = [
        CloseTrigger::BackButton,
        CloseTrigger::OverlayBackground,
        CloseTrigger::OutsideClick,
        CloseTrigger::RightClick,
        CloseTrigger::Escape,
    ];
}

/// Search box state: the typed query, the engine mode, and the overlay
/// lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPanel {
    input: String,
    mode: SearchMode,
    state: PanelState,
}

impl SearchPanel {
    pub fn new(mode: SearchMode) -> Self {
        SearchPanel {
            input: String::new(),
            mode,
            state: PanelState::Idle,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, PanelState::Results(_))
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    /// Remove the last character; emptying the input (to whitespace or
    /// nothing) also dismisses any open results.
    pub fn backspace(&mut self) {
        self.input.pop();
        if self.input.trim().is_empty() {
            self.close();
        }
    }

    /// Whether the clear control should be shown.
    pub fn clear_visible(&self) -> bool {
        !self.input.trim().is_empty()
    }

    /// Clear control: empties the input and forces `Results -> Idle` if the
    /// overlay is open.
    pub fn clear(&mut self) {
        self.input.clear();
        self.close();
    }

    /// Decide what a submit does. Trims the query; whitespace-only input is
    /// a no-op.
    pub fn submit(&self) -> SubmitAction {
        let query = self.input.trim();
        if query.is_empty() {
            return SubmitAction::None;
        }
        match self.mode {
            SearchMode::Local => SubmitAction::Local(query.to_string()),
            SearchMode::External => SubmitAction::External(query.to_string()),
        }
    }

    /// A finished local search arrived: show the overlay.
    pub fn open_results(&mut self, view: ResultsView) {
        self.state = PanelState::Results(view);
    }

    /// `Results -> Idle`; already-idle panels stay idle.
    pub fn close(&mut self) {
        self.state = PanelState::Idle;
    }

    /// Close via one of the five equivalent triggers.
    pub fn close_via(&mut self, _trigger: CloseTrigger) {
        self.close();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{DirectoryEntry, Site};

    const DEFAULT_LOGO: &str = "/static/logo.svg";

    fn site(name: &str, desc: &str, href: &str, logo: &str) -> Site {
        Site {
            name: name.to_string(),
            href: href.to_string(),
            desc: desc.to_string(),
            logo: logo.to_string(),
        }
    }

    fn entry(classify: &str, icon: &str, sites: Vec<Site>) -> DirectoryEntry {
        DirectoryEntry {
            id: format!("cat-{}", classify.to_lowercase()),
            classify: classify.to_string(),
            icon: icon.to_string(),
            sites,
        }
    }

    fn sample() -> Vec<DirectoryEntry> {
        vec![
            entry(
                "Tools",
                "i1",
                vec![
                    site("Foo", "bar", "http://x", "no-logo"),
                    site("Hammer", "hits nails", "http://hammer.dev", "/l/h.png"),
                ],
            ),
            entry(
                "Docs",
                "i2",
                vec![site("Rust Book", "learn rust", "http://book.rs", "no-logo")],
            ),
        ]
    }

    #[test]
    fn empty_directory_yields_no_results() {
        assert!(search_local_data(&[], "x", DEFAULT_LOGO).is_empty());
    }

    #[test]
    fn category_label_match_yields_one_category_result() {
        let results = search_local_data(&sample(), "tool", DEFAULT_LOGO);
        assert_eq!(results.len(), 1);
        match &results[0] {
            SearchResult::Category {
                category,
                icon,
                match_text,
            } => {
                assert_eq!(category, "Tools");
                assert_eq!(icon, "i1");
                assert_eq!(match_text, "Tools");
            }
            other => panic!("expected category result, got {other:?}"),
        }
    }

    #[test]
    fn site_match_priority_is_name_then_desc_then_href() {
        let entries = vec![entry(
            "C",
            "i",
            vec![
                // "probe" appears in every field; name wins.
                site("probe-name", "probe-desc", "http://probe", "no-logo"),
                // only desc and href carry it; desc wins.
                site("other", "probe-desc", "http://probe", "no-logo"),
                // only href carries it.
                site("other", "plain", "http://probe", "no-logo"),
            ],
        )];
        let results = search_local_data(&entries, "probe", DEFAULT_LOGO);
        let match_texts: Vec<&str> = results.iter().map(|r| r.match_text()).collect();
        assert_eq!(match_texts, vec!["probe-name", "probe-desc", "http://probe"]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let results = search_local_data(&sample(), "FOO", DEFAULT_LOGO);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].match_text(), "Foo");
    }

    #[test]
    fn scenario_foo_under_tools_with_logo_substitution() {
        let entries = vec![entry(
            "Tools",
            "i1",
            vec![site("Foo", "bar", "http://x", "no-logo")],
        )];
        let results = search_local_data(&entries, "foo", DEFAULT_LOGO);
        assert_eq!(results.len(), 1);
        match &results[0] {
            SearchResult::Site {
                category,
                name,
                logo,
                match_text,
                ..
            } => {
                assert_eq!(category, "Tools");
                assert_eq!(name, "Foo");
                assert_eq!(match_text, "Foo");
                assert_eq!(logo, DEFAULT_LOGO);
            }
            other => panic!("expected site result, got {other:?}"),
        }
    }

    #[test]
    fn category_and_site_matches_are_independent() {
        // "rust" hits the Docs site but not the Docs label; "docs" hits the
        // label but no site.
        let label_only = search_local_data(&sample(), "docs", DEFAULT_LOGO);
        assert_eq!(label_only.len(), 1);
        assert!(matches!(label_only[0], SearchResult::Category { .. }));

        let site_only = search_local_data(&sample(), "rust", DEFAULT_LOGO);
        assert_eq!(site_only.len(), 1);
        assert!(matches!(site_only[0], SearchResult::Site { .. }));
    }

    #[test]
    fn groups_preserve_first_seen_order_with_category_first() {
        // "o" hits: Tools label, Foo (name), Docs label, Rust Book (name).
        let results = search_local_data(&sample(), "o", DEFAULT_LOGO);
        let view = ResultsView::new("o", results);
        assert_eq!(view.total, 4);
        let labels: Vec<&str> = view.groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(labels, vec!["Tools", "Docs"]);
        assert!(matches!(
            view.groups[0].items[0],
            SearchResult::Category { .. }
        ));
    }

    #[test]
    fn duplicate_category_labels_merge_into_one_group() {
        let entries = vec![
            entry("Tools", "i1", vec![site("Foo", "", "http://x", "no-logo")]),
            entry("Tools", "i1", vec![site("Fond", "", "http://y", "no-logo")]),
        ];
        let results = search_local_data(&entries, "fo", DEFAULT_LOGO);
        let groups = group_results(results);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].items.len(), 2);
    }

    #[test]
    fn external_url_is_percent_encoded() {
        let url = external_search_url("https://www.bing.com/search?q=", "rust & tui?");
        assert_eq!(
            url,
            "https://www.bing.com/search?q=rust%20%26%20tui%3F"
        );
    }

    #[test]
    fn submit_trims_and_ignores_empty() {
        let mut panel = SearchPanel::new(SearchMode::Local);
        assert_eq!(panel.submit(), SubmitAction::None);
        for c in "   ".chars() {
            panel.push_char(c);
        }
        assert_eq!(panel.submit(), SubmitAction::None);
        for c in " foo ".chars() {
            panel.push_char(c);
        }
        assert_eq!(panel.submit(), SubmitAction::Local("foo".to_string()));
    }

    #[test]
    fn external_submit_leaves_panel_idle() {
        let mut panel = SearchPanel::new(SearchMode::External);
        for c in "query".chars() {
            panel.push_char(c);
        }
        assert_eq!(
            panel.submit(),
            SubmitAction::External("query".to_string())
        );
        assert!(!panel.is_open());
    }

    #[test]
    fn every_close_trigger_round_trips_to_idle() {
        for trigger in CloseTrigger::ALL {
            let mut panel = SearchPanel::new(SearchMode::Local);
            for c in "foo".chars() {
                panel.push_char(c);
            }
            let before = panel.clone();

            let results = search_local_data(&sample(), "foo", DEFAULT_LOGO);
            panel.open_results(ResultsView::new("foo", results));
            assert!(panel.is_open());

            panel.close_via(trigger);
            assert_eq!(panel, before, "close via {trigger:?} must restore state");

            // Closing again is a no-op.
            panel.close_via(trigger);
            assert_eq!(panel, before);
        }
    }

    #[test]
    fn clear_empties_input_and_closes_results() {
        let mut panel = SearchPanel::new(SearchMode::Local);
        for c in "foo".chars() {
            panel.push_char(c);
        }
        assert!(panel.clear_visible());
        panel.open_results(ResultsView::new("foo", vec![]));
        assert!(panel.is_open());

        panel.clear();
        assert!(!panel.is_open());
        assert!(panel.input().is_empty());
        assert!(!panel.clear_visible());
    }

    #[test]
    fn backspacing_to_empty_closes_results() {
        let mut panel = SearchPanel::new(SearchMode::Local);
        panel.push_char('a');
        panel.open_results(ResultsView::new("a", vec![]));
        assert!(panel.is_open());
        panel.backspace();
        assert!(!panel.is_open());
        assert!(panel.input().is_empty());
    }

    #[test]
    fn empty_results_view_reports_empty() {
        let view = ResultsView::new("nope", vec![]);
        assert!(view.is_empty());
        assert_eq!(view.total, 0);
        assert!(view.groups.is_empty());
    }

    #[test]
    fn mode_toggle_flips_between_local_and_external() {
        let mut panel = SearchPanel::new(SearchMode::External);
        panel.toggle_mode();
        assert_eq!(panel.mode(), SearchMode::Local);
        panel.toggle_mode();
        assert_eq!(panel.mode(), SearchMode::External);
    }
}
