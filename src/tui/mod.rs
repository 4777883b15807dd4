// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors everything on screen. The app
// orchestrator pushes `UiUpdate` messages over an mpsc channel; the TUI
// applies them to `ViewState` and re-renders at ~30 fps. The carousel's
// rotation interval, the one-second widget tick, and the render tick all
// live in one `tokio::select!` loop, so there is never more than one live
// rotation timer.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use chrono::{Local, Utc};
use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use tokio::sync::mpsc;

use crate::carousel::{Carousel, RotationTimer};
use crate::config::{ClockCity, Config};
use crate::custom::CustomEntry;
use crate::directory::{DirectoryEntry, PageConfig, Site};
use crate::protocol::{UiUpdate, UserCommand};
use crate::search::{CloseTrigger, SearchMode, SearchPanel};

use layout::build_layout;
use widgets::calendar::{self, CalendarInfo, LunarProvider};
use widgets::clock::{self, ClockReading};
use widgets::{announcement, chrome, directory, search_bar, search_results};

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Which component owns plain keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    SearchInput,
}

/// Everything the render pass derives the frame from.
///
/// Updated by `UiUpdate` messages from the app orchestrator and by input
/// events; the frame is a pure function of this struct.
pub struct ViewState {
    /// Page chrome from the directory's page_config pseudo-entry.
    pub page: PageConfig,
    /// Directory categories in document order.
    pub entries: Vec<DirectoryEntry>,
    /// Custom-module categories, shown ahead of the directory's.
    pub custom_entries: Vec<CustomEntry>,
    /// The custom filter the shown entries were selected for.
    pub custom_filter: Option<String>,
    /// Announcement carousel; `None` when the document has none.
    pub carousel: Option<Carousel>,
    /// Search box and results-overlay state.
    pub search: SearchPanel,
    pub input_mode: InputMode,
    /// Blocking modal alert text, if one is up.
    pub alert: Option<String>,
    pub selected_category: usize,
    pub selected_site: usize,
    /// Scroll offset inside the results overlay.
    pub results_scroll: usize,
    /// Configured world-clock cities.
    pub clock_cities: Vec<ClockCity>,
    /// Last computed clock readings (widget tick).
    pub clock_readings: Vec<ClockReading>,
    /// Last computed calendar info; `None` renders the failure literal.
    pub calendar: Option<CalendarInfo>,
    /// Whether the pointer is currently over the carousel panel.
    pub hovering_carousel: bool,
    /// Set when the rotation timer must be rebuilt (jump, pause, resume,
    /// or a new carousel). Consumed by the event loop.
    pub rotation_reset: bool,
}

impl ViewState {
    pub fn new(clock_cities: Vec<ClockCity>, default_mode: SearchMode) -> Self {
        ViewState {
            page: PageConfig::default(),
            entries: Vec::new(),
            custom_entries: Vec::new(),
            custom_filter: None,
            carousel: None,
            search: SearchPanel::new(default_mode),
            input_mode: InputMode::Normal,
            alert: None,
            selected_category: 0,
            selected_site: 0,
            results_scroll: 0,
            clock_cities,
            clock_readings: Vec::new(),
            calendar: None,
            hovering_carousel: false,
            rotation_reset: false,
        }
    }

    /// Build a ViewState from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        ViewState::new(
            config.clock.cities.clone(),
            config.search.default_mode,
        )
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        ViewState::new(Vec::new(), SearchMode::External)
    }

    // -- category / site accessors ------------------------------------------

    /// Custom entries come first, then the directory's.
    pub fn category_count(&self) -> usize {
        self.custom_entries.len() + self.entries.len()
    }

    pub fn category_label(&self, index: usize) -> String {
        if index < self.custom_entries.len() {
            format!("{}[Custom]", self.custom_entries[index].classify)
        } else {
            self.entries[index - self.custom_entries.len()].classify.clone()
        }
    }

    pub fn sites_at(&self, index: usize) -> &[Site] {
        if index < self.custom_entries.len() {
            &self.custom_entries[index].sites
        } else {
            &self.entries[index - self.custom_entries.len()].sites
        }
    }

    pub fn selected_sites(&self) -> &[Site] {
        if self.category_count() == 0 {
            return &[];
        }
        self.sites_at(self.selected_category.min(self.category_count() - 1))
    }

    pub fn selected_site_href(&self) -> Option<String> {
        self.selected_sites()
            .get(self.selected_site)
            .map(|site| site.href.clone())
    }

    // -- selection ----------------------------------------------------------

    pub fn select_category(&mut self, index: usize) {
        if index < self.category_count() {
            self.selected_category = index;
            self.selected_site = 0;
        }
    }

    pub fn select_site(&mut self, index: usize) {
        if index < self.selected_sites().len() {
            self.selected_site = index;
        }
    }

    pub fn select_next_category(&mut self) {
        let count = self.category_count();
        if count > 0 {
            self.select_category((self.selected_category + 1).min(count - 1));
        }
    }

    pub fn select_prev_category(&mut self) {
        self.select_category(self.selected_category.saturating_sub(1));
    }

    pub fn select_next_site(&mut self) {
        let count = self.selected_sites().len();
        if count > 0 {
            self.selected_site = (self.selected_site + 1).min(count - 1);
        }
    }

    pub fn select_prev_site(&mut self) {
        self.selected_site = self.selected_site.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let count = self.category_count();
        if count == 0 {
            self.selected_category = 0;
            self.selected_site = 0;
            return;
        }
        if self.selected_category >= count {
            self.selected_category = count - 1;
            self.selected_site = 0;
        }
        let sites = self.selected_sites().len();
        if self.selected_site >= sites {
            self.selected_site = sites.saturating_sub(1);
        }
    }

    // -- carousel -----------------------------------------------------------

    /// Jump the carousel (indicator click / number key) and flag the timer
    /// for a restart so the next auto-advance is a full interval away.
    pub fn jump_carousel(&mut self, index: usize) {
        if let Some(carousel) = &mut self.carousel {
            if carousel.jump_to(index) {
                self.rotation_reset = true;
            }
        }
    }

    /// Close the results overlay via any of the equivalent triggers.
    pub fn close_results(&mut self, trigger: CloseTrigger) {
        self.search.close_via(trigger);
        self.results_scroll = 0;
    }

    // -- widgets ------------------------------------------------------------

    /// One-second widget tick: recompute the clock and calendar text.
    pub fn recompute_widgets(&mut self, lunar: Option<&dyn LunarProvider>) {
        self.clock_readings = clock::readings(&self.clock_cities, Utc::now());
        self.calendar = calendar::compute(Local::now(), lunar);
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Directory(doc) => {
            state.page = doc.page;
            state.entries = doc.entries;
            state.carousel = Carousel::from_config(&doc.announcements);
            // Keep hover semantics across a refresh: a pointer resting on
            // the panel keeps the fresh carousel paused too.
            if state.hovering_carousel {
                if let Some(carousel) = &mut state.carousel {
                    carousel.pause();
                }
            }
            state.rotation_reset = true;
            state.clamp_selection();
        }
        UiUpdate::Custom {
            entries,
            active_filter,
        } => {
            state.custom_entries = entries;
            state.custom_filter = active_filter;
            state.clamp_selection();
        }
        UiUpdate::SearchResults { query, results } => {
            state
                .search
                .open_results(crate::search::ResultsView::new(query, results));
            state.results_scroll = 0;
        }
        UiUpdate::Alert(message) => {
            state.alert = Some(message);
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    chrome::render_title_bar(frame, layout.title_bar, state);
    announcement::render(frame, layout.announcement, state);
    search_bar::render(frame, layout.search_bar, state);
    directory::render_category_nav(frame, layout.category_nav, state);
    directory::render_sites(frame, layout.sites, state);
    clock::render(frame, layout.clock, state);
    calendar::render(frame, layout.calendar, state);
    chrome::render_footer(frame, layout.footer, state);

    // Overlays draw last: results panel, then the blocking alert on top.
    search_results::render(frame, state);
    render_alert(frame, state);
}

fn render_alert(frame: &mut Frame, state: &ViewState) {
    let Some(message) = &state.alert else {
        return;
    };
    let area = layout::alert_rect(frame.area());
    frame.render_widget(Clear, area);
    let paragraph = Paragraph::new(vec![
        Line::default(),
        Line::from(format!(" {message}")),
        Line::default(),
        Line::from(" Press Enter to dismiss"),
    ])
    .wrap(Wrap { trim: false })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Error")
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// This is the main entry point for the terminal UI. It:
/// 1. Initializes the terminal (raw mode, alternate screen, mouse capture).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, input events, the rotation
///    interval, the widget tick, and render ticks.
/// 4. Restores the terminal on clean exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    mut view_state: ViewState,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    // Pointer semantics (hover pause, indicator clicks, overlay dismissal)
    // need mouse events.
    crossterm::execute!(std::io::stdout(), crossterm::event::EnableMouseCapture)?;

    // Restore the terminal on panic; chain the original hook after ours.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut event_stream = EventStream::new();
    let mut rotation_timer = RotationTimer::new();

    // Widget recompute once per second; render at ~30fps.
    let mut widget_tick = tokio::time::interval(Duration::from_secs(1));
    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    view_state.recompute_widgets(None);

    loop {
        tokio::select! {
            // UI updates from the app orchestrator
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => break, // channel closed: app is shutting down
                }
            }

            // Input events
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        let command = input::handle_key(key_event, &mut view_state);
                        if let Some(command) = command {
                            let quitting = command == UserCommand::Quit;
                            let _ = cmd_tx.send(command).await;
                            if quitting {
                                break;
                            }
                        }
                    }
                    Some(Ok(Event::Mouse(mouse_event))) => {
                        let size = terminal.size()?;
                        let area = Rect::new(0, 0, size.width, size.height);
                        let layout = build_layout(area);
                        let command =
                            input::handle_mouse(mouse_event, &mut view_state, &layout, area);
                        if let Some(command) = command {
                            let _ = cmd_tx.send(command).await;
                        }
                    }
                    Some(Ok(_)) => {
                        // Resize and focus events: the next render picks
                        // them up.
                    }
                    Some(Err(_)) | None => break,
                }
            }

            // Carousel rotation
            _ = rotation_timer.tick() => {
                if let Some(carousel) = &mut view_state.carousel {
                    if carousel.rotation_due() {
                        carousel.advance();
                    }
                }
            }

            // Widget recompute tick
            _ = widget_tick.tick() => {
                view_state.recompute_widgets(None);
            }

            // Render tick
            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }

        // Rebuild the rotation timer after any transition that demands it
        // (new carousel, jump, pause, resume). The old handle is dropped
        // first, so exactly one rotation timer is ever live.
        if view_state.rotation_reset {
            match &view_state.carousel {
                Some(carousel) => rotation_timer.sync(carousel),
                None => rotation_timer.clear(),
            }
            view_state.rotation_reset = false;
        }
    }

    let _ = crossterm::execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
