// Keyboard and mouse handling.
//
// Translates crossterm events into UserCommand messages for the app
// orchestrator, or into local ViewState mutations (selection, search input,
// carousel control). Mouse events carry the browser original's pointer
// semantics: hovering the announcement panel pauses rotation, indicator
// clicks jump, and right-clicks or clicks outside the results frame close
// the overlay.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use super::layout::{overlay_rect, AppLayout};
use super::widgets::{announcement, directory, search_results};
use super::{InputMode, ViewState};
use crate::protocol::UserCommand;
use crate::search::{CloseTrigger, SubmitAction};

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to
/// the app orchestrator. Returns `None` when the key press was handled
/// locally by mutating `ViewState`.
pub fn handle_key(key_event: KeyEvent, state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress; ignoring
    // non-Press events prevents double-processing.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode (escape hatch)
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    // A blocking alert swallows everything until acknowledged.
    if state.alert.is_some() {
        if matches!(key_event.code, KeyCode::Enter | KeyCode::Esc) {
            state.alert = None;
        }
        return None;
    }

    // Results overlay: every exit path is a close transition.
    if state.search.is_open() {
        return handle_results_mode(key_event, state);
    }

    if state.input_mode == InputMode::SearchInput {
        return handle_search_input_mode(key_event, state);
    }

    handle_normal_mode(key_event, state)
}

/// Keys while the results overlay is open.
fn handle_results_mode(key_event: KeyEvent, state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            state.close_results(CloseTrigger::Escape);
            None
        }
        KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Backspace => {
            state.close_results(CloseTrigger::BackButton);
            None
        }
        KeyCode::Char('u') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            // Clear control: empties the input and forces the overlay shut.
            state.search.clear();
            state.results_scroll = 0;
            None
        }
        KeyCode::Up => {
            state.results_scroll = state.results_scroll.saturating_sub(1);
            None
        }
        KeyCode::Down => {
            state.results_scroll = state.results_scroll.saturating_add(1);
            None
        }
        _ => None,
    }
}

/// Keys while the search input has focus.
fn handle_search_input_mode(key_event: KeyEvent, state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            state.input_mode = InputMode::Normal;
            None
        }
        KeyCode::Enter => match state.search.submit() {
            SubmitAction::None => None,
            SubmitAction::Local(query) => {
                state.input_mode = InputMode::Normal;
                Some(UserCommand::Search {
                    query,
                    mode: crate::search::SearchMode::Local,
                })
            }
            SubmitAction::External(query) => {
                state.input_mode = InputMode::Normal;
                Some(UserCommand::Search {
                    query,
                    mode: crate::search::SearchMode::External,
                })
            }
        },
        KeyCode::Tab => {
            state.search.toggle_mode();
            None
        }
        KeyCode::Char('u') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            state.search.clear();
            None
        }
        KeyCode::Backspace => {
            state.search.backspace();
            None
        }
        KeyCode::Char(c) => {
            state.search.push_char(c);
            None
        }
        _ => None,
    }
}

/// Normal mode key dispatch.
fn handle_normal_mode(key_event: KeyEvent, state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('q') => Some(UserCommand::Quit),

        KeyCode::Char('/') | KeyCode::Char('s') => {
            state.input_mode = InputMode::SearchInput;
            None
        }

        KeyCode::Tab => {
            state.search.toggle_mode();
            None
        }

        KeyCode::Char('r') => Some(UserCommand::RefreshDirectory),

        // Site selection
        KeyCode::Up | KeyCode::Char('k') => {
            state.select_prev_site();
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.select_next_site();
            None
        }

        // Category selection
        KeyCode::Left | KeyCode::Char('h') => {
            state.select_prev_category();
            None
        }
        KeyCode::Right | KeyCode::Char('l') => {
            state.select_next_category();
            None
        }

        // Open the selected site in the system browser
        KeyCode::Enter => state
            .selected_site_href()
            .map(UserCommand::OpenUrl),

        // Number keys jump the carousel, like indicator clicks
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            state.jump_carousel(index);
            None
        }

        _ => None,
    }
}

/// Handle a mouse event against the current frame layout.
pub fn handle_mouse(
    mouse: MouseEvent,
    state: &mut ViewState,
    layout: &AppLayout,
    full_area: Rect,
) -> Option<UserCommand> {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            track_hover(state, layout, mouse.column, mouse.row);
            None
        }
        MouseEventKind::Down(MouseButton::Left) => {
            handle_left_click(state, layout, full_area, mouse.column, mouse.row)
        }
        MouseEventKind::Down(MouseButton::Right) => {
            // Right-click has no context menu here to suppress; while the
            // overlay is open it is one of the close paths.
            if state.search.is_open() {
                state.close_results(CloseTrigger::RightClick);
            }
            None
        }
        MouseEventKind::ScrollUp if state.search.is_open() => {
            state.results_scroll = state.results_scroll.saturating_sub(1);
            None
        }
        MouseEventKind::ScrollDown if state.search.is_open() => {
            state.results_scroll = state.results_scroll.saturating_add(1);
            None
        }
        _ => None,
    }
}

/// Pointer-enter pauses rotation, pointer-leave resumes it. Only the
/// transitions touch the carousel, so a stream of move events inside the
/// panel does not keep resetting the timer.
fn track_hover(state: &mut ViewState, layout: &AppLayout, column: u16, row: u16) {
    if state.carousel.is_none() {
        return;
    }
    let inside = announcement::contains(layout.announcement, column, row);
    if inside && !state.hovering_carousel {
        state.hovering_carousel = true;
        if let Some(carousel) = &mut state.carousel {
            carousel.pause();
        }
        state.rotation_reset = true;
    } else if !inside && state.hovering_carousel {
        state.hovering_carousel = false;
        if let Some(carousel) = &mut state.carousel {
            carousel.resume();
        }
        state.rotation_reset = true;
    }
}

fn handle_left_click(
    state: &mut ViewState,
    layout: &AppLayout,
    full_area: Rect,
    column: u16,
    row: u16,
) -> Option<UserCommand> {
    // Alert modal: any click acknowledges it.
    if state.alert.is_some() {
        state.alert = None;
        return None;
    }

    // Results overlay: the back button and everything outside the frame
    // close it; clicks inside the frame are inert.
    if state.search.is_open() {
        let overlay = overlay_rect(full_area);
        let back = search_results::back_button_rect(overlay);
        if announcement::contains(back, column, row) {
            state.close_results(CloseTrigger::BackButton);
        } else if !announcement::contains(overlay, column, row) {
            state.close_results(CloseTrigger::OverlayBackground);
        }
        return None;
    }

    // Indicator clicks jump the carousel.
    if let Some(carousel) = &state.carousel {
        if let Some(index) =
            announcement::indicator_hit(layout.announcement, carousel, column, row)
        {
            state.jump_carousel(index);
            return None;
        }
    }

    // Clicking the search box focuses the input.
    if announcement::contains(layout.search_bar, column, row) {
        state.input_mode = InputMode::SearchInput;
        return None;
    }

    // Category list selection.
    if announcement::contains(layout.category_nav, column, row) {
        if let Some(index) = directory::category_at(layout.category_nav, state.category_count(), row)
        {
            state.select_category(index);
        }
        return None;
    }

    // Site selection; clicking the already-selected site opens it.
    if announcement::contains(layout.sites, column, row) {
        let count = state.selected_sites().len();
        if let Some(index) = directory::site_at(layout.sites, count, row) {
            if index == state.selected_site {
                return state.selected_site_href().map(UserCommand::OpenUrl);
            }
            state.select_site(index);
        }
        return None;
    }

    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
