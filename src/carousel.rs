// Announcement carousel: timed rotation through a fixed list with manual
// override and hover-pause.
//
// `Carousel` is a plain state object; rendering derives from it and the
// scheduling side lives in `RotationTimer`. The timer is a single owned
// handle: pause, resume, and jump all go through `RotationTimer::sync`,
// which drops the previous interval before (maybe) creating a new one, so
// two live rotation timers cannot exist for one carousel.

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior};

use crate::directory::{Announcement, AnnouncementConfig};

// ---------------------------------------------------------------------------
// Carousel
// ---------------------------------------------------------------------------

/// Rotation state over an ordered, immutable-for-session announcement list.
///
/// Invariant: `current < announcements.len()` whenever the carousel exists;
/// an empty list never constructs a carousel in the first place.
#[derive(Debug, Clone)]
pub struct Carousel {
    announcements: Vec<Announcement>,
    current: usize,
    interval: Duration,
    paused: bool,
}

impl Carousel {
    /// Build a carousel from the document's announcement config.
    ///
    /// Returns `None` for an empty announcement list: the panel (indicators
    /// included) is simply not rendered, which is a no-render state rather
    /// than an error.
    pub fn from_config(config: &AnnouncementConfig) -> Option<Carousel> {
        if config.announcements.is_empty() {
            return None;
        }
        Some(Carousel {
            announcements: config.announcements.clone(),
            current: 0,
            interval: config.rotation_interval(),
            paused: false,
        })
    }

    pub fn len(&self) -> usize {
        self.announcements.len()
    }

    pub fn is_empty(&self) -> bool {
        // A constructed carousel is never empty; kept for API symmetry.
        self.announcements.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &Announcement {
        &self.announcements[self.current]
    }

    pub fn announcements(&self) -> &[Announcement] {
        &self.announcements
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advance to the next announcement, wrapping at the end.
    pub fn advance(&mut self) -> usize {
        self.current = (self.current + 1) % self.announcements.len();
        self.current
    }

    /// Explicit selection (indicator click / number key). Returns false and
    /// leaves the state untouched when the index is out of range. The caller
    /// must re-sync the rotation timer so the next auto-advance is a full
    /// interval later.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.announcements.len() {
            return false;
        }
        self.current = index;
        true
    }

    /// Pointer entered the carousel region: stop rotating.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Pointer left the carousel region: rotation restarts from zero.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Whether a rotation timer should be live right now. Single-item lists
    /// never rotate.
    pub fn rotation_due(&self) -> bool {
        self.announcements.len() > 1 && !self.paused
    }

    /// Indicators are only rendered for multi-item lists.
    pub fn show_indicators(&self) -> bool {
        self.announcements.len() > 1
    }

    /// Active flag per indicator; exactly one is set.
    pub fn indicator_states(&self) -> Vec<bool> {
        (0..self.announcements.len())
            .map(|i| i == self.current)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// RotationTimer
// ---------------------------------------------------------------------------

/// The one live rotation handle for a carousel.
///
/// `sync` drops any previous interval first, so the clear-then-recreate
/// ordering the scheduling model requires is structural rather than a
/// calling convention.
#[derive(Debug, Default)]
pub struct RotationTimer {
    interval: Option<Interval>,
}

impl RotationTimer {
    pub fn new() -> Self {
        RotationTimer { interval: None }
    }

    /// Rebuild the timer from carousel state: live with a full interval
    /// ahead when rotation is due, cleared otherwise.
    pub fn sync(&mut self, carousel: &Carousel) {
        self.interval = None;
        if carousel.rotation_due() {
            let period = carousel.interval();
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            self.interval = Some(interval);
        }
    }

    pub fn clear(&mut self) {
        self.interval = None;
    }

    pub fn is_active(&self) -> bool {
        self.interval.is_some()
    }

    /// Completes on the next rotation tick; pends forever while cleared so
    /// it can sit in a `tokio::select!` arm unconditionally.
    pub async fn tick(&mut self) {
        match &mut self.interval {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
