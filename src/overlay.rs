use std::time::{Duration, Instant};

/// Time between a close request and the overlay disappearing. Matches the
/// fade-out animation.
pub const CLOSE_DELAY: Duration = Duration::from_millis(280);

/// Longest gap between repaints while the close animation runs.
pub const ANIMATION_FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    About,
    Socials,
    Projects,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::About, Section::Socials, Section::Projects];

    /// Label of the navigation button that opens this section.
    pub fn nav_label(self) -> &'static str {
        match self {
            Section::About => "ABOUT ME",
            Section::Socials => "SOCIALS",
            Section::Projects => "PROJECTS",
        }
    }

    /// Heading shown at the top of the panel.
    pub fn title(self) -> &'static str {
        match self {
            Section::About => "About Me",
            Section::Socials => "Socials",
            Section::Projects => "Projects",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::About => write!(f, "about"),
            Section::Socials => write!(f, "socials"),
            Section::Projects => write!(f, "projects"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Closed,
    Open(Section),
    Closing { section: Section, since: Instant },
}

/// Open/close lifecycle of the panel overlay.
///
/// All inputs carry the current time so the close delay can be driven by the
/// frame loop and by tests alike.
#[derive(Debug, Clone)]
pub struct OverlayController {
    state: OverlayState,
}

impl Default for OverlayController {
    fn default() -> Self {
        Self {
            state: OverlayState::Closed,
        }
    }
}

impl OverlayController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn section(&self) -> Option<Section> {
        match self.state {
            OverlayState::Closed => None,
            OverlayState::Open(section) | OverlayState::Closing { section, .. } => Some(section),
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self.state, OverlayState::Closed)
    }

    pub fn is_closing(&self) -> bool {
        matches!(self.state, OverlayState::Closing { .. })
    }

    /// Show `section`. Ignored while a close is in progress. Returns whether
    /// the state changed.
    pub fn open(&mut self, section: Section) -> bool {
        match self.state {
            OverlayState::Closing { .. } => {
                tracing::debug!(%section, "open ignored while closing");
                false
            }
            OverlayState::Open(current) if current == section => false,
            _ => {
                tracing::debug!(%section, "overlay opened");
                self.state = OverlayState::Open(section);
                true
            }
        }
    }

    /// Start the close animation. Only an open overlay reacts; repeated
    /// requests while closing keep the original deadline.
    pub fn request_close(&mut self, now: Instant) -> bool {
        match self.state {
            OverlayState::Open(section) => {
                tracing::debug!(%section, "overlay closing");
                self.state = OverlayState::Closing {
                    section,
                    since: now,
                };
                true
            }
            _ => false,
        }
    }

    /// A click landed on the overlay. Clicks contained in the panel never
    /// close it.
    pub fn backdrop_clicked(&mut self, inside_panel: bool, now: Instant) -> bool {
        if inside_panel {
            return false;
        }
        self.request_close(now)
    }

    /// Finish a pending close once the delay has elapsed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let OverlayState::Closing { section, since } = self.state {
            if now.saturating_duration_since(since) >= CLOSE_DELAY {
                tracing::debug!(%section, "overlay closed");
                self.state = OverlayState::Closed;
                return true;
            }
        }
        false
    }

    /// Time left until a pending close completes.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match self.state {
            OverlayState::Closing { since, .. } => {
                Some(CLOSE_DELAY.saturating_sub(now.saturating_duration_since(since)))
            }
            _ => None,
        }
    }

    /// When the frame loop should wake up next: one animation frame away, or
    /// sooner if the close completes first. `None` when nothing is pending.
    pub fn next_repaint(&self, now: Instant) -> Option<Duration> {
        self.remaining(now).map(|left| left.min(ANIMATION_FRAME))
    }

    /// Fraction of the close animation played so far, `0.0` when not closing.
    pub fn close_progress(&self, now: Instant) -> f32 {
        match self.remaining(now) {
            Some(left) => 1.0 - left.as_secs_f32() / CLOSE_DELAY.as_secs_f32(),
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        let ctl = OverlayController::new();
        assert_eq!(ctl.state(), OverlayState::Closed);
        assert!(!ctl.is_visible());
        assert_eq!(ctl.section(), None);
    }

    #[test]
    fn close_cycle_takes_exactly_the_delay() {
        let t0 = Instant::now();
        let mut ctl = OverlayController::new();
        assert!(ctl.open(Section::Socials));
        assert!(ctl.request_close(t0));
        assert!(ctl.is_visible());
        assert!(ctl.is_closing());
        assert_eq!(ctl.section(), Some(Section::Socials));

        assert!(!ctl.tick(t0 + CLOSE_DELAY - Duration::from_millis(1)));
        assert!(ctl.is_closing());
        assert!(ctl.tick(t0 + CLOSE_DELAY));
        assert_eq!(ctl.state(), OverlayState::Closed);
        assert_eq!(ctl.section(), None);
    }

    #[test]
    fn second_close_request_keeps_deadline() {
        let t0 = Instant::now();
        let mut ctl = OverlayController::new();
        ctl.open(Section::About);
        ctl.request_close(t0);
        assert!(!ctl.request_close(t0 + Duration::from_millis(200)));
        assert!(ctl.tick(t0 + CLOSE_DELAY));
    }

    #[test]
    fn open_is_ignored_while_closing() {
        let t0 = Instant::now();
        let mut ctl = OverlayController::new();
        ctl.open(Section::About);
        ctl.request_close(t0);
        assert!(!ctl.open(Section::Projects));
        assert_eq!(ctl.section(), Some(Section::About));
        ctl.tick(t0 + CLOSE_DELAY);
        assert!(ctl.open(Section::Projects));
        assert_eq!(ctl.state(), OverlayState::Open(Section::Projects));
    }

    #[test]
    fn open_switches_sections() {
        let mut ctl = OverlayController::new();
        ctl.open(Section::About);
        assert!(ctl.open(Section::Socials));
        assert!(!ctl.open(Section::Socials));
        assert_eq!(ctl.section(), Some(Section::Socials));
    }

    #[test]
    fn close_while_closed_does_nothing() {
        let mut ctl = OverlayController::new();
        assert!(!ctl.request_close(Instant::now()));
        assert!(!ctl.tick(Instant::now()));
    }

    #[test]
    fn backdrop_click_respects_containment() {
        let t0 = Instant::now();
        let mut ctl = OverlayController::new();
        ctl.open(Section::Projects);
        assert!(!ctl.backdrop_clicked(true, t0));
        assert_eq!(ctl.state(), OverlayState::Open(Section::Projects));
        assert!(ctl.backdrop_clicked(false, t0));
        assert!(ctl.is_closing());
    }

    #[test]
    fn progress_and_remaining_track_the_timer() {
        let t0 = Instant::now();
        let mut ctl = OverlayController::new();
        assert_eq!(ctl.close_progress(t0), 0.0);
        assert_eq!(ctl.remaining(t0), None);
        ctl.open(Section::About);
        ctl.request_close(t0);
        assert_eq!(ctl.remaining(t0), Some(CLOSE_DELAY));
        let half = t0 + CLOSE_DELAY / 2;
        assert!((ctl.close_progress(half) - 0.5).abs() < 0.01);
        assert_eq!(ctl.remaining(t0 + Duration::from_secs(1)), Some(Duration::ZERO));
    }

    #[test]
    fn repaint_is_scheduled_only_while_closing() {
        let t0 = Instant::now();
        let mut ctl = OverlayController::new();
        assert_eq!(ctl.next_repaint(t0), None);
        ctl.open(Section::About);
        assert_eq!(ctl.next_repaint(t0), None);
        ctl.request_close(t0);
        assert_eq!(ctl.next_repaint(t0), Some(ANIMATION_FRAME));
        let near_end = t0 + CLOSE_DELAY - Duration::from_millis(5);
        assert_eq!(ctl.next_repaint(near_end), Some(Duration::from_millis(5)));
        ctl.tick(t0 + CLOSE_DELAY);
        assert_eq!(ctl.next_repaint(t0 + CLOSE_DELAY), None);
    }
}
