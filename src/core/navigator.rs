//! # Screen Navigator
//!
//! Owns which screen is showing and sequences the switch between screens.
//!
//! ```text
//!            open_app(b)                       tick(t ≥ t0 + delay)
//!   Idle ───────────────▶ TransitioningTo(b) ─────────────────────▶ Idle
//!    ▲  exit: a leaving,      │   ▲                 enter: b active,
//!    │  a inactive            │   │ open_app(c):    current = b,
//!    │                        └───┘ supersede       stagger b's content
//!    └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Between exit and enter no surface is active; the presentation uses that
//! window for its fade. Overlapping calls follow "last call wins": a new
//! target cancels the pending enter and restarts the delay.
//!
//! Time is caller-supplied milliseconds. Every operation takes the
//! presentation explicitly; the navigator holds no reference to it.

use log::{debug, info, warn};
use serde::Serialize;

use crate::core::surface::Presentation;
use crate::core::timer::TimerQueue;

pub const DEFAULT_TRANSITION_DELAY_MS: u64 = 150;
pub const DEFAULT_STAGGER_INTERVAL_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Timing {
    /// Wait between a screen's exit and the next screen's entry.
    pub transition_delay_ms: u64,
    /// Offset between consecutive content reveals.
    pub stagger_interval_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            transition_delay_ms: DEFAULT_TRANSITION_DELAY_MS,
            stagger_interval_ms: DEFAULT_STAGGER_INTERVAL_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", content = "target", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    TransitioningTo(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// Target is the screen already showing.
    AlreadyCurrent,
    /// Target is the screen already being transitioned to.
    AlreadyPending,
    /// The presentation has no surface for the target.
    UnknownScreen,
    /// The presentation lost the current screen's surface.
    DetachedCurrent,
}

/// Everything observable the navigator does, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NavEvent {
    Started { screen: String, at_ms: u64 },
    Ignored { target: String, reason: IgnoreReason, at_ms: u64 },
    ExitStarted { from: String, to: String, at_ms: u64 },
    Superseded { abandoned: String, target: String, at_ms: u64 },
    Committed { from: String, to: String, at_ms: u64 },
    Revealed { screen: String, index: usize, at_ms: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Task {
    Enter { target: String },
    Reveal { screen: String, index: usize },
}

pub struct ScreenNavigator {
    home: String,
    current: String,
    phase: Phase,
    timing: Timing,
    timers: TimerQueue<Task>,
    events: Vec<NavEvent>,
}

impl ScreenNavigator {
    pub fn new(home: &str, timing: Timing) -> Self {
        Self {
            home: home.to_string(),
            current: home.to_string(),
            phase: Phase::Idle,
            timing,
            timers: TimerQueue::new(),
            events: Vec::new(),
        }
    }

    pub fn current_screen(&self) -> &str {
        &self.current
    }

    pub fn home(&self) -> &str {
        &self.home
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Where the navigator is headed: the pending target mid-transition,
    /// otherwise the current screen.
    pub fn destination(&self) -> &str {
        match &self.phase {
            Phase::Idle => &self.current,
            Phase::TransitioningTo(target) => target,
        }
    }

    /// Deadline of the next scheduled task, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// True once no enter or reveal is pending.
    pub fn is_settled(&self) -> bool {
        self.timers.is_empty()
    }

    /// Events since the last drain.
    pub fn drain_events(&mut self) -> Vec<NavEvent> {
        std::mem::take(&mut self.events)
    }

    /// Show the home screen and cascade its launchers in. This is the only
    /// time they cascade; later returns home show them all at once.
    pub fn start<P: Presentation>(&mut self, now: u64, presentation: &mut P) {
        let Some(surface) = presentation.resolve_screen_surface(&self.current) else {
            warn!("Home screen '{}' has no surface; nothing shown", self.current);
            return;
        };
        presentation.set_active(&surface, true);
        presentation.set_leaving(&surface, false);
        info!("Navigator started on '{}'", self.current);
        self.events.push(NavEvent::Started {
            screen: self.current.clone(),
            at_ms: now,
        });
        let screen = self.current.clone();
        self.stagger(&screen, &surface, now, presentation);
        self.tick(now, presentation);
    }

    /// Switch to `target`. Unknown targets and the screen already showing
    /// are ignored without touching the presentation.
    pub fn open_app<P: Presentation>(&mut self, target: &str, now: u64, presentation: &mut P) {
        // Let anything already due land first, so "now" means now.
        self.tick(now, presentation);

        if target == self.destination() {
            let reason = match self.phase {
                Phase::Idle => IgnoreReason::AlreadyCurrent,
                Phase::TransitioningTo(_) => IgnoreReason::AlreadyPending,
            };
            debug!("Ignoring open_app('{}'): {:?}", target, reason);
            self.ignore(target, reason, now);
            return;
        }

        if presentation.resolve_screen_surface(target).is_none() {
            warn!("Ignoring open_app('{}'): no such screen", target);
            self.ignore(target, IgnoreReason::UnknownScreen, now);
            return;
        }

        match std::mem::replace(&mut self.phase, Phase::TransitioningTo(target.to_string())) {
            Phase::Idle => {
                let Some(leaving) = presentation.resolve_screen_surface(&self.current) else {
                    warn!("Current screen '{}' has no surface", self.current);
                    self.phase = Phase::Idle;
                    self.ignore(target, IgnoreReason::DetachedCurrent, now);
                    return;
                };
                presentation.set_leaving(&leaving, true);
                presentation.set_active(&leaving, false);

                let current = self.current.clone();
                self.timers
                    .retain(|t| !matches!(t, Task::Reveal { screen, .. } if *screen == current));

                debug!("Exit '{}' -> '{}' at {}ms", self.current, target, now);
                self.events.push(NavEvent::ExitStarted {
                    from: current,
                    to: target.to_string(),
                    at_ms: now,
                });
            }
            Phase::TransitioningTo(abandoned) => {
                self.timers.retain(|t| !matches!(t, Task::Enter { .. }));
                info!("Transition to '{}' superseded by '{}'", abandoned, target);
                self.events.push(NavEvent::Superseded {
                    abandoned,
                    target: target.to_string(),
                    at_ms: now,
                });
            }
        }

        self.timers.schedule(
            now.saturating_add(self.timing.transition_delay_ms),
            Task::Enter {
                target: target.to_string(),
            },
        );
    }

    pub fn go_home<P: Presentation>(&mut self, now: u64, presentation: &mut P) {
        let home = self.home.clone();
        self.open_app(&home, now, presentation);
    }

    /// Fire every task due at or before `now`. Each task runs at its own
    /// deadline, so a late tick still lays reveals out on the exact grid.
    pub fn tick<P: Presentation>(&mut self, now: u64, presentation: &mut P) {
        while let Some((at, task)) = self.timers.pop_due(now) {
            match task {
                Task::Enter { target } => self.enter(target, at, presentation),
                Task::Reveal { screen, index } => self.reveal(screen, index, at, presentation),
            }
        }
    }

    fn enter<P: Presentation>(&mut self, target: String, at: u64, presentation: &mut P) {
        self.phase = Phase::Idle;
        let Some(surface) = presentation.resolve_screen_surface(&target) else {
            warn!("Screen '{}' vanished before it could be entered", target);
            return;
        };
        presentation.set_active(&surface, true);
        presentation.set_leaving(&surface, false);

        let from = std::mem::replace(&mut self.current, target.clone());
        info!("Committed '{}' -> '{}' at {}ms", from, target, at);
        self.events.push(NavEvent::Committed {
            from,
            to: target.clone(),
            at_ms: at,
        });
        if target == self.home {
            // Launchers cascade once, at start. Coming back home shows them all.
            for element in presentation.list_animatable_content(&surface) {
                presentation.reveal_content_element(&element);
            }
        } else {
            self.stagger(&target, &surface, at, presentation);
        }
    }

    fn stagger<P: Presentation>(
        &mut self,
        screen: &str,
        surface: &P::Surface,
        zero: u64,
        presentation: &mut P,
    ) {
        let elements = presentation.list_animatable_content(surface);
        for element in &elements {
            presentation.hide_content_element(element);
        }
        for index in 0..elements.len() {
            self.timers.schedule(
                zero.saturating_add((index as u64).saturating_mul(self.timing.stagger_interval_ms)),
                Task::Reveal {
                    screen: screen.to_string(),
                    index,
                },
            );
        }
    }

    fn reveal<P: Presentation>(&mut self, screen: String, index: usize, at: u64, presentation: &mut P) {
        let element = presentation
            .resolve_screen_surface(&screen)
            .and_then(|s| presentation.list_animatable_content(&s).into_iter().nth(index));
        if let Some(element) = element {
            presentation.reveal_content_element(&element);
            self.events.push(NavEvent::Revealed {
                screen,
                index,
                at_ms: at,
            });
        }
    }

    fn ignore(&mut self, target: &str, reason: IgnoreReason, now: u64) {
        self.events.push(NavEvent::Ignored {
            target: target.to_string(),
            reason,
            at_ms: now,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::surface::{SurfaceBoard, SurfaceOp};
    use crate::test_support::{started, test_registry};

    #[test]
    fn test_start_activates_home_and_cascades_launchers() {
        let registry = test_registry();
        let mut board = SurfaceBoard::from_registry(&registry);
        let mut nav = ScreenNavigator::new("home", Timing::default());
        nav.start(0, &mut board);

        assert_eq!(board.active_screens(), vec!["home"]);
        // Launcher 0 is revealed immediately, the rest wait their turn.
        assert!(board.is_revealed("home", 0));
        assert!(!board.is_revealed("home", 1));

        nav.tick(100, &mut board);
        assert!(board.is_revealed("home", 1));
        assert!(!nav.is_settled());

        nav.tick(200, &mut board);
        assert_eq!(board.revealed_count("home"), 3);
        assert!(nav.is_settled());
    }

    #[test]
    fn test_open_current_is_noop() {
        let (mut nav, mut board) = started();
        board.take_journal();
        nav.drain_events();

        nav.open_app("home", 1_000, &mut board);

        assert_eq!(nav.current_screen(), "home");
        assert!(board.take_journal().is_empty());
        assert!(nav.is_settled());
        assert_eq!(
            nav.drain_events(),
            vec![NavEvent::Ignored {
                target: "home".into(),
                reason: IgnoreReason::AlreadyCurrent,
                at_ms: 1_000
            }]
        );
    }

    #[test]
    fn test_open_unknown_is_noop() {
        let (mut nav, mut board) = started();
        board.take_journal();

        nav.open_app("nonexistent", 1_000, &mut board);

        assert_eq!(nav.current_screen(), "home");
        assert_eq!(nav.phase(), &Phase::Idle);
        assert!(board.take_journal().is_empty());
        assert_eq!(board.active_screens(), vec!["home"]);
    }

    #[test]
    fn test_exit_removes_active_before_enter_adds_it() {
        let (mut nav, mut board) = started();
        board.take_journal();

        nav.open_app("about", 1_000, &mut board);
        nav.tick(1_150, &mut board);

        let journal = board.take_journal();
        assert_eq!(
            &journal[..4],
            &[
                SurfaceOp::SetLeaving { screen: "home".into(), leaving: true },
                SurfaceOp::SetActive { screen: "home".into(), active: false },
                SurfaceOp::SetActive { screen: "about".into(), active: true },
                SurfaceOp::SetLeaving { screen: "about".into(), leaving: false },
            ]
        );
    }

    #[test]
    fn test_transient_window_has_no_active_screen() {
        let (mut nav, mut board) = started();

        nav.open_app("about", 1_000, &mut board);
        assert!(board.active_screens().is_empty());
        assert!(board.is_leaving("home"));

        nav.tick(1_149, &mut board);
        assert!(board.active_screens().is_empty());
        assert_eq!(nav.current_screen(), "home");
        assert_eq!(nav.phase(), &Phase::TransitioningTo("about".into()));

        nav.tick(1_150, &mut board);
        assert_eq!(board.active_screens(), vec!["about"]);
        assert_eq!(nav.current_screen(), "about");
        assert_eq!(nav.phase(), &Phase::Idle);
    }

    #[test]
    fn test_stagger_reveals_on_interval_grid() {
        let (mut nav, mut board) = started();
        nav.drain_events();

        nav.open_app("about", 1_000, &mut board);
        // One late tick should still place every reveal on its own slot.
        nav.tick(5_000, &mut board);

        let reveals: Vec<(usize, u64)> = nav
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                NavEvent::Revealed { screen, index, at_ms } if screen == "about" => Some((index, at_ms)),
                _ => None,
            })
            .collect();
        assert_eq!(reveals, vec![(0, 1_150), (1, 1_250), (2, 1_350)]);
        assert_eq!(board.revealed_count("about"), 3);
    }

    #[test]
    fn test_content_hidden_until_its_slot() {
        let (mut nav, mut board) = started();
        nav.open_app("about", 0, &mut board);

        nav.tick(150, &mut board);
        assert!(board.is_revealed("about", 0));
        assert!(!board.is_revealed("about", 1));
        assert!(!board.is_revealed("about", 2));

        nav.tick(250, &mut board);
        assert!(board.is_revealed("about", 1));
        assert!(!board.is_revealed("about", 2));
    }

    #[test]
    fn test_return_home_keeps_launchers_revealed() {
        let (mut nav, mut board) = started();
        nav.open_app("about", 1_000, &mut board);
        nav.tick(2_000, &mut board);
        nav.drain_events();

        nav.go_home(3_000, &mut board);
        nav.tick(3_150, &mut board);
        assert_eq!(board.active_screens(), vec!["home"]);
        assert_eq!(board.revealed_count("home"), 3);
        assert!(nav.is_settled());
        assert!(!nav.drain_events().iter().any(|e| matches!(e, NavEvent::Revealed { .. })));
    }

    #[test]
    fn test_home_interrupted_during_start_is_complete_on_return() {
        let registry = test_registry();
        let mut board = SurfaceBoard::from_registry(&registry);
        let mut nav = ScreenNavigator::new("home", Timing::default());
        nav.start(0, &mut board);
        nav.open_app("about", 50, &mut board);
        nav.tick(1_000, &mut board);
        assert_eq!(board.revealed_count("home"), 1);

        nav.go_home(1_000, &mut board);
        nav.tick(1_150, &mut board);
        assert_eq!(board.revealed_count("home"), 3);
    }

    #[test]
    fn test_huge_delays_saturate_instead_of_overflowing() {
        let registry = test_registry();
        let mut board = SurfaceBoard::from_registry(&registry);
        let timing = Timing {
            transition_delay_ms: u64::MAX,
            stagger_interval_ms: u64::MAX,
        };
        let mut nav = ScreenNavigator::new("home", timing);
        nav.start(0, &mut board);
        assert_eq!(nav.next_deadline(), Some(u64::MAX));

        nav.open_app("about", 1_000, &mut board);
        assert_eq!(nav.next_deadline(), Some(u64::MAX));
        nav.tick(u64::MAX, &mut board);
        assert_eq!(nav.current_screen(), "about");
        assert!(board.is_revealed("about", 0));
        // Every later reveal lands on the same saturated deadline.
        assert!(nav.is_settled());
        assert_eq!(board.revealed_count("about"), 3);
    }

    #[test]
    fn test_go_home_returns_after_delay() {
        let (mut nav, mut board) = started();
        nav.open_app("projects", 1_000, &mut board);
        nav.tick(2_000, &mut board);

        nav.go_home(3_000, &mut board);
        nav.tick(3_149, &mut board);
        assert_eq!(nav.current_screen(), "projects");
        nav.tick(3_150, &mut board);
        assert_eq!(nav.current_screen(), "home");
        assert_eq!(board.active_screens(), vec!["home"]);
    }

    #[test]
    fn test_overlapping_calls_last_wins() {
        let (mut nav, mut board) = started();
        nav.drain_events();

        nav.open_app("about", 1_000, &mut board);
        nav.open_app("projects", 1_100, &mut board);

        // The first enter would have fired here; it was cancelled.
        nav.tick(1_150, &mut board);
        assert!(board.active_screens().is_empty());

        nav.tick(1_250, &mut board);
        assert_eq!(nav.current_screen(), "projects");
        assert_eq!(board.active_screens(), vec!["projects"]);

        let commits: Vec<NavEvent> = nav
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, NavEvent::Committed { .. } | NavEvent::Superseded { .. }))
            .collect();
        assert_eq!(
            commits,
            vec![
                NavEvent::Superseded {
                    abandoned: "about".into(),
                    target: "projects".into(),
                    at_ms: 1_100
                },
                NavEvent::Committed {
                    from: "home".into(),
                    to: "projects".into(),
                    at_ms: 1_250
                },
            ]
        );
    }

    #[test]
    fn test_repeat_of_pending_target_is_ignored() {
        let (mut nav, mut board) = started();
        nav.open_app("about", 1_000, &mut board);
        nav.drain_events();

        nav.open_app("about", 1_100, &mut board);
        assert_eq!(
            nav.drain_events(),
            vec![NavEvent::Ignored {
                target: "about".into(),
                reason: IgnoreReason::AlreadyPending,
                at_ms: 1_100
            }]
        );
        // The original deadline stands.
        nav.tick(1_150, &mut board);
        assert_eq!(nav.current_screen(), "about");
    }

    #[test]
    fn test_returning_to_origin_mid_transition() {
        let (mut nav, mut board) = started();
        nav.open_app("about", 1_000, &mut board);
        nav.go_home(1_050, &mut board);
        nav.tick(1_200, &mut board);

        assert_eq!(nav.current_screen(), "home");
        assert_eq!(board.active_screens(), vec!["home"]);
        assert!(!board.is_leaving("home"));
        assert!(!board.is_active("about"));
    }

    #[test]
    fn test_unknown_target_mid_transition_keeps_pending() {
        let (mut nav, mut board) = started();
        nav.open_app("about", 1_000, &mut board);
        nav.open_app("typo", 1_050, &mut board);
        nav.tick(1_150, &mut board);
        assert_eq!(nav.current_screen(), "about");
    }

    #[test]
    fn test_leaving_cancels_pending_reveals() {
        let (mut nav, mut board) = started();
        nav.open_app("about", 1_000, &mut board);
        nav.tick(1_150, &mut board);
        assert!(!board.is_revealed("about", 2));

        nav.go_home(1_160, &mut board);
        nav.tick(10_000, &mut board);

        assert!(!board.is_revealed("about", 2));
        assert_eq!(nav.current_screen(), "home");
        assert!(nav.is_settled());
    }

    #[test]
    fn test_exactly_one_active_after_many_transitions() {
        let registry = test_registry();
        let (mut nav, mut board) = started();
        let mut now = 1_000;
        for target in ["about", "projects", "home", "projects", "about", "home"] {
            nav.open_app(target, now, &mut board);
            now += 1_000;
            nav.tick(now, &mut board);
            let active = board.active_screens();
            assert_eq!(active, vec![target]);
            assert!(registry.contains(active[0]));
        }
    }
}
