//! # Navigation Scripts
//!
//! Runs a list of timed commands against a fresh navigator on a virtual
//! clock and returns every event it produced. Backs `--mode trace` and
//! makes timelines easy to assert on.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::action::Command;
use crate::core::navigator::{NavEvent, ScreenNavigator, Timing};
use crate::core::registry::ScreenRegistry;
use crate::core::surface::SurfaceBoard;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub at_ms: u64,
    #[serde(flatten)]
    pub command: Command,
}

impl ScriptStep {
    pub fn new(at_ms: u64, command: Command) -> Self {
        Self { at_ms, command }
    }
}

/// Evenly spaced steps: target `i` fires at `(i + 1) * gap_ms`.
pub fn spaced(targets: &[String], home: &str, gap_ms: u64) -> Vec<ScriptStep> {
    targets
        .iter()
        .enumerate()
        .map(|(i, t)| ScriptStep::new((i as u64 + 1) * gap_ms, Command::parse(t, home)))
        .collect()
}

/// Start at 0, apply each step at its time (stable by `at_ms`), then let
/// every remaining timer fire.
pub fn run_script(registry: &ScreenRegistry, timing: Timing, steps: &[ScriptStep]) -> Vec<NavEvent> {
    let mut board = SurfaceBoard::from_registry(registry);
    let mut navigator = ScreenNavigator::new(registry.home(), timing);
    let mut events = Vec::new();

    navigator.start(0, &mut board);
    events.extend(navigator.drain_events());

    let mut ordered: Vec<&ScriptStep> = steps.iter().collect();
    ordered.sort_by_key(|s| s.at_ms);

    for step in ordered {
        debug!("Script step at {}ms: {:?}", step.at_ms, step.command);
        navigator.tick(step.at_ms, &mut board);
        match &step.command {
            Command::OpenApp(target) => navigator.open_app(target, step.at_ms, &mut board),
            Command::GoHome => navigator.go_home(step.at_ms, &mut board),
        }
        events.extend(navigator.drain_events());
    }

    while let Some(deadline) = navigator.next_deadline() {
        navigator.tick(deadline, &mut board);
    }
    events.extend(navigator.drain_events());
    events
}
