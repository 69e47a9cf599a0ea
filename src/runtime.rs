//! # Navigator Runtime
//!
//! Confines one `ScreenNavigator` and its `SurfaceBoard` to a single tokio
//! task. Callers hold a [`NavigatorHandle`]: commands go in over an mpsc
//! channel, snapshots come out over a watch channel. Nothing outside the
//! task ever touches the navigator, so overlapping requests from any thread
//! are serialized in arrival order.
//!
//! The task sleeps until the next command or the next timer deadline,
//! whichever comes first.

use log::{debug, info, warn};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, sleep_until};

use crate::core::action::Command;
use crate::core::navigator::{ScreenNavigator, Timing};
use crate::core::registry::ScreenRegistry;
use crate::core::state::NavigatorView;
use crate::core::surface::SurfaceBoard;

pub struct NavigatorHandle {
    commands: mpsc::UnboundedSender<Command>,
    view: watch::Receiver<NavigatorView>,
    task: JoinHandle<()>,
}

impl NavigatorHandle {
    /// Queue a command. Never blocks; a dead task is logged and ignored.
    pub fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            warn!("Navigator task is gone; dropping command");
        }
    }

    pub fn open_app(&self, target: &str) {
        self.send(Command::OpenApp(target.to_string()));
    }

    pub fn go_home(&self) {
        self.send(Command::GoHome);
    }

    /// Latest published snapshot.
    pub fn view(&self) -> NavigatorView {
        self.view.borrow().clone()
    }

    /// The latest snapshot, only if it changed since the last poll.
    pub fn poll_view(&mut self) -> Option<NavigatorView> {
        match self.view.has_changed() {
            Ok(true) => Some(self.view.borrow_and_update().clone()),
            _ => None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<NavigatorView> {
        self.view.clone()
    }

    /// Close the command channel and wait for the task to finish.
    pub async fn shutdown(self) {
        let Self { commands, task, .. } = self;
        drop(commands);
        if let Err(e) = task.await {
            warn!("Navigator task ended abnormally: {}", e);
        }
    }
}

/// Start a navigator on the home screen and hand back its handle.
///
/// Must be called from inside a tokio runtime.
pub fn spawn(registry: &ScreenRegistry, timing: Timing) -> NavigatorHandle {
    let origin = Instant::now();
    let mut board = SurfaceBoard::from_registry(registry);
    let mut navigator = ScreenNavigator::new(registry.home(), timing);
    navigator.start(0, &mut board);
    log_events(&mut navigator);

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (view_tx, view_rx) = watch::channel(NavigatorView::capture(&navigator, &board));

    info!("Spawning navigator task ({:?})", timing);
    let task = tokio::spawn(drive(navigator, board, origin, command_rx, view_tx));

    NavigatorHandle {
        commands: command_tx,
        view: view_rx,
        task,
    }
}

async fn drive(
    mut navigator: ScreenNavigator,
    mut board: SurfaceBoard,
    origin: Instant,
    mut commands: mpsc::UnboundedReceiver<Command>,
    view: watch::Sender<NavigatorView>,
) {
    loop {
        let wake = navigator
            .next_deadline()
            .and_then(|ms| origin.checked_add(Duration::from_millis(ms)));

        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else {
                    debug!("Command channel closed, navigator task exiting");
                    break;
                };
                let now = elapsed_ms(origin);
                match command {
                    Command::OpenApp(target) => navigator.open_app(&target, now, &mut board),
                    Command::GoHome => navigator.go_home(now, &mut board),
                }
            }
            _ = sleep_until(wake.unwrap_or(origin)), if wake.is_some() => {
                navigator.tick(elapsed_ms(origin), &mut board);
            }
        }

        log_events(&mut navigator);
        view.send_replace(NavigatorView::capture(&navigator, &board));
    }
}

fn elapsed_ms(origin: Instant) -> u64 {
    whole_millis(origin.elapsed())
}

fn whole_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn log_events(navigator: &mut ScreenNavigator) {
    for event in navigator.drain_events() {
        debug!("Navigator event: {:?}", event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::navigator::Phase;
    use crate::test_support::test_registry;

    #[test]
    fn test_whole_millis_clamps() {
        assert_eq!(whole_millis(Duration::from_millis(1_500)), 1_500);
        assert_eq!(whole_millis(Duration::MAX), u64::MAX);
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_view_is_home() {
        let handle = spawn(&test_registry(), Timing::default());
        let view = handle.view();
        assert_eq!(view.current, "home");
        assert_eq!(view.board.active_screens(), vec!["home"]);
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_waits_for_transition_delay() {
        let handle = spawn(&test_registry(), Timing::default());
        let mut rx = handle.subscribe();
        let start = Instant::now();

        handle.open_app("about");
        let view = (*rx.wait_for(|v| v.current == "about").await.unwrap()).clone();

        assert!(start.elapsed() >= Duration::from_millis(150));
        assert_eq!(view.board.active_screens(), vec!["about"]);
        assert_eq!(view.phase, Phase::Idle);
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_observed_between_phases() {
        let handle = spawn(&test_registry(), Timing::default());
        let mut rx = handle.subscribe();

        handle.open_app("about");
        let view = (*rx.wait_for(|v| v.in_transition()).await.unwrap()).clone();
        assert!(view.board.active_screens().is_empty());
        assert_eq!(view.current, "home");
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stagger_completes() {
        let handle = spawn(&test_registry(), Timing::default());
        let mut rx = handle.subscribe();

        handle.open_app("about");
        let view = (*rx
            .wait_for(|v| v.current == "about" && v.settled)
            .await
            .unwrap())
        .clone();
        assert_eq!(view.board.revealed_count("about"), 3);
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_command_wins() {
        let handle = spawn(&test_registry(), Timing::default());
        let mut rx = handle.subscribe();

        handle.open_app("about");
        handle.open_app("projects");
        let view = (*rx
            .wait_for(|v| v.current != "home" && v.settled)
            .await
            .unwrap())
        .clone();
        assert_eq!(view.current, "projects");
        assert!(!view.board.is_active("about"));
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_view_reports_changes_once() {
        let mut handle = spawn(&test_registry(), Timing::default());
        let mut rx = handle.subscribe();

        handle.go_home();
        // Going home from home changes nothing visible, but a frame is still published.
        rx.changed().await.unwrap();
        assert!(handle.poll_view().is_some());
        assert!(handle.poll_view().is_none());
        handle.shutdown().await;
    }
}
