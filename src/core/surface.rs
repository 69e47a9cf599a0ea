//! # Presentation Seam
//!
//! The navigator never touches pixels. It talks to whatever draws the
//! screens through the [`Presentation`] trait, passed in on every call.
//!
//! [`SurfaceBoard`] is the in-memory implementation: one flag set per screen
//! plus a visibility bit per content element. The TUI renders from it, and
//! tests assert against it. With recording enabled it also keeps a
//! [`SurfaceOp`] journal of every primitive call, in call order.

use serde::Serialize;

use crate::core::registry::ScreenRegistry;

/// Primitives the navigator needs from a presentation layer.
pub trait Presentation {
    type Surface: Clone + std::fmt::Debug;
    type Element: Clone + std::fmt::Debug;

    /// Look up a screen surface by id. `None` means "no such screen".
    fn resolve_screen_surface(&self, id: &str) -> Option<Self::Surface>;

    fn set_active(&mut self, surface: &Self::Surface, active: bool);

    fn set_leaving(&mut self, surface: &Self::Surface, leaving: bool);

    /// Stagger targets of a surface, in document order.
    fn list_animatable_content(&self, surface: &Self::Surface) -> Vec<Self::Element>;

    fn hide_content_element(&mut self, element: &Self::Element);

    fn reveal_content_element(&mut self, element: &Self::Element);
}

/// Index of a screen on a [`SurfaceBoard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SurfaceId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ElementId {
    pub surface: SurfaceId,
    pub index: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SurfaceState {
    pub active: bool,
    pub leaving: bool,
    pub revealed: Vec<bool>,
}

/// One recorded primitive call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SurfaceOp {
    SetActive { screen: String, active: bool },
    SetLeaving { screen: String, leaving: bool },
    Hide { screen: String, index: usize },
    Reveal { screen: String, index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceBoard {
    ids: Vec<String>,
    surfaces: Vec<SurfaceState>,
    journal: Option<Vec<SurfaceOp>>,
}

impl SurfaceBoard {
    /// One surface per registered screen. Every element starts visible and no
    /// surface is active until the navigator starts.
    ///
    /// The home screen's content is its launcher icons; every other screen's
    /// content is its entry list.
    pub fn from_registry(registry: &ScreenRegistry) -> Self {
        let launcher_count = registry.home_launchers().len();
        let (ids, surfaces): (Vec<String>, Vec<SurfaceState>) = registry
            .iter()
            .map(|screen| {
                let count = if screen.id == registry.home() {
                    launcher_count
                } else {
                    screen.content.len()
                };
                let state = SurfaceState {
                    revealed: vec![true; count],
                    ..Default::default()
                };
                (screen.id.clone(), state)
            })
            .unzip();

        Self {
            ids,
            surfaces,
            journal: None,
        }
    }

    /// Same as [`from_registry`](Self::from_registry), with the op journal on.
    pub fn recording(registry: &ScreenRegistry) -> Self {
        Self {
            journal: Some(Vec::new()),
            ..Self::from_registry(registry)
        }
    }

    /// Take the journal so far, leaving it empty. Empty when not recording.
    pub fn take_journal(&mut self) -> Vec<SurfaceOp> {
        self.journal.as_mut().map(std::mem::take).unwrap_or_default()
    }

    pub fn state(&self, id: &str) -> Option<&SurfaceState> {
        let pos = self.ids.iter().position(|i| i == id)?;
        self.surfaces.get(pos)
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.state(id).is_some_and(|s| s.active)
    }

    pub fn is_leaving(&self, id: &str) -> bool {
        self.state(id).is_some_and(|s| s.leaving)
    }

    /// Ids of all surfaces currently marked active.
    pub fn active_screens(&self) -> Vec<&str> {
        self.ids
            .iter()
            .zip(&self.surfaces)
            .filter(|(_, s)| s.active)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    pub fn is_revealed(&self, id: &str, index: usize) -> bool {
        self.state(id)
            .and_then(|s| s.revealed.get(index).copied())
            .unwrap_or(false)
    }

    /// Count of revealed elements on a surface.
    pub fn revealed_count(&self, id: &str) -> usize {
        self.state(id)
            .map(|s| s.revealed.iter().filter(|r| **r).count())
            .unwrap_or(0)
    }

    fn record(&mut self, op: SurfaceOp) {
        if let Some(journal) = self.journal.as_mut() {
            journal.push(op);
        }
    }
}

impl Presentation for SurfaceBoard {
    type Surface = SurfaceId;
    type Element = ElementId;

    fn resolve_screen_surface(&self, id: &str) -> Option<SurfaceId> {
        self.ids.iter().position(|i| i == id).map(SurfaceId)
    }

    fn set_active(&mut self, surface: &SurfaceId, active: bool) {
        if let Some(state) = self.surfaces.get_mut(surface.0) {
            state.active = active;
            let screen = self.ids[surface.0].clone();
            self.record(SurfaceOp::SetActive { screen, active });
        }
    }

    fn set_leaving(&mut self, surface: &SurfaceId, leaving: bool) {
        if let Some(state) = self.surfaces.get_mut(surface.0) {
            state.leaving = leaving;
            let screen = self.ids[surface.0].clone();
            self.record(SurfaceOp::SetLeaving { screen, leaving });
        }
    }

    fn list_animatable_content(&self, surface: &SurfaceId) -> Vec<ElementId> {
        let count = self
            .surfaces
            .get(surface.0)
            .map(|s| s.revealed.len())
            .unwrap_or(0);
        (0..count)
            .map(|index| ElementId {
                surface: *surface,
                index,
            })
            .collect()
    }

    fn hide_content_element(&mut self, element: &ElementId) {
        if let Some(slot) = self
            .surfaces
            .get_mut(element.surface.0)
            .and_then(|s| s.revealed.get_mut(element.index))
        {
            *slot = false;
            let screen = self.ids[element.surface.0].clone();
            self.record(SurfaceOp::Hide {
                screen,
                index: element.index,
            });
        }
    }

    fn reveal_content_element(&mut self, element: &ElementId) {
        if let Some(slot) = self
            .surfaces
            .get_mut(element.surface.0)
            .and_then(|s| s.revealed.get_mut(element.index))
        {
            *slot = true;
            let screen = self.ids[element.surface.0].clone();
            self.record(SurfaceOp::Reveal {
                screen,
                index: element.index,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_registry;

    #[test]
    fn test_board_starts_with_nothing_active() {
        let board = SurfaceBoard::from_registry(&test_registry());
        assert!(board.active_screens().is_empty());
        assert_eq!(board.revealed_count("about"), 3);
    }

    #[test]
    fn test_home_content_is_launchers() {
        let registry = test_registry();
        let board = SurfaceBoard::from_registry(&registry);
        let home = board.resolve_screen_surface("home").unwrap();
        assert_eq!(
            board.list_animatable_content(&home).len(),
            registry.home_launchers().len()
        );
    }

    #[test]
    fn test_unknown_screen_does_not_resolve() {
        let board = SurfaceBoard::from_registry(&test_registry());
        assert!(board.resolve_screen_surface("nonexistent").is_none());
        assert!(!board.is_active("nonexistent"));
    }

    #[test]
    fn test_journal_records_in_call_order() {
        let mut board = SurfaceBoard::recording(&test_registry());
        let about = board.resolve_screen_surface("about").unwrap();
        board.set_leaving(&about, true);
        board.set_active(&about, false);
        board.hide_content_element(&ElementId { surface: about, index: 1 });

        assert_eq!(
            board.take_journal(),
            vec![
                SurfaceOp::SetLeaving { screen: "about".into(), leaving: true },
                SurfaceOp::SetActive { screen: "about".into(), active: false },
                SurfaceOp::Hide { screen: "about".into(), index: 1 },
            ]
        );
        assert!(board.take_journal().is_empty());
        assert!(!board.is_revealed("about", 1));
    }

    #[test]
    fn test_plain_board_keeps_no_journal() {
        let mut board = SurfaceBoard::from_registry(&test_registry());
        let about = board.resolve_screen_surface("about").unwrap();
        board.set_active(&about, true);
        assert!(board.take_journal().is_empty());
        assert!(board.is_active("about"));
    }
}
