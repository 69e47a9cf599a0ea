//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::navigator::{ScreenNavigator, Timing};
use crate::core::registry::{ContentEntry, Placement, ScreenDescriptor, ScreenRegistry};
use crate::core::surface::SurfaceBoard;

/// Four screens: home, two grid apps and one dock app.
///
/// Home has 3 launchers, `about` has 3 entries, `projects` 2 (one links back
/// to `about`), `contact` 1.
pub fn test_registry() -> ScreenRegistry {
    let screens = vec![
        ScreenDescriptor::new("home", "Home", "H", Placement::Hidden),
        ScreenDescriptor::new("about", "About", "A", Placement::Grid).with_content(vec![
            ContentEntry::new("Profile", "Hello there."),
            ContentEntry::new("Now", "Writing tests."),
            ContentEntry::new("Elsewhere", "Outside."),
        ]),
        ScreenDescriptor::new("projects", "Projects", "P", Placement::Grid).with_content(vec![
            ContentEntry::new("Widget", "Does widget things."),
            ContentEntry::linked("Who made this", "", "about"),
        ]),
        ScreenDescriptor::new("contact", "Contact", "C", Placement::Dock)
            .with_content(vec![ContentEntry::new("Email", "hi@example.com")]),
    ];
    ScreenRegistry::new(screens, "home").expect("test registry is valid")
}

/// A started navigator on a recording board, with the home cascade settled.
pub fn started() -> (ScreenNavigator, SurfaceBoard) {
    let registry = test_registry();
    let mut board = SurfaceBoard::recording(&registry);
    let mut nav = ScreenNavigator::new(registry.home(), Timing::default());
    nav.start(0, &mut board);
    nav.tick(500, &mut board);
    (nav, board)
}
