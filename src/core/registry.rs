//! # Screen Registry
//!
//! The fixed, ordered list of screens the phone knows about. Built once at
//! startup (defaults or `[[screens]]` from the config file) and never mutated.
//!
//! ```text
//! ScreenRegistry
//! ├── home: String                    // screen shown at startup
//! └── screens: Vec<ScreenDescriptor>
//!     ├── id / title / icon
//!     ├── placement: Grid | Dock | Hidden
//!     └── content: Vec<ContentEntry>  // stagger targets, in order
//! ```

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub const DEFAULT_HOME: &str = "home";

/// Where a screen's launcher icon lives on the home screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    #[default]
    Grid,
    Dock,
    /// No launcher; reachable only through a content link.
    Hidden,
}

/// One card/row inside a screen.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContentEntry {
    pub heading: String,
    #[serde(default)]
    pub body: String,
    /// Screen opened when this entry is activated.
    #[serde(default)]
    pub link: Option<String>,
}

impl ContentEntry {
    pub fn new(heading: &str, body: &str) -> Self {
        Self {
            heading: heading.to_string(),
            body: body.to_string(),
            link: None,
        }
    }

    pub fn linked(heading: &str, body: &str, link: &str) -> Self {
        Self {
            link: Some(link.to_string()),
            ..Self::new(heading, body)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScreenDescriptor {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub placement: Placement,
    #[serde(default)]
    pub content: Vec<ContentEntry>,
}

impl ScreenDescriptor {
    pub fn new(id: &str, title: &str, icon: &str, placement: Placement) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            icon: icon.to_string(),
            placement,
            content: Vec::new(),
        }
    }

    pub fn with_content(mut self, content: Vec<ContentEntry>) -> Self {
        self.content = content;
        self
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No screens at all.
    Empty,
    /// A screen id is empty or whitespace.
    BlankId,
    /// Two screens share an id.
    Duplicate(String),
    /// The configured home id names no screen.
    MissingHome(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Empty => write!(f, "screen registry is empty"),
            RegistryError::BlankId => write!(f, "screen id must not be blank"),
            RegistryError::Duplicate(id) => write!(f, "duplicate screen id: {id}"),
            RegistryError::MissingHome(id) => write!(f, "home screen '{id}' is not registered"),
        }
    }
}

impl std::error::Error for RegistryError {}

// ============================================================================
// Registry
// ============================================================================

#[derive(Debug, Clone)]
pub struct ScreenRegistry {
    screens: Vec<ScreenDescriptor>,
    home: String,
}

impl ScreenRegistry {
    /// Validates and freezes the screen list.
    ///
    /// Links to unknown screens are tolerated (navigating to them is a no-op)
    /// but logged, since they are almost always typos.
    pub fn new(screens: Vec<ScreenDescriptor>, home: &str) -> Result<Self, RegistryError> {
        if screens.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::new();
        for screen in &screens {
            if screen.id.trim().is_empty() {
                return Err(RegistryError::BlankId);
            }
            if !seen.insert(screen.id.as_str()) {
                return Err(RegistryError::Duplicate(screen.id.clone()));
            }
        }
        if !seen.contains(home) {
            return Err(RegistryError::MissingHome(home.to_string()));
        }

        for screen in &screens {
            for link in screen.content.iter().filter_map(|c| c.link.as_deref()) {
                if !seen.contains(link) {
                    warn!("Screen '{}' links to unknown screen '{}'", screen.id, link);
                }
            }
        }

        Ok(Self {
            screens,
            home: home.to_string(),
        })
    }

    pub fn home(&self) -> &str {
        &self.home
    }

    pub fn get(&self, id: &str) -> Option<&ScreenDescriptor> {
        self.screens.iter().find(|s| s.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.screens.iter().position(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScreenDescriptor> {
        self.screens.iter()
    }

    /// Launchers with the given placement, in registry order. Home never
    /// gets a launcher of its own.
    pub fn launchers(&self, placement: Placement) -> impl Iterator<Item = &ScreenDescriptor> {
        self.screens
            .iter()
            .filter(move |s| s.placement == placement && s.id != self.home)
    }

    /// Grid launchers followed by dock launchers. This is the order the home
    /// screen draws and staggers its icons in.
    pub fn home_launchers(&self) -> Vec<&ScreenDescriptor> {
        self.launchers(Placement::Grid)
            .chain(self.launchers(Placement::Dock))
            .collect()
    }
}

impl Default for ScreenRegistry {
    fn default() -> Self {
        Self {
            screens: default_screens(),
            home: DEFAULT_HOME.to_string(),
        }
    }
}

/// The stock portfolio: every screen the phone ships with.
pub fn default_screens() -> Vec<ScreenDescriptor> {
    vec![
        ScreenDescriptor::new(DEFAULT_HOME, "Home", "⌂", Placement::Hidden),
        ScreenDescriptor::new("about", "About", "☺", Placement::Grid).with_content(vec![
            ContentEntry::new("Profile", "Software engineer who likes small, sharp tools."),
            ContentEntry::new("Now", "Building terminal software in Rust."),
            ContentEntry::new("Interests", "Systems, type systems, good coffee."),
        ]),
        ScreenDescriptor::new("education", "Education", "✎", Placement::Grid).with_content(vec![
            ContentEntry::new("B.Sc. Computer Science", "Algorithms, compilers, networks."),
            ContentEntry::new("Exchange Semester", "Distributed systems coursework."),
        ]),
        ScreenDescriptor::new("projects", "Projects", "⚙", Placement::Grid).with_content(vec![
            ContentEntry::new("phonefolio", "This phone, in a terminal."),
            ContentEntry::new("Log Shipper", "Tails files and batches them to object storage."),
            ContentEntry::new("Tiny Lisp", "A tree-walking interpreter with tail calls."),
        ]),
        ScreenDescriptor::new("skills", "Skills", "★", Placement::Grid).with_content(vec![
            ContentEntry::new("Languages", "Rust, Python, TypeScript, SQL."),
            ContentEntry::new("Infrastructure", "Linux, containers, CI pipelines."),
            ContentEntry::new("Practices", "Testing, code review, writing things down."),
        ]),
        ScreenDescriptor::new("certificates", "Certificates", "✓", Placement::Grid)
            .with_content(vec![
                ContentEntry::new("Cloud Practitioner", "Foundational cloud certification."),
                ContentEntry::new("Linux Essentials", "Command line and system basics."),
            ]),
        ScreenDescriptor::new("gallery", "Gallery", "▣", Placement::Grid).with_content(vec![
            ContentEntry::new("Travel", "Photos from the road."),
            ContentEntry::linked("Cats", "A folder of cats.", "cat-gallery"),
        ]),
        ScreenDescriptor::new("contact", "Contact", "✉", Placement::Dock).with_content(vec![
            ContentEntry::new("Email", "hello@example.com"),
            ContentEntry::new("GitHub", "github.com/example"),
            ContentEntry::new("LinkedIn", "linkedin.com/in/example"),
        ]),
        ScreenDescriptor::new("cat-gallery", "Cats", "≈", Placement::Hidden).with_content(vec![
            ContentEntry::new("Nap", "Sleeping on the keyboard."),
            ContentEntry::new("Box", "If it fits, it sits."),
            ContentEntry::linked("Back to Gallery", "", "gallery"),
        ]),
    ]
}
