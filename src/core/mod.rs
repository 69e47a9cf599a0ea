//! # Core Application Logic
//!
//! The phone's navigation logic. Knows nothing about any specific UI
//! technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Registry (screens)   │
//!                    │  • Navigator (FSM)      │
//!                    │  • Presentation (seam)  │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  Runtime   │      │   Trace    │
//!     │  Adapter   │      │  (tokio    │      │  (virtual  │
//!     │ (ratatui)  │      │   actor)   │      │   clock)   │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`registry`]: the fixed list of screens
//! - [`navigator`]: `ScreenNavigator`, the two-phase transition state machine
//! - [`surface`]: the `Presentation` trait and the in-memory `SurfaceBoard`
//! - [`timer`]: deadline-ordered task queue driving the navigator
//! - [`state`] / [`action`]: `App`, `Action`, `update()` for the adapters
//! - [`script`]: headless timed runs
//! - [`config`]: file/env/CLI settings

pub mod action;
pub mod config;
pub mod navigator;
pub mod registry;
pub mod script;
pub mod state;
pub mod surface;
pub mod timer;
