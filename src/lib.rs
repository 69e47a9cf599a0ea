//! Phonefolio library exports for testing

use clap::ValueEnum;

pub mod core;
pub mod runtime;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// How the binary presents navigation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Interactive phone in the terminal
    #[default]
    Phone,
    /// Run the given targets on a virtual clock and print the event log as JSON
    Trace,
}
