//! Starwander CLI library.
//!
//! Subcommand handlers, output formatting and terminal styling for the
//! `starwander` binary.

pub mod commands;
pub mod output;
pub mod terminal;
