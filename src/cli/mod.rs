//! CLI module for redline - command-line interface.
//!
//! One command: review a document and write the revised version.

pub mod commands;

pub use commands::Cli;
