//! # skillcheck-cli
//!
//! Command-line interface for the skillcheck validator.
//!
//! ## Commands
//!
//! - `skillcheck validate <root>...` — Validate skill packages and report
//! - `skillcheck list <root>...` — List discovered skill packages
//! - `skillcheck config` — Show the effective configuration
//! - `skillcheck completions` — Generate shell completions

pub mod commands;

pub use commands::Cli;
