//! # skillcheck-config
//!
//! Configuration for the skillcheck validator — maps to `skillcheck.toml`.
//!
//! The config is loaded once at the start of a run and never mutated:
//! validation is a one-shot batch, so there is no hot-reload.

pub mod loader;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{ConfigWarning, SkillcheckConfig, WarningSeverity};
