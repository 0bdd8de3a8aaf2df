//! # skillcheck-core
//!
//! Core error taxonomy and primitives for the skillcheck validator.
//! This crate defines the shared vocabulary used by every other crate in the workspace.

pub mod error;

pub use error::{Result, SkillcheckError};
