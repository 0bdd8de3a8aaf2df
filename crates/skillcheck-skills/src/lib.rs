//! # skillcheck-skills
//!
//! The SkillPackage data model and everything that constructs it from disk.
//! A skill is a directory containing a `SKILL.md` file (Markdown with YAML
//! frontmatter) plus optional companion files the body links to.
//!
//! ## SKILL.md Format
//!
//! ```markdown
//! ---
//! name: spring-boot-testing
//! description: Write and structure Spring Boot integration tests
//! version: 1.0.0
//! category: java
//! tags: [spring, testing]
//! allowed-tools: [Read, Grep, Bash]
//! ---
//!
//! # Spring Boot Testing
//!
//! ## Instructions
//! 1. Read the service under test
//! 2. See [the test patterns](references/patterns.md) for slice-test setup
//! ```
//!
//! Packages are built once per validation run, are immutable after
//! construction, and are discarded at the end of the run.

pub mod definition;
pub mod references;
pub mod scanner;

pub use definition::{FieldIssue, Frontmatter, SkillPackage};
pub use references::extract_references;
pub use scanner::{RootError, ScanOutcome, Scanner, SkillLocation};
