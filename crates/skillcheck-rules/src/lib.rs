//! # skillcheck-rules
//!
//! The validation rule set and report types. Rules are stateless,
//! independent predicates over a [`skillcheck_skills::SkillPackage`];
//! the engine applies every rule in declaration order and never lets one
//! rule's failure short-circuit another's evaluation, so a report always
//! carries the full outcome set.

pub mod engine;
pub mod report;

pub use engine::{PARSE_RULE_ID, Rule, RuleContext, builtin_rules, evaluate, parse_failure_report};
pub use report::{ReportStatus, RuleOutcome, RunStatus, RunSummary, Severity, ValidationReport};
