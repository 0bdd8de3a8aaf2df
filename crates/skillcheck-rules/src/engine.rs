use std::path::{Component, PathBuf};

use skillcheck_core::SkillcheckError;
use skillcheck_skills::SkillPackage;

use crate::report::{RuleOutcome, Severity, ValidationReport};

/// Rule id used for outcomes produced when a SKILL.md could not be parsed
/// or read at all.
pub const PARSE_RULE_ID: &str = "PARSE";

/// Tunables the rules read. Loaded once per run from configuration.
#[derive(Debug, Clone)]
pub struct RuleContext {
    pub min_description_chars: usize,
}

impl Default for RuleContext {
    fn default() -> Self {
        Self {
            min_description_chars: 20,
        }
    }
}

/// A named, stateless validation check.
pub struct Rule {
    pub id: &'static str,
    pub severity: Severity,
    check: fn(&SkillPackage, &RuleContext) -> (bool, String),
}

/// The built-in rule set, in declaration order. Report ordering follows
/// this order for reproducible output.
pub fn builtin_rules() -> &'static [Rule] {
    &[
        Rule {
            id: "FRONTMATTER_NAME_MATCH",
            severity: Severity::Error,
            check: check_name_match,
        },
        Rule {
            id: "REQUIRED_FIELDS_PRESENT",
            severity: Severity::Error,
            check: check_required_fields,
        },
        Rule {
            id: "DESCRIPTION_NONTRIVIAL",
            severity: Severity::Warning,
            check: check_description_nontrivial,
        },
        Rule {
            id: "REFERENCED_FILES_EXIST",
            severity: Severity::Error,
            check: check_referenced_files,
        },
        Rule {
            id: "VERSION_FORMAT",
            severity: Severity::Warning,
            check: check_version_format,
        },
        Rule {
            id: "BODY_NONEMPTY",
            severity: Severity::Error,
            check: check_body_nonempty,
        },
        Rule {
            id: "FRONTMATTER_FIELD_TYPES",
            severity: Severity::Warning,
            check: check_field_types,
        },
    ]
}

/// Apply every built-in rule to a package. No rule short-circuits another;
/// the report carries the full outcome set for diagnostic completeness.
pub fn evaluate(pkg: &SkillPackage, ctx: &RuleContext) -> ValidationReport {
    let outcomes = builtin_rules()
        .iter()
        .map(|rule| {
            let (passed, message) = (rule.check)(pkg, ctx);
            RuleOutcome {
                rule_id: rule.id.into(),
                severity: rule.severity,
                passed,
                message,
            }
        })
        .collect();
    ValidationReport::new(pkg.dir_path.clone(), outcomes)
}

/// Build the FAIL report for a skill whose SKILL.md could not be parsed.
/// A missing required field lands under REQUIRED_FIELDS_PRESENT; malformed
/// delimiters and read failures get a dedicated PARSE outcome. Either way
/// the failure is fatal to this skill only.
pub fn parse_failure_report(skill_path: PathBuf, err: &SkillcheckError) -> ValidationReport {
    let (rule_id, message) = match err {
        SkillcheckError::MissingField(field) => (
            "REQUIRED_FIELDS_PRESENT",
            format!("required frontmatter field '{field}' is missing or empty"),
        ),
        other => (PARSE_RULE_ID, other.to_string()),
    };
    ValidationReport::new(
        skill_path,
        vec![RuleOutcome {
            rule_id: rule_id.into(),
            severity: Severity::Error,
            passed: false,
            message,
        }],
    )
}

// ── Checks ─────────────────────────────────────────────────────

fn check_name_match(pkg: &SkillPackage, _ctx: &RuleContext) -> (bool, String) {
    if pkg.frontmatter.name == pkg.dir_name {
        (true, format!("name '{}' matches directory", pkg.dir_name))
    } else {
        (
            false,
            format!(
                "frontmatter name '{}' does not match directory name '{}'",
                pkg.frontmatter.name, pkg.dir_name
            ),
        )
    }
}

fn check_required_fields(pkg: &SkillPackage, _ctx: &RuleContext) -> (bool, String) {
    let mut missing = Vec::new();
    if pkg.frontmatter.name.trim().is_empty() {
        missing.push("name");
    }
    if pkg.frontmatter.description.trim().is_empty() {
        missing.push("description");
    }
    if missing.is_empty() {
        (true, "name and description present".into())
    } else {
        (false, format!("missing required fields: {}", missing.join(", ")))
    }
}

fn check_description_nontrivial(pkg: &SkillPackage, ctx: &RuleContext) -> (bool, String) {
    let len = pkg.frontmatter.description.chars().count();
    if len >= ctx.min_description_chars {
        (true, format!("description is {len} characters"))
    } else {
        (
            false,
            format!(
                "description is {len} characters, below the {} minimum",
                ctx.min_description_chars
            ),
        )
    }
}

fn check_referenced_files(pkg: &SkillPackage, _ctx: &RuleContext) -> (bool, String) {
    // All missing paths are collected into this one outcome to keep the
    // report compact.
    let missing: Vec<&String> = pkg
        .referenced_files
        .iter()
        .filter(|rel| !resolves_in_package(pkg, rel))
        .collect();
    if missing.is_empty() {
        (
            true,
            format!("all {} referenced files exist", pkg.referenced_files.len()),
        )
    } else {
        let listed: Vec<String> = missing.iter().map(|m| m.to_string()).collect();
        (
            false,
            format!("missing referenced files: {}", listed.join(", ")),
        )
    }
}

/// A reference resolves iff it stays inside the skill directory and names
/// an existing file. Paths with parent components never resolve.
fn resolves_in_package(pkg: &SkillPackage, rel: &str) -> bool {
    let rel_path = std::path::Path::new(rel);
    if rel_path
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
    {
        return false;
    }
    pkg.dir_path.join(rel_path).is_file()
}

fn check_version_format(pkg: &SkillPackage, _ctx: &RuleContext) -> (bool, String) {
    match &pkg.frontmatter.version {
        None => (true, "no version declared".into()),
        Some(v) => match semver::Version::parse(v) {
            Ok(_) => (true, format!("version '{v}' is valid semver")),
            Err(_) => (
                false,
                format!("version '{v}' is not a MAJOR.MINOR.PATCH semantic version"),
            ),
        },
    }
}

fn check_body_nonempty(pkg: &SkillPackage, _ctx: &RuleContext) -> (bool, String) {
    let has_heading = pkg
        .body
        .lines()
        .any(|l| l.trim_start().starts_with('#'));
    let has_content = !pkg.body.trim().is_empty();
    match (has_content, has_heading) {
        (true, true) => (true, "body has content and at least one heading".into()),
        (false, _) => (false, "body is empty".into()),
        (true, false) => (false, "body contains no heading".into()),
    }
}

fn check_field_types(pkg: &SkillPackage, _ctx: &RuleContext) -> (bool, String) {
    if pkg.frontmatter.issues.is_empty() {
        (true, "optional fields are well-formed".into())
    } else {
        let listed: Vec<String> = pkg
            .frontmatter
            .issues
            .iter()
            .map(|i| i.message.clone())
            .collect();
        (false, listed.join("; "))
    }
}
