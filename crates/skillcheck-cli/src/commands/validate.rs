use std::path::PathBuf;
use std::process::ExitCode;

use console::Style;
use tracing::{error, warn};

use skillcheck_config::SkillcheckConfig;
use skillcheck_core::{Result, SkillcheckError};
use skillcheck_rules::{
    ReportStatus, RuleContext, RunStatus, RunSummary, Severity, ValidationReport, evaluate,
    parse_failure_report,
};
use skillcheck_skills::{Scanner, SkillPackage};

use super::OutputFormat;

pub(super) fn cmd_validate(
    config: SkillcheckConfig,
    roots: Vec<PathBuf>,
    skill: Option<String>,
    format: Option<OutputFormat>,
    strict: bool,
    output: Option<PathBuf>,
) -> Result<ExitCode> {
    let roots = super::resolve_roots(roots, &config)?;

    let scanner = Scanner::new(config.scanner.follow_symlinks);
    let outcome = scanner.scan(&roots);
    for re in &outcome.root_errors {
        error!(root = ?re.root, error = %re.error, "root could not be scanned");
    }
    if outcome.all_roots_failed() {
        return Err(SkillcheckError::Config(format!(
            "none of the {} given roots could be scanned",
            outcome.root_errors.len()
        )));
    }

    let mut locations = outcome.locations;
    if let Some(ref name) = skill {
        locations.retain(|l| {
            l.dir_path
                .file_name()
                .is_some_and(|n| n.to_string_lossy() == *name)
        });
        if locations.is_empty() {
            return Err(SkillcheckError::Config(format!(
                "skill '{name}' not found under the given roots"
            )));
        }
    }
    if locations.is_empty() {
        return Err(SkillcheckError::NoSkillsFound);
    }

    let ctx = RuleContext {
        min_description_chars: config.validator.min_description_chars,
    };

    // A single skill's read or parse failure is that skill's FAIL outcome,
    // never the run's.
    let reports: Vec<ValidationReport> = locations
        .iter()
        .map(|loc| match SkillPackage::from_file(&loc.skill_md) {
            Ok(pkg) => evaluate(&pkg, &ctx),
            Err(e) => {
                warn!(skill = ?loc.dir_path, error = %e, "skill could not be parsed");
                parse_failure_report(loc.dir_path.clone(), &e)
            }
        })
        .collect();

    let summary = RunSummary::from_reports(&reports);
    let strict = strict || config.validator.strict;
    let format = format.unwrap_or(if config.output.format == "json" {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    });

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&reports)?,
        OutputFormat::Text => render_text(&reports, &summary, config.output.color),
    };
    println!("{rendered}");
    if let Some(path) = output {
        std::fs::write(&path, format!("{rendered}\n"))?;
    }

    Ok(match summary.disposition(strict) {
        RunStatus::Pass => ExitCode::SUCCESS,
        RunStatus::Fail => ExitCode::from(1),
    })
}

/// Render the human-readable report. One section per skill, complete before
/// the next begins; identical input renders identical text.
fn render_text(reports: &[ValidationReport], summary: &RunSummary, color: bool) -> String {
    let paint = |s: &str, style: Style| -> String {
        if color {
            style.apply_to(s).to_string()
        } else {
            s.to_string()
        }
    };

    let mut out = String::new();
    for report in reports {
        let status = match report.status {
            ReportStatus::Pass => paint("PASS", Style::new().green().bold()),
            ReportStatus::Fail => paint("FAIL", Style::new().red().bold()),
        };
        out.push_str(&format!("{}  {}\n", report.skill_path.display(), status));
        for failure in report.failures() {
            let label = match failure.severity {
                Severity::Error => paint("error", Style::new().red()),
                Severity::Warning => paint("warning", Style::new().yellow()),
            };
            out.push_str(&format!(
                "    {} {}: {}\n",
                label, failure.rule_id, failure.message
            ));
        }
    }

    out.push_str(&format!(
        "\nValidated {} skills: {} passed, {} failed",
        summary.total, summary.passed, summary.failed
    ));
    if summary.warned > 0 {
        out.push_str(&format!(" ({} with warnings)", summary.warned));
    }
    out.push('\n');

    if !summary.failing_skills.is_empty() {
        out.push_str("\nFailing skills:\n");
        for path in &summary.failing_skills {
            out.push_str(&format!("  {}\n", path.display()));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillcheck_rules::RuleOutcome;

    fn sample_reports() -> Vec<ValidationReport> {
        vec![
            ValidationReport::new(
                PathBuf::from("skills/good-skill"),
                vec![RuleOutcome {
                    rule_id: "BODY_NONEMPTY".into(),
                    severity: Severity::Error,
                    passed: true,
                    message: "body has content and at least one heading".into(),
                }],
            ),
            ValidationReport::new(
                PathBuf::from("skills/bad-skill"),
                vec![
                    RuleOutcome {
                        rule_id: "FRONTMATTER_NAME_MATCH".into(),
                        severity: Severity::Error,
                        passed: false,
                        message: "frontmatter name 'x' does not match directory name 'bad-skill'"
                            .into(),
                    },
                    RuleOutcome {
                        rule_id: "VERSION_FORMAT".into(),
                        severity: Severity::Warning,
                        passed: false,
                        message: "version 'latest' is not a MAJOR.MINOR.PATCH semantic version"
                            .into(),
                    },
                ],
            ),
        ]
    }

    #[test]
    fn text_report_lists_failures_and_summary() {
        let reports = sample_reports();
        let summary = RunSummary::from_reports(&reports);
        let text = render_text(&reports, &summary, false);

        assert!(text.contains("skills/good-skill  PASS"));
        assert!(text.contains("skills/bad-skill  FAIL"));
        assert!(text.contains("error FRONTMATTER_NAME_MATCH"));
        assert!(text.contains("warning VERSION_FORMAT"));
        assert!(text.contains("Validated 2 skills: 1 passed, 1 failed"));
        assert!(text.contains("Failing skills:\n  skills/bad-skill"));
        // Passing skills show no outcome lines
        assert!(!text.contains("BODY_NONEMPTY"));
    }

    #[test]
    fn text_report_is_deterministic() {
        let reports = sample_reports();
        let summary = RunSummary::from_reports(&reports);
        assert_eq!(
            render_text(&reports, &summary, false),
            render_text(&reports, &summary, false)
        );
    }

    #[test]
    fn json_report_is_an_array_of_records() {
        let reports = sample_reports();
        let json = serde_json::to_string_pretty(&reports).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let records = parsed.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["status"], "PASS");
        assert_eq!(records[1]["status"], "FAIL");
        assert_eq!(records[1]["outcomes"][0]["rule_id"], "FRONTMATTER_NAME_MATCH");
        assert_eq!(records[1]["outcomes"][1]["severity"], "warning");
    }
}
