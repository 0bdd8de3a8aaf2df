use serde::Serialize;
use std::path::PathBuf;

/// Rule severity. Warnings never flip a report to FAIL on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// The result of one rule applied to one package.
#[derive(Debug, Clone, Serialize)]
pub struct RuleOutcome {
    pub rule_id: String,
    pub severity: Severity,
    pub passed: bool,
    pub message: String,
}

/// PASS iff no error-severity outcome failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportStatus {
    Pass,
    Fail,
}

/// Aggregated outcomes for one skill package. Immutable once produced;
/// outcome order is the rule declaration order, so identical input yields
/// an identical report.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub skill_path: PathBuf,
    pub status: ReportStatus,
    pub outcomes: Vec<RuleOutcome>,
}

impl ValidationReport {
    pub fn new(skill_path: PathBuf, outcomes: Vec<RuleOutcome>) -> Self {
        let status = if outcomes
            .iter()
            .any(|o| o.severity == Severity::Error && !o.passed)
        {
            ReportStatus::Fail
        } else {
            ReportStatus::Pass
        };
        Self {
            skill_path,
            status,
            outcomes,
        }
    }

    /// True when any warning-severity outcome failed.
    pub fn has_warnings(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| o.severity == Severity::Warning && !o.passed)
    }

    /// Outcomes that failed, in report order.
    pub fn failures(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }
}

/// Overall disposition of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RunStatus {
    Pass,
    Fail,
}

/// Aggregates all reports for one invocation.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Skills that passed but carry failed warning outcomes.
    pub warned: usize,
    pub failing_skills: Vec<PathBuf>,
}

impl RunSummary {
    pub fn from_reports(reports: &[ValidationReport]) -> Self {
        let failed_reports: Vec<&ValidationReport> = reports
            .iter()
            .filter(|r| r.status == ReportStatus::Fail)
            .collect();
        Self {
            total: reports.len(),
            passed: reports.len() - failed_reports.len(),
            failed: failed_reports.len(),
            warned: reports
                .iter()
                .filter(|r| r.status == ReportStatus::Pass && r.has_warnings())
                .count(),
            failing_skills: failed_reports.iter().map(|r| r.skill_path.clone()).collect(),
        }
    }

    /// Run disposition. Under strict mode, failed warnings flip an
    /// otherwise-passing run to FAIL; the individual severity labels in
    /// the report are unchanged.
    pub fn disposition(&self, strict: bool) -> RunStatus {
        if self.failed > 0 || (strict && self.warned > 0) {
            RunStatus::Fail
        } else {
            RunStatus::Pass
        }
    }
}
