use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration — maps to `skillcheck.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillcheckConfig {
    pub validator: ValidatorConfig,
    pub scanner: ScannerConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

impl Default for SkillcheckConfig {
    fn default() -> Self {
        Self {
            validator: ValidatorConfig::default(),
            scanner: ScannerConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ── Validator ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Minimum description length before DESCRIPTION_NONTRIVIAL warns.
    pub min_description_chars: usize,
    /// Treat warning outcomes as failing the run (same as --strict).
    pub strict: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            min_description_chars: 20,
            strict: false,
        }
    }
}

// ── Scanner ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Default root paths scanned when none are given on the command line.
    pub roots: Vec<PathBuf>,
    /// Follow symlinked directories while scanning.
    pub follow_symlinks: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            follow_symlinks: false,
        }
    }
}

// ── Output ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format: "text" or "json".
    pub format: String,
    /// Use ANSI color in text reports.
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".into(),
            color: true,
        }
    }
}

// ── Logging ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Output format: "pretty", "json", "compact".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

// ── Validation ─────────────────────────────────────────────────

/// A single config validation issue.
#[derive(Debug)]
pub struct ConfigWarning {
    pub field: String,
    pub message: String,
    pub severity: WarningSeverity,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Error,
    Warning,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)?;
        if let Some(ref h) = self.hint {
            write!(f, " ({h})")?;
        }
        Ok(())
    }
}

impl SkillcheckConfig {
    /// Validate the config and return a list of warnings.
    /// Returns `Err` with all messages joined if any severity is Error.
    pub fn validate(&self) -> Result<Vec<ConfigWarning>, String> {
        let mut warnings = Vec::new();

        if self.validator.min_description_chars == 0 {
            warnings.push(ConfigWarning {
                field: "validator.min_description_chars".into(),
                message: "threshold of 0 disables the DESCRIPTION_NONTRIVIAL check".into(),
                severity: WarningSeverity::Warning,
                hint: Some("set to e.g. 20 to flag placeholder descriptions".into()),
            });
        }

        let valid_report_formats = ["text", "json"];
        if !valid_report_formats.contains(&self.output.format.as_str()) {
            warnings.push(ConfigWarning {
                field: "output.format".into(),
                message: format!("unknown report format '{}'", self.output.format),
                severity: WarningSeverity::Error,
                hint: Some(format!("valid values: {}", valid_report_formats.join(", "))),
            });
        }

        let valid_log_formats = ["pretty", "json", "compact"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            warnings.push(ConfigWarning {
                field: "logging.format".into(),
                message: format!("unknown log format '{}'", self.logging.format),
                severity: WarningSeverity::Warning,
                hint: Some(format!("valid values: {}", valid_log_formats.join(", "))),
            });
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            warnings.push(ConfigWarning {
                field: "logging.level".into(),
                message: format!("unknown log level '{}'", self.logging.level),
                severity: WarningSeverity::Warning,
                hint: Some(format!("valid values: {}", valid_levels.join(", "))),
            });
        }

        let errors: Vec<String> = warnings
            .iter()
            .filter(|w| w.severity == WarningSeverity::Error)
            .map(|w| format!("{}: {}", w.field, w.message))
            .collect();

        if !errors.is_empty() {
            return Err(format!("configuration errors:\n  - {}", errors.join("\n  - ")));
        }

        Ok(warnings)
    }
}
