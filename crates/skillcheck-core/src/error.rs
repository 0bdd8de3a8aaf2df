use thiserror::Error;

/// Unified error type for the skillcheck validator.
///
/// Rule-level failures are never errors — rules return structured outcomes.
/// These variants cover the things that genuinely stop a unit of work: a
/// root that cannot be scanned, a SKILL.md that cannot be parsed, a bad
/// configuration file.
#[derive(Error, Debug)]
pub enum SkillcheckError {
    // ── Environment errors ─────────────────────────────────────
    #[error("root path not found: {0}")]
    RootNotFound(String),

    #[error("cannot read {path}: {reason}")]
    PermissionDenied { path: String, reason: String },

    #[error("no skill packages found under the given roots")]
    NoSkillsFound,

    // ── Skill parse errors (fatal to one skill only) ───────────
    #[error("malformed frontmatter at line {line}: {reason}")]
    MalformedFrontmatter { line: usize, reason: String },

    #[error("missing required frontmatter field: {0}")]
    MissingField(String),

    // ── Config errors ──────────────────────────────────────────
    #[error("config error: {0}")]
    Config(String),

    // ── Generic wrappers ───────────────────────────────────────
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SkillcheckError>;
