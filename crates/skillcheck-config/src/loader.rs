use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::schema::SkillcheckConfig;

/// Loads the skillcheck configuration for one run.
pub struct ConfigLoader {
    config: SkillcheckConfig,
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Resolve the config path: explicit path > SKILLCHECK_CONFIG env > ~/.skillcheck/skillcheck.toml
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var("SKILLCHECK_CONFIG") {
            return PathBuf::from(p);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".skillcheck")
            .join("skillcheck.toml")
    }

    /// Load the config from disk, falling back to defaults.
    pub fn load(path: Option<&Path>) -> skillcheck_core::Result<Self> {
        let config_path = Self::resolve_path(path);
        let config = if config_path.exists() {
            info!(?config_path, "loading configuration");
            let raw = std::fs::read_to_string(&config_path)?;
            toml::from_str::<SkillcheckConfig>(&raw).map_err(|e| {
                skillcheck_core::SkillcheckError::Config(format!(
                    "failed to parse {}: {}",
                    config_path.display(),
                    e
                ))
            })?
        } else {
            SkillcheckConfig::default()
        };

        let config = Self::apply_env_overrides(config);

        // Validate config — log warnings, fail on errors
        match config.validate() {
            Ok(warnings) => {
                for w in &warnings {
                    warn!("{}", w);
                }
            }
            Err(e) => {
                return Err(skillcheck_core::SkillcheckError::Config(e));
            }
        }

        Ok(Self {
            config,
            config_path,
        })
    }

    /// Get a snapshot of the loaded config.
    pub fn get(&self) -> SkillcheckConfig {
        self.config.clone()
    }

    /// Path the config was loaded from (or would have been).
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Apply env var overrides (SKILLCHECK_LOG_LEVEL, SKILLCHECK_MIN_DESCRIPTION, etc.)
    fn apply_env_overrides(mut config: SkillcheckConfig) -> SkillcheckConfig {
        if let Ok(v) = std::env::var("SKILLCHECK_LOG_LEVEL") {
            config.logging.level = v;
        }
        if let Ok(v) = std::env::var("SKILLCHECK_MIN_DESCRIPTION") {
            if let Ok(n) = v.parse::<usize>() {
                config.validator.min_description_chars = n;
            }
        }
        if let Ok(v) = std::env::var("SKILLCHECK_STRICT") {
            if let Ok(b) = v.parse::<bool>() {
                config.validator.strict = b;
            }
        }
        if let Ok(v) = std::env::var("SKILLCHECK_FORMAT") {
            config.output.format = v;
        }
        config
    }
}
