use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use std::path::PathBuf;
use std::process::ExitCode;

use skillcheck_config::ConfigLoader;

mod list;
mod validate;

/// Static validator for SKILL.md skill packages
#[derive(Parser)]
#[command(name = "skillcheck", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to skillcheck.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (e.g. debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate skill packages under the given roots
    Validate {
        /// Root directories to scan (falls back to [scanner] roots in config)
        roots: Vec<PathBuf>,

        /// Validate only the package whose directory name equals NAME
        #[arg(long, value_name = "NAME")]
        skill: Option<String>,

        /// Report format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Treat warning outcomes as failing the run
        #[arg(long)]
        strict: bool,

        /// Also write the rendered report to a file
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// List discovered skill packages
    List {
        /// Root directories to scan (falls back to [scanner] roots in config)
        roots: Vec<PathBuf>,
    },
    /// Show the effective configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions for bash, zsh, or fish
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    /// Run the selected command. Returns the process exit code; `Err` means
    /// a usage or environment error (exit code 2).
    pub fn run(self) -> skillcheck_core::Result<ExitCode> {
        // Load config first so we can use it for log format
        let config_loader = ConfigLoader::load(self.config.as_deref())?;
        let config = config_loader.get();

        // Resolve log level: --verbose > --quiet > --log-level > config default
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            self.log_level.as_deref().unwrap_or(&config.logging.level)
        };

        // Initialize tracing with appropriate format
        if config.logging.format == "json" {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
                )
                .json()
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
                )
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }

        match self.command {
            Commands::Validate {
                roots,
                skill,
                format,
                strict,
                output,
            } => validate::cmd_validate(config, roots, skill, format, strict, output),
            Commands::List { roots } => {
                list::cmd_list(config, roots)?;
                Ok(ExitCode::SUCCESS)
            }
            Commands::Config { json } => {
                Self::cmd_config(config, json)?;
                Ok(ExitCode::SUCCESS)
            }
            Commands::Completions { shell } => {
                Self::cmd_completions(shell)?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }

    fn cmd_config(
        config: skillcheck_config::SkillcheckConfig,
        json: bool,
    ) -> skillcheck_core::Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(&config)
                    .map_err(|e| skillcheck_core::SkillcheckError::Config(e.to_string()))?
            );
        }
        Ok(())
    }

    fn cmd_completions(shell: Shell) -> skillcheck_core::Result<()> {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "skillcheck", &mut std::io::stdout());
        Ok(())
    }
}

/// Resolve the roots to scan: command-line roots win, otherwise the
/// configured [scanner] roots.
fn resolve_roots(
    cli_roots: Vec<PathBuf>,
    config: &skillcheck_config::SkillcheckConfig,
) -> skillcheck_core::Result<Vec<PathBuf>> {
    let roots = if cli_roots.is_empty() {
        config.scanner.roots.clone()
    } else {
        cli_roots
    };
    if roots.is_empty() {
        return Err(skillcheck_core::SkillcheckError::Config(
            "no root paths given; pass one or more roots or set [scanner] roots".into(),
        ));
    }
    Ok(roots)
}
