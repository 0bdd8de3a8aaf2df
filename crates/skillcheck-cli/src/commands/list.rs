use std::path::PathBuf;

use console::style;
use tracing::warn;

use skillcheck_config::SkillcheckConfig;
use skillcheck_core::Result;
use skillcheck_skills::{Scanner, SkillPackage};

pub(super) fn cmd_list(config: SkillcheckConfig, roots: Vec<PathBuf>) -> Result<()> {
    let roots = super::resolve_roots(roots, &config)?;
    let outcome = Scanner::new(config.scanner.follow_symlinks).scan(&roots);
    for re in &outcome.root_errors {
        warn!(root = ?re.root, error = %re.error, "root could not be scanned");
    }

    if outcome.locations.is_empty() {
        println!("No skill packages found under the given roots.");
        return Ok(());
    }

    println!(
        "{}\n",
        style(format!("Discovered skills ({}):", outcome.locations.len())).bold()
    );
    for loc in &outcome.locations {
        match SkillPackage::from_file(&loc.skill_md) {
            Ok(pkg) => {
                let version = pkg
                    .frontmatter
                    .version
                    .as_deref()
                    .map(|v| format!(" v{v}"))
                    .unwrap_or_default();
                let tags = if pkg.frontmatter.tags.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", pkg.frontmatter.tags.join(", "))
                };
                println!("  {}{}{}", style(&pkg.frontmatter.name).cyan(), version, tags);
                println!("    {}", pkg.frontmatter.description);
                println!("    File: {}", loc.skill_md.display());
                println!();
            }
            Err(e) => {
                println!(
                    "  {} {}",
                    style(loc.dir_path.display().to_string()).red(),
                    style(format!("(unparsable: {e})")).dim()
                );
                println!();
            }
        }
    }
    Ok(())
}
