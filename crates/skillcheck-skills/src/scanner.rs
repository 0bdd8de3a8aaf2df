use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use skillcheck_core::SkillcheckError;

/// Location of one discovered skill package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillLocation {
    /// The skill directory.
    pub dir_path: PathBuf,
    /// The `SKILL.md` inside it.
    pub skill_md: PathBuf,
}

/// A root that could not be scanned. Other roots are unaffected.
#[derive(Debug)]
pub struct RootError {
    pub root: PathBuf,
    pub error: SkillcheckError,
}

/// Everything one scan produced: discovered locations plus per-root errors.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub locations: Vec<SkillLocation>,
    pub root_errors: Vec<RootError>,
}

impl ScanOutcome {
    /// True when every given root failed to scan.
    pub fn all_roots_failed(&self) -> bool {
        !self.root_errors.is_empty() && self.locations.is_empty()
    }
}

/// Enumerates skill directories under one or more roots.
///
/// A directory is a skill package iff it directly contains a file named
/// exactly `SKILL.md`. Grouping directories (e.g. `skills/java/`) are
/// descended recursively; a skill directory itself is a leaf. Hidden
/// directories are skipped. Results are sorted by path so that re-running
/// over an unchanged tree yields the same sequence.
pub struct Scanner {
    follow_symlinks: bool,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Scanner {
    pub fn new(follow_symlinks: bool) -> Self {
        Self { follow_symlinks }
    }

    /// Scan all roots. A root that does not exist or cannot be read is
    /// reported in the outcome and does not abort the remaining roots.
    pub fn scan(&self, roots: &[PathBuf]) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();

        for root in roots {
            if !root.exists() {
                outcome.root_errors.push(RootError {
                    root: root.clone(),
                    error: SkillcheckError::RootNotFound(root.display().to_string()),
                });
                continue;
            }
            if let Err(e) = self.walk(root, &mut outcome.locations) {
                outcome.root_errors.push(RootError {
                    root: root.clone(),
                    error: e,
                });
            }
        }

        outcome.locations.sort_by(|a, b| a.dir_path.cmp(&b.dir_path));
        outcome.locations.dedup();
        outcome
    }

    fn walk(
        &self,
        dir: &Path,
        locations: &mut Vec<SkillLocation>,
    ) -> skillcheck_core::Result<()> {
        let skill_md = dir.join("SKILL.md");
        if skill_md.is_file() {
            debug!(dir = ?dir, "found skill package");
            locations.push(SkillLocation {
                dir_path: dir.to_path_buf(),
                skill_md,
            });
            // A skill directory is a leaf — its companion files are not
            // candidate packages.
            return Ok(());
        }

        let entries = std::fs::read_dir(dir).map_err(|e| {
            SkillcheckError::PermissionDenied {
                path: dir.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(dir = ?dir, error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            if path
                .file_name()
                .is_some_and(|n| n.to_string_lossy().starts_with('.'))
            {
                continue;
            }
            if !self.follow_symlinks && path.is_symlink() {
                debug!(path = ?path, "skipping symlinked directory");
                continue;
            }
            // Deeper read failures are tolerated: log and move on so one
            // bad subtree never hides the rest of the root.
            if let Err(e) = self.walk(&path, locations) {
                warn!(path = ?path, error = %e, "skipping unreadable subtree");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_skill(dir: &Path, name: &str) {
        let skill_dir = dir.join(name);
        std::fs::create_dir_all(&skill_dir).unwrap();
        std::fs::write(
            skill_dir.join("SKILL.md"),
            format!("---\nname: {name}\ndescription: A scanner test skill\n---\n\n# {name}\n"),
        )
        .unwrap();
    }

    #[test]
    fn discovers_skill_directories() {
        let dir = tempfile::tempdir().unwrap();
        write_skill(dir.path(), "alpha");
        write_skill(dir.path(), "beta");

        // Non-skill directory (no SKILL.md) should be ignored
        let noise = dir.path().join("not-a-skill");
        std::fs::create_dir_all(&noise).unwrap();
        std::fs::write(noise.join("README.md"), "Just a readme.").unwrap();

        let outcome = Scanner::default().scan(&[dir.path().to_path_buf()]);
        assert!(outcome.root_errors.is_empty());
        let names: Vec<_> = outcome
            .locations
            .iter()
            .map(|l| l.dir_path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    fn descends_grouping_directories() {
        let dir = tempfile::tempdir().unwrap();
        let java = dir.path().join("java");
        std::fs::create_dir_all(&java).unwrap();
        write_skill(&java, "spring-boot-testing");
        write_skill(dir.path(), "top-level");

        let outcome = Scanner::default().scan(&[dir.path().to_path_buf()]);
        assert_eq!(outcome.locations.len(), 2);
        assert!(outcome
            .locations
            .iter()
            .any(|l| l.dir_path.ends_with("java/spring-boot-testing")));
    }

    #[test]
    fn skill_directory_is_a_leaf() {
        let dir = tempfile::tempdir().unwrap();
        write_skill(dir.path(), "outer");
        // A nested SKILL.md inside a skill's companion dir is not a package
        write_skill(&dir.path().join("outer").join("references"), "inner");

        let outcome = Scanner::default().scan(&[dir.path().to_path_buf()]);
        assert_eq!(outcome.locations.len(), 1);
        assert!(outcome.locations[0].dir_path.ends_with("outer"));
    }

    #[test]
    fn missing_root_reported_others_scanned() {
        let dir = tempfile::tempdir().unwrap();
        write_skill(dir.path(), "present");

        let outcome = Scanner::default().scan(&[
            PathBuf::from("/nonexistent/skills"),
            dir.path().to_path_buf(),
        ]);
        assert_eq!(outcome.root_errors.len(), 1);
        assert!(matches!(
            outcome.root_errors[0].error,
            SkillcheckError::RootNotFound(_)
        ));
        assert_eq!(outcome.locations.len(), 1);
        assert!(!outcome.all_roots_failed());
    }

    #[test]
    fn all_roots_failed_when_nothing_scanned() {
        let outcome = Scanner::default().scan(&[PathBuf::from("/nonexistent/skills")]);
        assert!(outcome.all_roots_failed());
    }

    #[test]
    fn root_that_is_itself_a_skill() {
        let dir = tempfile::tempdir().unwrap();
        write_skill(dir.path(), "solo");
        let solo = dir.path().join("solo");

        let outcome = Scanner::default().scan(&[solo.clone()]);
        assert_eq!(outcome.locations.len(), 1);
        assert_eq!(outcome.locations[0].dir_path, solo);
    }

    #[test]
    fn hidden_directories_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_skill(&dir.path().join(".git"), "sneaky");
        write_skill(dir.path(), "visible");

        let outcome = Scanner::default().scan(&[dir.path().to_path_buf()]);
        assert_eq!(outcome.locations.len(), 1);
        assert!(outcome.locations[0].dir_path.ends_with("visible"));
    }

    #[test]
    fn rescan_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["zeta", "alpha", "mid"] {
            write_skill(dir.path(), name);
        }
        let scanner = Scanner::default();
        let first = scanner.scan(&[dir.path().to_path_buf()]);
        let second = scanner.scan(&[dir.path().to_path_buf()]);
        assert_eq!(first.locations, second.locations);
    }
}
