use serde::Serialize;
use std::path::{Path, PathBuf};

use skillcheck_core::{Result, SkillcheckError};

use crate::references::extract_references;

/// Declared metadata parsed from the frontmatter block of a SKILL.md file.
///
/// `name` and `description` are required; everything else is optional.
/// Malformed optional fields never fail the parse — they are recorded as
/// [`FieldIssue`]s so the rule engine can surface them as warnings.
#[derive(Debug, Clone, Serialize)]
pub struct Frontmatter {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_tools: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Coercion issues on optional fields (warning material, never fatal).
    #[serde(skip)]
    pub issues: Vec<FieldIssue>,
}

/// A non-fatal shape problem on an optional frontmatter field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

/// One skill package, constructed by scanning the filesystem.
#[derive(Debug, Clone, Serialize)]
pub struct SkillPackage {
    /// The containing directory's name — the package's declared identity
    /// must match this.
    pub dir_name: String,
    /// Base directory of the skill (parent of SKILL.md).
    pub dir_path: PathBuf,
    /// Absolute path to the SKILL.md file.
    pub file_path: PathBuf,
    pub frontmatter: Frontmatter,
    /// The Markdown body after the closing frontmatter delimiter.
    #[serde(skip)]
    pub body: String,
    /// Distinct relative paths the body references, in first-seen order.
    pub referenced_files: Vec<String>,
}

impl SkillPackage {
    /// Load and parse a SKILL.md file into a package.
    pub fn from_file(skill_md: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(skill_md)?;
        let dir_path = skill_md.parent().unwrap_or(Path::new(".")).to_path_buf();
        Self::parse(&content, skill_md.to_path_buf(), dir_path)
    }

    /// Parse SKILL.md content with known path info.
    pub fn parse(content: &str, file_path: PathBuf, dir_path: PathBuf) -> Result<Self> {
        let (frontmatter_block, body) = split_frontmatter(content)?;
        let frontmatter = parse_frontmatter(&frontmatter_block)?;

        if frontmatter.name.is_empty() {
            return Err(SkillcheckError::MissingField("name".into()));
        }
        if frontmatter.description.is_empty() {
            return Err(SkillcheckError::MissingField("description".into()));
        }

        let dir_name = dir_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let referenced_files = extract_references(&body);

        Ok(Self {
            dir_name,
            dir_path,
            file_path,
            frontmatter,
            body,
            referenced_files,
        })
    }
}

/// Split a SKILL.md file into its frontmatter block and Markdown body.
///
/// The block opens with a line containing only `---` and closes at the next
/// such line. Everything after the closing delimiter is the body.
fn split_frontmatter(content: &str) -> Result<(String, String)> {
    let lines: Vec<&str> = content.lines().collect();

    let first = lines
        .iter()
        .position(|l| !l.trim().is_empty())
        .unwrap_or(0);
    if lines.get(first).map(|l| l.trim()) != Some("---") {
        return Err(SkillcheckError::MalformedFrontmatter {
            line: first + 1,
            reason: "file must begin with a '---' frontmatter delimiter".into(),
        });
    }

    let close = lines[first + 1..]
        .iter()
        .position(|l| l.trim() == "---")
        .map(|i| first + 1 + i)
        .ok_or(SkillcheckError::MalformedFrontmatter {
            line: lines.len(),
            reason: "missing closing '---' frontmatter delimiter".into(),
        })?;

    let block = lines[first + 1..close].join("\n");
    let body = lines[close + 1..].join("\n").trim().to_string();

    Ok((block, body))
}

/// Parse the YAML-subset frontmatter used by SKILL.md files.
///
/// Supports `key: value` scalars, bracketed inline lists, comma-separated
/// lists, and block-style lists (`- item` lines under a bare key). Unknown
/// keys are ignored.
fn parse_frontmatter(block: &str) -> Result<Frontmatter> {
    let mut fm = Frontmatter {
        name: String::new(),
        description: String::new(),
        allowed_tools: Vec::new(),
        category: None,
        tags: Vec::new(),
        version: None,
        issues: Vec::new(),
    };

    let lines: Vec<&str> = block.lines().collect();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();
        i += 1;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();

        match key {
            "name" => fm.name = unquote(value),
            "description" => fm.description = unquote(value),
            "category" => fm.category = non_empty(unquote(value)),
            "version" => fm.version = non_empty(unquote(value)),
            "tags" | "allowed-tools" => {
                let (items, consumed) = parse_list(value, &lines[i..]);
                i += consumed;
                match items {
                    Some(list) => {
                        if key == "tags" {
                            fm.tags = list;
                        } else {
                            fm.allowed_tools = list;
                        }
                    }
                    None => fm.issues.push(FieldIssue {
                        field: key.into(),
                        message: format!("'{key}' must be a list of strings"),
                    }),
                }
            }
            _ => {} // ignore unknown keys
        }
    }

    Ok(fm)
}

/// Parse a list value: `[a, b]`, `a, b`, or a block of `- item` lines when
/// the inline value is empty. Returns the items plus how many following
/// lines were consumed, or `None` when the value cannot be read as a list.
fn parse_list(value: &str, rest: &[&str]) -> (Option<Vec<String>>, usize) {
    if value.is_empty() {
        let mut items = Vec::new();
        let mut consumed = 0;
        for line in rest {
            let trimmed = line.trim();
            if let Some(item) = trimmed.strip_prefix('-') {
                items.push(unquote(item.trim()));
                consumed += 1;
            } else if trimmed.is_empty() {
                consumed += 1;
            } else {
                break;
            }
        }
        if items.is_empty() {
            return (None, consumed);
        }
        return (Some(items), consumed);
    }

    if value.starts_with('{') {
        return (None, 0);
    }
    if value.starts_with('[') && !value.ends_with(']') {
        return (None, 0);
    }

    let inner = value.trim_start_matches('[').trim_end_matches(']');
    let items: Vec<String> = inner
        .split(',')
        .map(|t| unquote(t.trim()))
        .filter(|t| !t.is_empty())
        .collect();
    (Some(items), 0)
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

/// Remove surrounding quotes from a YAML value.
fn unquote(s: &str) -> String {
    let s = s.trim();
    if s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"'))
            || (s.starts_with('\'') && s.ends_with('\'')))
    {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<SkillPackage> {
        SkillPackage::parse(
            content,
            PathBuf::from("/skills/test-skill/SKILL.md"),
            PathBuf::from("/skills/test-skill"),
        )
    }

    #[test]
    fn parse_full_frontmatter() {
        let content = r#"---
name: test-skill
description: A test skill for unit testing
version: 2.0.0
category: java
tags: [testing, demo]
allowed-tools: [Read, Bash]
---

# Test Skill

## Instructions
1. Do step one
2. See [the guide](references/guide.md)
"#;
        let pkg = parse(content).unwrap();
        assert_eq!(pkg.frontmatter.name, "test-skill");
        assert_eq!(pkg.frontmatter.description, "A test skill for unit testing");
        assert_eq!(pkg.frontmatter.version.as_deref(), Some("2.0.0"));
        assert_eq!(pkg.frontmatter.category.as_deref(), Some("java"));
        assert_eq!(pkg.frontmatter.tags, vec!["testing", "demo"]);
        assert_eq!(pkg.frontmatter.allowed_tools, vec!["Read", "Bash"]);
        assert!(pkg.frontmatter.issues.is_empty());
        assert_eq!(pkg.dir_name, "test-skill");
        assert!(pkg.body.contains("# Test Skill"));
        assert_eq!(pkg.referenced_files, vec!["references/guide.md"]);
    }

    #[test]
    fn parse_minimal_skill() {
        let content = "---\nname: minimal\ndescription: A minimal skill\n---\n\n# Minimal\nJust do it.";
        let pkg = parse(content).unwrap();
        assert_eq!(pkg.frontmatter.name, "minimal");
        assert!(pkg.frontmatter.version.is_none());
        assert!(pkg.frontmatter.tags.is_empty());
        assert_eq!(pkg.body, "# Minimal\nJust do it.");
    }

    #[test]
    fn block_style_lists_parsed() {
        let content = "---\nname: block\ndescription: Block list skill\ntags:\n  - java\n  - spring\n---\n\n# Block";
        let pkg = parse(content).unwrap();
        assert_eq!(pkg.frontmatter.tags, vec!["java", "spring"]);
        assert!(pkg.frontmatter.issues.is_empty());
    }

    #[test]
    fn bare_list_key_records_issue() {
        let content = "---\nname: bad-tags\ndescription: Tags with no value\ntags:\n---\n\n# Bad";
        let pkg = parse(content).unwrap();
        assert!(pkg.frontmatter.tags.is_empty());
        assert_eq!(pkg.frontmatter.issues.len(), 1);
        assert_eq!(pkg.frontmatter.issues[0].field, "tags");
    }

    #[test]
    fn flow_mapping_list_records_issue() {
        let content =
            "---\nname: map-tags\ndescription: Tags given as a mapping\ntags: {a: 1}\n---\n\n# Bad";
        let pkg = parse(content).unwrap();
        assert_eq!(pkg.frontmatter.issues.len(), 1);
        assert!(pkg.frontmatter.issues[0].message.contains("list of strings"));
    }

    #[test]
    fn missing_frontmatter_errors_with_line() {
        let content = "# No frontmatter\nJust markdown.";
        match parse(content) {
            Err(SkillcheckError::MalformedFrontmatter { line, .. }) => assert_eq!(line, 1),
            other => panic!("expected MalformedFrontmatter, got {other:?}"),
        }
    }

    #[test]
    fn unclosed_frontmatter_errors() {
        let content = "---\nname: unclosed\ndescription: Never closed\n\n# Body";
        assert!(matches!(
            parse(content),
            Err(SkillcheckError::MalformedFrontmatter { .. })
        ));
    }

    #[test]
    fn missing_name_errors() {
        let content = "---\ndescription: No name\n---\nBody.";
        match parse(content) {
            Err(SkillcheckError::MissingField(f)) => assert_eq!(f, "name"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn missing_description_errors() {
        let content = "---\nname: no-desc\n---\nBody.";
        match parse(content) {
            Err(SkillcheckError::MissingField(f)) => assert_eq!(f, "description"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn quoted_values_parsed() {
        let content = "---\nname: \"quoted-skill\"\ndescription: 'Single quoted'\n---\n\nBody.";
        let pkg = SkillPackage::parse(
            content,
            PathBuf::from("/skills/quoted-skill/SKILL.md"),
            PathBuf::from("/skills/quoted-skill"),
        )
        .unwrap();
        assert_eq!(pkg.frontmatter.name, "quoted-skill");
        assert_eq!(pkg.frontmatter.description, "Single quoted");
    }

    #[test]
    fn unknown_keys_ignored() {
        let content = "---\nname: extra\ndescription: Has extra keys\nlicense: MIT\nmetadata: x\n---\n\nBody.";
        let pkg = parse(content).unwrap();
        assert_eq!(pkg.frontmatter.name, "extra");
        assert!(pkg.frontmatter.issues.is_empty());
    }

    #[test]
    fn from_file_works() {
        let dir = tempfile::tempdir().unwrap();
        let skill_dir = dir.path().join("my-skill");
        std::fs::create_dir_all(&skill_dir).unwrap();
        let skill_path = skill_dir.join("SKILL.md");
        std::fs::write(
            &skill_path,
            "---\nname: my-skill\ndescription: From file test\n---\n\n# My Skill\n\nInstructions here.",
        )
        .unwrap();

        let pkg = SkillPackage::from_file(&skill_path).unwrap();
        assert_eq!(pkg.frontmatter.name, "my-skill");
        assert_eq!(pkg.dir_name, "my-skill");
        assert_eq!(pkg.dir_path, skill_dir);
        assert!(pkg.body.contains("# My Skill"));
    }
}
