//! Command file parsing: frontmatter extraction and the
//! `dependent-commands` field.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A single command declaration: the file's base name plus the ordered
/// list of dependencies it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFile {
    pub name: String,
    pub dependencies: Vec<String>,
}

/// Separate the leading YAML frontmatter block from the rest of a
/// command file.
///
/// A block is delimited by a `---` marker pair at the very start of the
/// file. Yields the block's inner text plus the body after it; without a
/// complete block the whole content is body.
pub fn split_frontmatter(content: &str) -> (Option<String>, &str) {
    let content = content.trim();

    let Some(rest) = content.strip_prefix("---") else {
        return (None, content);
    };

    match rest.find("---") {
        Some(end) => {
            let frontmatter = rest[..end].to_string();
            let body = rest[end + 3..].trim_start();
            (Some(frontmatter), body)
        }
        None => (None, content),
    }
}

/// The `dependent-commands` value as authored: either the conventional
/// comma-separated scalar or a YAML sequence.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DependsField {
    Csv(String),
    List(Vec<String>),
}

impl DependsField {
    fn into_names(self) -> Vec<String> {
        let raw: Vec<String> = match self {
            DependsField::Csv(line) => line.split(',').map(|s| s.to_string()).collect(),
            DependsField::List(items) => items,
        };
        raw.iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect()
    }
}

#[derive(Debug, Deserialize, Default)]
struct CommandFrontmatter {
    #[serde(rename = "dependent-commands", default)]
    dependent_commands: Option<DependsField>,
}

impl CommandFile {
    /// Parse a command declaration from file content.
    ///
    /// Missing frontmatter or a missing `dependent-commands` field both
    /// mean zero dependencies. Unparseable frontmatter is an error; the
    /// loader downgrades it to a diagnostic plus an empty list.
    pub fn parse(name: &str, content: &str) -> Result<Self> {
        let (frontmatter_str, _body) = split_frontmatter(content);

        let frontmatter: CommandFrontmatter = if let Some(fm) = frontmatter_str {
            serde_yaml::from_str(&fm).context("Failed to parse command frontmatter")?
        } else {
            CommandFrontmatter::default()
        };

        let dependencies = frontmatter
            .dependent_commands
            .map(DependsField::into_names)
            .unwrap_or_default();

        Ok(Self {
            name: name.to_string(),
            dependencies,
        })
    }

    /// Load a command declaration from a file path. The file's base name
    /// (sans extension) is the command's identifier.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read command from {}", path.display()))?;

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid command filename: {}", path.display()))?;

        Self::parse(name, &content)
    }
}
