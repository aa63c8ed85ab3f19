//! Directory scanning: one dependency-map entry per command file.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::command::CommandFile;

/// Command name to ordered declared dependencies. A BTreeMap keeps
/// iteration deterministic, so repeated runs over an unchanged directory
/// produce identical violation lists.
pub type DependencyMap = BTreeMap<String, Vec<String>>;

/// Outcome of scanning a commands directory.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Every `*.md` file yields exactly one entry, even when its
    /// dependency list is empty.
    pub commands: DependencyMap,
    /// Per-file problems downgraded from errors. These are emitted as
    /// warnings and never count as violations.
    pub diagnostics: Vec<String>,
}

/// Scan a directory of command files into a dependency map.
///
/// A missing or unreadable directory is fatal. A single malformed file is
/// not: that command is recorded with an empty dependency list and a
/// diagnostic, and the scan continues. Subdirectories are not entered.
pub fn load_commands(dir: &Path) -> Result<ScanResult> {
    if !dir.is_dir() {
        anyhow::bail!("Commands directory not found: {}", dir.display());
    }

    let mut result = ScanResult::default();

    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read commands directory {}", dir.display()))?;

    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to list entry in {}", dir.display()))?;
        let path = entry.path();

        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        match CommandFile::load(&path) {
            Ok(cmd) => {
                result.commands.insert(cmd.name, cmd.dependencies);
            }
            Err(e) => {
                result
                    .diagnostics
                    .push(format!("{}: {:#}", path.display(), e));
                result.commands.insert(name.to_string(), Vec::new());
            }
        }
    }

    Ok(result)
}
