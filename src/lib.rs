//! # Stratum - Layered Dependency Validation
//!
//! Stratum validates the dependency architecture of a set of command files.
//! Each command is a markdown file whose YAML frontmatter declares the
//! commands it depends on; an authored layer registry assigns commands to
//! ordered tiers and fixes which dependencies each tier may take.
//!
//! ## Overview
//!
//! Validation runs three independent checks over the declared graph:
//!
//! - **Layer compliance**: commands only depend on strictly lower layers,
//!   and only on commands in their layer's allow-list
//! - **Cycle detection**: the declared graph must be acyclic
//! - **Orchestration boundary**: commands outside the layer architecture
//!   must not depend on commands inside it
//!
//! Violations are data, not errors: they are collected, ordered, and
//! rendered, never thrown.
//!
//! ## Modules
//!
//! - [`registry`] - The authored layer table and its lookups
//! - [`command`] - Frontmatter parsing for a single command file
//! - [`loader`] - Directory scanning into a dependency map
//! - [`validator`] - The three graph checks
//! - [`report`] - Human-readable report rendering
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use stratum::loader::load_commands;
//! use stratum::registry::LayerRegistry;
//! use stratum::validator::validate;
//!
//! let registry = LayerRegistry::builtin();
//! let scan = load_commands(Path::new(".claude/commands")).expect("scan failed");
//! let violations = validate(&registry, &scan.commands);
//!
//! if violations.is_empty() {
//!     println!("architecture is clean");
//! }
//! ```

pub mod command;
pub mod loader;
pub mod registry;
pub mod report;
pub mod validator;

/// Default path constants for the command directory layout.
pub mod paths {
    /// Directory containing command files: `.claude/commands`
    pub const COMMANDS_DIR: &str = ".claude/commands";
}
