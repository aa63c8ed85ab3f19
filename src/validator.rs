//! The three graph checks over the declared dependency map: layer
//! compliance, cycle detection, and the orchestration boundary.
//!
//! All checks run independently; a command can appear in more than one
//! violation category. Violations are returned in a stable order: layer
//! compliance first, then cycles, then boundary.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::loader::DependencyMap;
use crate::registry::LayerRegistry;

/// A structured finding that a declared dependency breaks an
/// architectural rule. Carries enough context to locate and fix the
/// offending declaration without reading the validator source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// A command depends on an equal-or-higher layer.
    Layer {
        command: String,
        command_layer: u32,
        dependency: String,
        dependency_layer: u32,
    },
    /// A command depends on a registered command outside its allow-list.
    Forbidden {
        command: String,
        command_layer: u32,
        dependency: String,
        allowed: Vec<String>,
    },
    /// The declared graph contains a cycle. The path runs from the first
    /// occurrence of the repeated command around to its repetition.
    Circular { cycle: Vec<String> },
    /// A non-orchestration command depends on orchestration commands.
    Boundary {
        command: String,
        dependencies: Vec<String>,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Layer {
                command,
                command_layer,
                dependency,
                dependency_layer,
            } => write!(
                f,
                "LAYER VIOLATION: {} (Layer {}) depends on {} (Layer {}). \
                 Commands can only depend on lower layers.",
                command, command_layer, dependency, dependency_layer
            ),
            Violation::Forbidden {
                command,
                command_layer,
                dependency,
                allowed,
            } => write!(
                f,
                "FORBIDDEN DEPENDENCY: {} (Layer {}) depends on {} which is not in \
                 allowed dependencies: [{}]",
                command,
                command_layer,
                dependency,
                allowed.join(", ")
            ),
            Violation::Circular { cycle } => {
                write!(f, "CIRCULAR DEPENDENCY: {}", cycle.join(" → "))
            }
            Violation::Boundary {
                command,
                dependencies,
            } => write!(
                f,
                "NON-ORCHESTRATION DEPENDENCY: {} (non-orchestration) depends on \
                 orchestration commands: [{}]",
                command,
                dependencies.join(", ")
            ),
        }
    }
}

/// Run all three checks. Pass/fail is simply whether the returned list
/// is empty.
pub fn validate(registry: &LayerRegistry, commands: &DependencyMap) -> Vec<Violation> {
    let mut violations = check_layer_compliance(registry, commands);
    violations.extend(detect_cycles(commands));
    violations.extend(check_orchestration_boundary(registry, commands));
    violations
}

/// Check (a): registered commands may only depend on strictly lower
/// layers, and only on commands in their layer's allow-list. The two
/// rules fire independently. Commands absent from the registry are
/// skipped, as are dependencies on unregistered names.
pub fn check_layer_compliance(
    registry: &LayerRegistry,
    commands: &DependencyMap,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (command, dependencies) in commands {
        let Some(command_layer) = registry.layer_of(command) else {
            continue;
        };
        let allowed = registry.allowed_dependencies(command_layer);

        for dependency in dependencies {
            let Some(dependency_layer) = registry.layer_of(dependency) else {
                continue;
            };

            if dependency_layer >= command_layer {
                violations.push(Violation::Layer {
                    command: command.clone(),
                    command_layer,
                    dependency: dependency.clone(),
                    dependency_layer,
                });
            }

            if !allowed.iter().any(|a| a == dependency) {
                violations.push(Violation::Forbidden {
                    command: command.clone(),
                    command_layer,
                    dependency: dependency.clone(),
                    allowed: allowed.to_vec(),
                });
            }
        }
    }

    violations
}

/// Check (b): depth-first cycle detection over all loaded commands,
/// registered or not. Edges are only followed to dependencies that have
/// loaded entries, so dangling references are never traversed.
///
/// Cycles are deduplicated by canonical rotation: one cycle is reported
/// exactly once no matter how many start points reach it.
pub fn detect_cycles(commands: &DependencyMap) -> Vec<Violation> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut on_stack: HashSet<&str> = HashSet::new();
    let mut path: Vec<&str> = Vec::new();
    let mut seen: HashSet<Vec<String>> = HashSet::new();
    let mut violations = Vec::new();

    for command in commands.keys() {
        if !visited.contains(command.as_str()) {
            dfs(
                command,
                commands,
                &mut visited,
                &mut on_stack,
                &mut path,
                &mut seen,
                &mut violations,
            );
        }
    }

    violations
}

fn dfs<'a>(
    command: &'a str,
    commands: &'a DependencyMap,
    visited: &mut HashSet<&'a str>,
    on_stack: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
    seen: &mut HashSet<Vec<String>>,
    violations: &mut Vec<Violation>,
) {
    if on_stack.contains(command) {
        let start = path.iter().position(|&c| c == command).unwrap_or(0);
        let mut cycle: Vec<String> = path[start..].iter().map(|c| c.to_string()).collect();
        cycle.push(command.to_string());
        if seen.insert(canonical_rotation(&cycle)) {
            violations.push(Violation::Circular { cycle });
        }
        return;
    }
    if visited.contains(command) {
        return;
    }

    visited.insert(command);
    on_stack.insert(command);
    path.push(command);

    if let Some(dependencies) = commands.get(command) {
        for dependency in dependencies {
            if commands.contains_key(dependency) {
                dfs(
                    dependency,
                    commands,
                    visited,
                    on_stack,
                    path,
                    seen,
                    violations,
                );
            }
        }
    }

    path.pop();
    on_stack.remove(command);
}

/// Canonical key for a cycle path: the node sequence without the closing
/// repeat, rotated so the smallest name comes first. Two discoveries of
/// the same cycle from different entry points share one key.
fn canonical_rotation(cycle: &[String]) -> Vec<String> {
    let nodes = &cycle[..cycle.len() - 1];
    let pivot = nodes
        .iter()
        .enumerate()
        .min_by_key(|(_, name)| name.as_str())
        .map(|(i, _)| i)
        .unwrap_or(0);
    nodes[pivot..]
        .iter()
        .chain(nodes[..pivot].iter())
        .cloned()
        .collect()
}

/// Check (c): commands outside the layer architecture must not depend on
/// commands inside it. Such coupling would bypass the layer-compliance
/// check, which only runs for registry members. The inverse direction is
/// intentionally unrestricted.
pub fn check_orchestration_boundary(
    registry: &LayerRegistry,
    commands: &DependencyMap,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (command, dependencies) in commands {
        if registry.layer_of(command).is_some() {
            continue;
        }

        let orchestration_deps: Vec<String> = dependencies
            .iter()
            .filter(|d| registry.layer_of(d).is_some())
            .cloned()
            .collect();

        if !orchestration_deps.is_empty() {
            violations.push(Violation::Boundary {
                command: command.clone(),
                dependencies: orchestration_deps,
            });
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Layer;

    fn map(entries: &[(&str, &[&str])]) -> DependencyMap {
        entries
            .iter()
            .map(|(name, deps)| {
                (
                    name.to_string(),
                    deps.iter().map(|d| d.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_clean_graph_has_no_violations() {
        let registry = LayerRegistry::builtin();
        let commands = map(&[
            ("coordination-hub", &[]),
            ("resource-manager", &[]),
            ("workflow-status", &["coordination-hub"]),
            ("performance-monitor", &["coordination-hub", "resource-manager"]),
        ]);
        assert!(validate(&registry, &commands).is_empty());
    }

    #[test]
    fn test_higher_layer_dependency_is_flagged() {
        let registry = LayerRegistry::builtin();
        let commands = map(&[
            ("workflow-status", &["workflow-recovery"]),
            ("workflow-recovery", &[]),
        ]);

        let violations = check_layer_compliance(&registry, &commands);
        // Both rules fire: layer order and allow-list are independent.
        assert_eq!(violations.len(), 2);
        assert!(matches!(
            &violations[0],
            Violation::Layer {
                command,
                command_layer: 2,
                dependency,
                dependency_layer: 3,
            } if command == "workflow-status" && dependency == "workflow-recovery"
        ));
        assert!(matches!(&violations[1], Violation::Forbidden { .. }));
    }

    #[test]
    fn test_same_layer_dependency_is_flagged() {
        let registry = LayerRegistry::builtin();
        let commands = map(&[("workflow-status", &["performance-monitor"])]);

        let violations = check_layer_compliance(&registry, &commands);
        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::Layer { dependency_layer: 2, .. })));
    }

    #[test]
    fn test_foundation_layer_must_have_zero_dependencies() {
        let registry = LayerRegistry::builtin();
        let commands = map(&[("coordination-hub", &["resource-manager"])]);

        let violations = check_layer_compliance(&registry, &commands);
        assert!(!violations.is_empty());
    }

    #[test]
    fn test_allowlist_fires_even_when_layer_order_passes() {
        // Layer 2 allows only "core", so depending on the lower-layer
        // "util" passes the order rule but fails the allow-list.
        let registry = LayerRegistry::new(vec![
            Layer::new(1, "base", &["core", "util"], &[]),
            Layer::new(2, "apps", &["app"], &["core"]),
        ]);
        let commands = map(&[("app", &["util"]), ("util", &[])]);

        let violations = check_layer_compliance(&registry, &commands);
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            &violations[0],
            Violation::Forbidden { dependency, .. } if dependency == "util"
        ));
    }

    #[test]
    fn test_unregistered_commands_are_exempt_from_layer_checks() {
        let registry = LayerRegistry::builtin();
        let commands = map(&[("deploy-helper", &["release-notes"]), ("release-notes", &[])]);

        let violations = validate(&registry, &commands);
        assert!(violations
            .iter()
            .all(|v| !matches!(v, Violation::Layer { .. } | Violation::Forbidden { .. })));
    }

    #[test]
    fn test_dangling_dependency_is_ignored() {
        let registry = LayerRegistry::builtin();
        let commands = map(&[("workflow-status", &["no-such-command"])]);

        assert!(validate(&registry, &commands).is_empty());
    }

    #[test]
    fn test_three_cycle_reports_sliced_path() {
        let commands = map(&[
            ("alpha", &["beta"]),
            ("beta", &["gamma"]),
            ("gamma", &["alpha"]),
        ]);

        let violations = detect_cycles(&commands);
        assert_eq!(violations.len(), 1);
        let Violation::Circular { cycle } = &violations[0] else {
            panic!("expected a circular violation");
        };
        assert_eq!(cycle, &["alpha", "beta", "gamma", "alpha"]);
    }

    #[test]
    fn test_cycle_reachable_from_multiple_roots_reported_once() {
        let commands = map(&[
            ("entry-one", &["ring-a"]),
            ("entry-two", &["ring-b"]),
            ("ring-a", &["ring-b"]),
            ("ring-b", &["ring-a"]),
        ]);

        let violations = detect_cycles(&commands);
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let commands = map(&[("alpha", &["alpha"])]);

        let violations = detect_cycles(&commands);
        assert_eq!(violations.len(), 1);
        let Violation::Circular { cycle } = &violations[0] else {
            panic!("expected a circular violation");
        };
        assert_eq!(cycle, &["alpha", "alpha"]);
    }

    #[test]
    fn test_cycle_traversal_skips_dangling_edges() {
        let commands = map(&[("alpha", &["ghost", "beta"]), ("beta", &[])]);

        assert!(detect_cycles(&commands).is_empty());
    }

    #[test]
    fn test_boundary_violation_names_orchestration_deps() {
        let registry = LayerRegistry::builtin();
        let commands = map(&[(
            "deploy-helper",
            &["coordination-hub", "release-notes", "orchestrate"],
        )]);

        let violations = check_orchestration_boundary(&registry, &commands);
        assert_eq!(violations.len(), 1);
        let Violation::Boundary {
            command,
            dependencies,
        } = &violations[0]
        else {
            panic!("expected a boundary violation");
        };
        assert_eq!(command, "deploy-helper");
        assert_eq!(dependencies, &["coordination-hub", "orchestrate"]);
    }

    #[test]
    fn test_orchestration_depending_outward_is_allowed() {
        // The boundary is one-directional: registered commands may depend
        // on unregistered ones without tripping this check.
        let registry = LayerRegistry::builtin();
        let commands = map(&[("workflow-status", &["release-notes"]), ("release-notes", &[])]);

        assert!(check_orchestration_boundary(&registry, &commands).is_empty());
    }

    #[test]
    fn test_violation_order_is_stable() {
        let registry = LayerRegistry::builtin();
        let commands = map(&[
            ("alpha", &["beta", "coordination-hub"]),
            ("beta", &["alpha"]),
            ("workflow-status", &["orchestrate"]),
        ]);

        let violations = validate(&registry, &commands);
        let kinds: Vec<&str> = violations
            .iter()
            .map(|v| match v {
                Violation::Layer { .. } => "layer",
                Violation::Forbidden { .. } => "forbidden",
                Violation::Circular { .. } => "circular",
                Violation::Boundary { .. } => "boundary",
            })
            .collect();
        assert_eq!(kinds, vec!["layer", "forbidden", "circular", "boundary"]);
    }

    #[test]
    fn test_display_messages_carry_context() {
        let violation = Violation::Layer {
            command: "workflow-status".to_string(),
            command_layer: 2,
            dependency: "orchestrate".to_string(),
            dependency_layer: 4,
        };
        let message = violation.to_string();
        assert!(message.contains("workflow-status"));
        assert!(message.contains("Layer 2"));
        assert!(message.contains("orchestrate"));
        assert!(message.contains("Layer 4"));
    }
}
