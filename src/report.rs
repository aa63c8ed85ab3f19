//! Human-readable report rendering. Pure string formatting of the
//! validator's output; color stays in the CLI layer.

use crate::loader::DependencyMap;
use crate::registry::LayerRegistry;
use crate::validator::Violation;

const RULE: &str = "================================================================================";

/// Render the full validation report: architecture summary, pass/fail
/// banner, per-category violation blocks, and the complete dependency
/// mapping with resolved layers.
pub fn render_report(
    registry: &LayerRegistry,
    commands: &DependencyMap,
    violations: &[Violation],
) -> String {
    let mut report = Vec::new();
    report.push(RULE.to_string());
    report.push("COMMAND DEPENDENCY VALIDATION REPORT".to_string());
    report.push(RULE.to_string());
    report.push(String::new());

    report.push("LAYER ARCHITECTURE:".to_string());
    for layer in registry.layers() {
        report.push(format!("  Layer {}: {}", layer.number, layer.name));
        report.push(format!("    Commands: {}", layer.commands.join(", ")));
        if layer.allowed_dependencies.is_empty() {
            report.push("    Dependencies: None (foundation layer)".to_string());
        } else {
            report.push(format!(
                "    Dependencies: {}",
                layer.allowed_dependencies.join(", ")
            ));
        }
        report.push(String::new());
    }

    if violations.is_empty() {
        report.push("✅ VALIDATION PASSED".to_string());
        report.push("All dependencies comply with the layer architecture.".to_string());
        report.push("No circular dependencies detected.".to_string());
    } else {
        report.push("❌ VALIDATION FAILED".to_string());
        report.push(format!("Found {} violations:", violations.len()));
        report.push(String::new());

        push_category(
            &mut report,
            "LAYER COMPLIANCE VIOLATIONS:",
            violations,
            |v| matches!(v, Violation::Layer { .. } | Violation::Forbidden { .. }),
        );
        push_category(
            &mut report,
            "CIRCULAR DEPENDENCY VIOLATIONS:",
            violations,
            |v| matches!(v, Violation::Circular { .. }),
        );
        push_category(
            &mut report,
            "ORCHESTRATION BOUNDARY VIOLATIONS:",
            violations,
            |v| matches!(v, Violation::Boundary { .. }),
        );
    }

    report.push("CURRENT DEPENDENCY MAPPING:".to_string());
    for (command, dependencies) in commands {
        let layer = match registry.layer_of(command) {
            Some(number) => format!("Layer {}", number),
            None => "non-orchestration".to_string(),
        };
        if dependencies.is_empty() {
            report.push(format!("  {} ({}): no dependencies", command, layer));
        } else {
            report.push(format!(
                "  {} ({}): {}",
                command,
                layer,
                dependencies.join(", ")
            ));
        }
    }

    report.push(String::new());
    report.push(RULE.to_string());

    report.join("\n")
}

fn push_category(
    report: &mut Vec<String>,
    heading: &str,
    violations: &[Violation],
    select: impl Fn(&Violation) -> bool,
) {
    let selected: Vec<&Violation> = violations.iter().filter(|v| select(v)).collect();
    if selected.is_empty() {
        return;
    }
    report.push(heading.to_string());
    for violation in selected {
        report.push(format!("  • {}", violation));
    }
    report.push(String::new());
}
