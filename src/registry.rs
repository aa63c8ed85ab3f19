//! The authored layer registry: which commands sit in which tier, and
//! which dependencies each tier is allowed to take.
//!
//! The registry is data, constructed once and passed explicitly to the
//! validator. Tests inject alternate registries through [`LayerRegistry::new`].

use std::collections::{BTreeSet, HashMap};

/// One tier of the dependency architecture.
///
/// `allowed_dependencies` is authored alongside the member list; it is the
/// full set of lower-layer commands this tier may depend on, not derived
/// automatically.
#[derive(Debug, Clone)]
pub struct Layer {
    pub number: u32,
    pub name: String,
    pub commands: Vec<String>,
    pub allowed_dependencies: Vec<String>,
}

impl Layer {
    pub fn new(number: u32, name: &str, commands: &[&str], allowed: &[&str]) -> Self {
        Self {
            number,
            name: name.to_string(),
            commands: commands.iter().map(|c| c.to_string()).collect(),
            allowed_dependencies: allowed.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Immutable mapping from layer number to member commands and allow-list,
/// with a reverse command-to-layer index built at construction.
#[derive(Debug, Clone)]
pub struct LayerRegistry {
    layers: Vec<Layer>,
    command_to_layer: HashMap<String, u32>,
}

impl LayerRegistry {
    /// Build a registry from authored layers.
    pub fn new(layers: Vec<Layer>) -> Self {
        let mut command_to_layer = HashMap::new();
        for layer in &layers {
            for command in &layer.commands {
                command_to_layer.insert(command.clone(), layer.number);
            }
        }
        Self {
            layers,
            command_to_layer,
        }
    }

    /// The built-in four-layer orchestration architecture.
    ///
    /// Layer 1 is the foundation and must have zero dependencies; each
    /// higher layer may depend on the full membership of the layers below.
    pub fn builtin() -> Self {
        Self::new(vec![
            Layer::new(
                1,
                "Core Foundation Services",
                &["coordination-hub", "resource-manager"],
                &[],
            ),
            Layer::new(
                2,
                "Monitoring and Status Services",
                &["workflow-status", "performance-monitor"],
                &["coordination-hub", "resource-manager"],
            ),
            Layer::new(
                3,
                "Advanced Workflow Services",
                &["workflow-recovery", "progress-aggregator", "dependency-resolver"],
                &[
                    "coordination-hub",
                    "resource-manager",
                    "workflow-status",
                    "performance-monitor",
                ],
            ),
            Layer::new(
                4,
                "Complete Workflow Orchestration",
                &["orchestrate"],
                &[
                    "coordination-hub",
                    "resource-manager",
                    "workflow-status",
                    "performance-monitor",
                    "workflow-recovery",
                    "progress-aggregator",
                    "dependency-resolver",
                ],
            ),
        ])
    }

    /// Look up the layer a command is assigned to, if any.
    pub fn layer_of(&self, command: &str) -> Option<u32> {
        self.command_to_layer.get(command).copied()
    }

    /// The allow-list for a layer. Unknown layer numbers get an empty slice.
    pub fn allowed_dependencies(&self, layer: u32) -> &[String] {
        self.layers
            .iter()
            .find(|l| l.number == layer)
            .map(|l| l.allowed_dependencies.as_slice())
            .unwrap_or(&[])
    }

    /// Every command registered in any layer.
    pub fn all_commands(&self) -> BTreeSet<&str> {
        self.command_to_layer.keys().map(|c| c.as_str()).collect()
    }

    /// Layers in tier order, for report rendering.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }
}
