//! Declarative machine-topology configuration.
//!
//! A machine is described as a flat list of axis specifications with
//! parent references, validated once and built into the immutable
//! [`KinematicTree`]. Topology never changes after the build; only
//! joint values move during simulation.
//!
//! # TOML Example
//!
//! ```toml
//! [[axis]]
//! name = "base"
//!
//! [[axis]]
//! name = "x_axis"
//! parent = "base"
//! movement = { kind = "linear", axis = "x" }
//! role = "x"
//! ```

use std::path::Path;

use glam::DVec3;
use serde::Deserialize;
use thiserror::Error;

use crate::kinematics::axis::{AxisNode, Movement, NodeId};
use crate::kinematics::tree::{KinematicTree, SolverAxes};

/// Error type for machine-configuration loading and validation.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at the given path.
    #[error("machine configuration file not found: {0}")]
    FileNotFound(String),

    /// Reading the file failed.
    #[error("failed to read machine configuration: {0}")]
    Io(String),

    /// TOML parsing failed.
    #[error("failed to parse machine configuration: {0}")]
    Parse(String),

    /// Semantic validation failed.
    #[error("machine configuration invalid: {0}")]
    Validation(String),

    /// The tree was built without the five solver roles assigned.
    #[error("solver axes not bound; assign the x/y/z/a/b roles in the machine configuration")]
    SolverAxesUnbound,
}

/// World axis a joint moves along or rotates around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionAxis {
    #[default]
    X,
    Y,
    Z,
}

impl MotionAxis {
    fn unit(self) -> DVec3 {
        match self {
            MotionAxis::X => DVec3::X,
            MotionAxis::Y => DVec3::Y,
            MotionAxis::Z => DVec3::Z,
        }
    }
}

/// Whether a joint translates or rotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    #[default]
    Linear,
    Rotational,
}

/// Solver role of a designated joint: the three linear carriages and
/// the two rotary stages the IK solver drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisRole {
    X,
    Y,
    Z,
    A,
    B,
}

/// Movement description of one joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct MovementSpec {
    pub kind: AxisKind,
    pub axis: MotionAxis,
    /// Flips the movement axis, e.g. a carriage that travels along
    /// negative world Z.
    #[serde(default)]
    pub negative: bool,
}

impl MovementSpec {
    fn resolve(self) -> Movement {
        let mut axis = self.axis.unit();
        if self.negative {
            axis = -axis;
        }
        match self.kind {
            AxisKind::Linear => Movement::Linear(axis),
            AxisKind::Rotational => Movement::Rotational(axis),
        }
    }
}

/// Specification of one axis node.
///
/// `parent` refers to an axis declared earlier in the list; exactly one
/// spec (the root) has no parent. Distances are meters, rotations
/// degrees.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisSpec {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub translation: [f64; 3],
    #[serde(default)]
    pub rotation: [f64; 3],
    #[serde(default)]
    pub movement: MovementSpec,
    #[serde(default)]
    pub tool_end_offset: [f64; 3],
    #[serde(default)]
    pub role: Option<AxisRole>,
}

impl AxisSpec {
    /// A root spec with the given name and no movement of consequence
    /// (a linear joint whose value is never driven).
    pub fn base(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            translation: [0.0; 3],
            rotation: [0.0; 3],
            movement: MovementSpec::default(),
            tool_end_offset: [0.0; 3],
            role: None,
        }
    }
}

/// The full machine description: an ordered list of axis specs,
/// parent-before-child.
#[derive(Debug, Clone, Deserialize)]
pub struct MachineConfig {
    #[serde(rename = "axis")]
    pub axes: Vec<AxisSpec>,
}

impl MachineConfig {
    /// Loads and parses a machine description from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validates the description and builds the kinematic tree.
    ///
    /// Checks, once, up front: a single root declared first, parents
    /// resolving to earlier entries (which rules out cycles), unique
    /// names, each solver role assigned at most once and on a joint of
    /// the matching movement kind, and the five roles either all
    /// present or all absent.
    pub fn build(&self) -> Result<KinematicTree, ConfigError> {
        if self.axes.is_empty() {
            return Err(ConfigError::Validation("no axes declared".into()));
        }

        let mut nodes: Vec<AxisNode> = Vec::with_capacity(self.axes.len());
        let mut roles: [Option<NodeId>; 5] = [None; 5];

        for (i, spec) in self.axes.iter().enumerate() {
            if spec.name.is_empty() {
                return Err(ConfigError::Validation(format!("axis {i} has no name")));
            }
            if nodes.iter().any(|n| n.name == spec.name) {
                return Err(ConfigError::Validation(format!(
                    "duplicate axis name '{}'",
                    spec.name
                )));
            }

            match (&spec.parent, i) {
                (None, 0) => {}
                (None, _) => {
                    return Err(ConfigError::Validation(format!(
                        "axis '{}' has no parent but is not the root",
                        spec.name
                    )));
                }
                (Some(_), 0) => {
                    return Err(ConfigError::Validation(
                        "the first axis must be the root and have no parent".into(),
                    ));
                }
                (Some(parent), _) => {
                    let parent_idx = nodes
                        .iter()
                        .position(|n| &n.name == parent)
                        .ok_or_else(|| {
                            ConfigError::Validation(format!(
                                "axis '{}' references unknown parent '{}' (parents must be \
                                 declared before their children)",
                                spec.name, parent
                            ))
                        })?;
                    nodes[parent_idx].children.push(NodeId(i));
                }
            }

            let movement = spec.movement.resolve();
            if let Some(role) = spec.role {
                let linear_role = matches!(role, AxisRole::X | AxisRole::Y | AxisRole::Z);
                if linear_role != matches!(movement, Movement::Linear(_)) {
                    return Err(ConfigError::Validation(format!(
                        "axis '{}' has role {:?} but a {} movement",
                        spec.name,
                        role,
                        if linear_role { "rotational" } else { "linear" }
                    )));
                }
                let slot = &mut roles[role_slot(role)];
                if slot.is_some() {
                    return Err(ConfigError::Validation(format!(
                        "role {role:?} assigned to more than one axis"
                    )));
                }
                *slot = Some(NodeId(i));
            }

            let mut node = AxisNode::new(spec.name.clone(), movement);
            node.relative_translation = DVec3::from_array(spec.translation);
            node.relative_rotation = DVec3::from_array(spec.rotation);
            node.tool_end_offset = DVec3::from_array(spec.tool_end_offset);
            nodes.push(node);
        }

        let solver_axes = match roles {
            [Some(x), Some(y), Some(z), Some(a), Some(b)] => Some(SolverAxes { x, y, z, a, b }),
            [None, None, None, None, None] => None,
            _ => {
                let assigned = roles.iter().filter(|r| r.is_some()).count();
                return Err(ConfigError::Validation(format!(
                    "{assigned} of 5 solver roles assigned; assign either all of x/y/z/a/b or none"
                )));
            }
        };

        log::info!(
            "built kinematic tree: {} axes, solver roles {}",
            nodes.len(),
            if solver_axes.is_some() { "bound" } else { "unbound" }
        );

        Ok(KinematicTree { nodes, solver_axes })
    }
}

fn role_slot(role: AxisRole) -> usize {
    match role {
        AxisRole::X => 0,
        AxisRole::Y => 1,
        AxisRole::Z => 2,
        AxisRole::A => 3,
        AxisRole::B => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, parent: Option<&str>) -> AxisSpec {
        AxisSpec {
            parent: parent.map(Into::into),
            ..AxisSpec::base(name)
        }
    }

    #[test]
    fn builds_a_simple_tree() {
        let config = MachineConfig {
            axes: vec![
                spec("base", None),
                spec("left", Some("base")),
                spec("right", Some("base")),
                spec("tool", Some("right")),
            ],
        };
        let tree = config.build().unwrap();

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.node(tree.root()).children(), &[NodeId(1), NodeId(2)]);
        assert_eq!(tree.find("tool"), Some(NodeId(3)));
        assert!(tree.solver_axes().is_none());
    }

    #[test]
    fn rejects_unknown_parent() {
        let config = MachineConfig {
            axes: vec![spec("base", None), spec("x", Some("nope"))],
        };
        assert!(matches!(config.build(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn rejects_second_root() {
        let config = MachineConfig {
            axes: vec![spec("base", None), spec("floating", None)],
        };
        assert!(matches!(config.build(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn rejects_duplicate_names() {
        let config = MachineConfig {
            axes: vec![spec("base", None), spec("base", Some("base"))],
        };
        assert!(matches!(config.build(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn rejects_duplicate_roles() {
        let mut a = spec("a", Some("base"));
        a.movement.kind = AxisKind::Linear;
        a.role = Some(AxisRole::X);
        let mut b = spec("b", Some("base"));
        b.movement.kind = AxisKind::Linear;
        b.role = Some(AxisRole::X);

        let config = MachineConfig {
            axes: vec![spec("base", None), a, b],
        };
        assert!(matches!(config.build(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn rejects_role_on_wrong_movement_kind() {
        let mut a = spec("a", Some("base"));
        a.movement.kind = AxisKind::Linear;
        a.role = Some(AxisRole::A);

        let config = MachineConfig {
            axes: vec![spec("base", None), a],
        };
        assert!(matches!(config.build(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn rejects_partial_role_assignment() {
        let mut x = spec("x", Some("base"));
        x.role = Some(AxisRole::X);

        let config = MachineConfig {
            axes: vec![spec("base", None), x],
        };
        assert!(matches!(config.build(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn parses_toml() {
        let text = r#"
            [[axis]]
            name = "base"

            [[axis]]
            name = "x_axis"
            parent = "base"
            translation = [-1.5, 4.55, 0.35]
            movement = { kind = "linear", axis = "x" }

            [[axis]]
            name = "b_axis"
            parent = "x_axis"
            movement = { kind = "rotational", axis = "z", negative = true }
            tool_end_offset = [0.0, -0.75, 0.0]
        "#;
        let config: MachineConfig = toml::from_str(text).unwrap();
        let tree = config.build().unwrap();

        assert_eq!(tree.len(), 3);
        let x = tree.node(tree.find("x_axis").unwrap());
        assert_eq!(x.relative_translation, DVec3::new(-1.5, 4.55, 0.35));
        let b = tree.node(tree.find("b_axis").unwrap());
        assert_eq!(b.rotational_axis(), DVec3::new(0.0, 0.0, -1.0));
        assert_eq!(b.tool_end_offset, DVec3::new(0.0, -0.75, 0.0));
    }
}
