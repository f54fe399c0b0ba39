use glam::DVec3;

use super::axis::{AxisNode, NodeId};

/// Handles to the five designated solver joints: three linear carriages
/// and the two rotary stages of the tool carriage.
#[derive(Debug, Clone, Copy)]
pub struct SolverAxes {
    pub x: NodeId,
    pub y: NodeId,
    pub z: NodeId,
    pub a: NodeId,
    pub b: NodeId,
}

/// The machine's kinematic chain: an arena of [`AxisNode`]s with the
/// root at index 0. Topology is fixed once built (see
/// [`MachineConfig::build`]); only joint values and the derived
/// absolute poses change during simulation.
///
/// [`MachineConfig::build`]: crate::config::MachineConfig::build
#[derive(Debug, Clone)]
pub struct KinematicTree {
    pub(crate) nodes: Vec<AxisNode>,
    pub(crate) solver_axes: Option<SolverAxes>,
}

impl KinematicTree {
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &AxisNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut AxisNode {
        &mut self.nodes[id.0]
    }

    pub fn nodes(&self) -> impl Iterator<Item = &AxisNode> + '_ {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks a node up by name. Intended for diagnostics and for
    /// rendering layers that key meshes by axis name.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    /// The designated solver joints, if the configuration bound all five.
    pub fn solver_axes(&self) -> Option<SolverAxes> {
        self.solver_axes
    }

    /// Recomputes the absolute pose of every node from the current
    /// joint values, depth-first from the root with an identity parent
    /// pose.
    ///
    /// Per node: the local translation is the relative translation plus
    /// `joint_value` along the linear movement axis; the local rotation
    /// is the relative rotation plus `joint_value` around the
    /// rotational movement axis. Absolute pose is the component-wise
    /// sum with the parent's absolute pose — rotations compose
    /// additively as Euler sums, which holds for this machine because
    /// every rotary axis is fixed and orthogonal in the reference pose.
    ///
    /// Must run after any joint value changes and before consumers read
    /// poses. Idempotent for unchanged joint values.
    pub fn forward_kinematics(&mut self) {
        if self.nodes.is_empty() {
            return;
        }
        self.propagate(NodeId(0), DVec3::ZERO, DVec3::ZERO);
    }

    fn propagate(&mut self, id: NodeId, parent_translation: DVec3, parent_rotation: DVec3) {
        let node = &mut self.nodes[id.0];
        let local_translation = node.relative_translation + node.joint_value * node.linear_axis();
        node.absolute_translation = local_translation + parent_translation;

        let local_rotation = node.relative_rotation + node.joint_value * node.rotational_axis();
        node.absolute_rotation = local_rotation + parent_rotation;

        let abs_t = node.absolute_translation;
        let abs_r = node.absolute_rotation;

        let mut i = 0;
        while i < self.nodes[id.0].children.len() {
            let child = self.nodes[id.0].children[i];
            self.propagate(child, abs_t, abs_r);
            i += 1;
        }
    }
}
