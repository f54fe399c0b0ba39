use glam::DVec3;

/// Stable index of an axis node in its [`KinematicTree`] arena.
///
/// [`KinematicTree`]: super::KinematicTree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The single degree of freedom of an axis: translation along or
/// rotation around a fixed world axis. The payload is the signed unit
/// movement axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Movement {
    Linear(DVec3),
    Rotational(DVec3),
}

/// One joint of the machine.
///
/// Local pose (`relative_translation`, `relative_rotation`) and the
/// movement role are fixed at construction. `joint_value` is the only
/// field mutated during simulation; the absolute pose is derived output
/// of the forward pass, recomputed wholesale every tick.
#[derive(Debug, Clone)]
pub struct AxisNode {
    pub name: String,
    pub relative_translation: DVec3,
    pub relative_rotation: DVec3,
    pub movement: Movement,
    /// Meters for linear joints, degrees for rotational joints.
    pub joint_value: f64,
    /// Node origin to physical tool tip; non-zero only on the tool carrier.
    pub tool_end_offset: DVec3,
    pub absolute_translation: DVec3,
    pub absolute_rotation: DVec3,
    pub(crate) children: Vec<NodeId>,
}

impl AxisNode {
    pub fn new(name: impl Into<String>, movement: Movement) -> Self {
        Self {
            name: name.into(),
            relative_translation: DVec3::ZERO,
            relative_rotation: DVec3::ZERO,
            movement,
            joint_value: 0.0,
            tool_end_offset: DVec3::ZERO,
            absolute_translation: DVec3::ZERO,
            absolute_rotation: DVec3::ZERO,
            children: Vec::new(),
        }
    }

    /// Movement axis if this joint is linear, zero otherwise. Keeps the
    /// forward-pass formulas branch-free.
    pub fn linear_axis(&self) -> DVec3 {
        match self.movement {
            Movement::Linear(axis) => axis,
            Movement::Rotational(_) => DVec3::ZERO,
        }
    }

    /// Movement axis if this joint is rotational, zero otherwise.
    pub fn rotational_axis(&self) -> DVec3 {
        match self.movement {
            Movement::Rotational(axis) => axis,
            Movement::Linear(_) => DVec3::ZERO,
        }
    }

    pub fn is_linear(&self) -> bool {
        matches!(self.movement, Movement::Linear(_))
    }

    pub fn is_rotational(&self) -> bool {
        matches!(self.movement, Movement::Rotational(_))
    }

    /// Sets a linear joint position given millimeters; stored in meters.
    pub fn set_position_mm(&mut self, value_mm: f64) {
        self.joint_value = value_mm / 1000.0;
    }

    /// Sets a rotational joint angle in degrees.
    pub fn set_angle_deg(&mut self, value_deg: f64) {
        self.joint_value = value_deg;
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
