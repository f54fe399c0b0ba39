use glam::DVec3;

use super::tree::{KinematicTree, SolverAxes};
use crate::config::ConfigError;
use crate::math::{angle_from_vector, rotate3d};
use crate::path::ToolPathStep;

/// Offset between the B stage's reference orientation and the
/// tool-pointing direction. Calibration constant of the reference
/// machine geometry, not a derived quantity.
const B_AXIS_REFERENCE_OFFSET_DEG: f64 = 90.0;

/// Reconciles the machine's authoring frame with its kinematic frame
/// for the tool-carriage offset. Calibrated to the reference machine.
fn permute_yz(v: DVec3) -> DVec3 {
    DVec3::new(v.x, v.z, v.y)
}

/// Inverse-kinematics solver for the five designated joints.
///
/// Solves orientation first (the two rotary stages from the desired
/// surface normal), then position (the three linear carriages,
/// pre-compensated for the tool-tip displacement the rotary stages
/// introduce by swinging the tool around its off-center pivot). The
/// split is valid because orientation does not depend on the linear
/// joints in this machine architecture.
#[derive(Debug, Clone, Copy)]
pub struct IkSolver {
    axes: SolverAxes,
}

impl IkSolver {
    /// Binds the solver to the tree's designated axes.
    ///
    /// Fails if the configuration did not assign all five solver
    /// roles, so a misconfigured machine surfaces before the first
    /// tick rather than mid-simulation.
    pub fn new(tree: &KinematicTree) -> Result<Self, ConfigError> {
        let axes = tree.solver_axes().ok_or(ConfigError::SolverAxesUnbound)?;
        Ok(Self { axes })
    }

    /// Writes the joint values that place the tool tip at
    /// `step.position` (millimeters) with the tool pointing along
    /// `step.normal`.
    ///
    /// Always produces exactly one deterministic solution; there is no
    /// singularity detection. `step.normal` is assumed unit-length and
    /// finite — a scaled normal skews only the solved angles (the
    /// planar angle extraction is scale-invariant per component pair),
    /// and non-finite inputs propagate through the arithmetic
    /// unchecked.
    pub fn solve(&self, tree: &mut KinematicTree, step: &ToolPathStep) {
        let normal = step.normal;

        let angle_around_z = angle_from_vector(normal.x, -normal.y);
        tree.node_mut(self.axes.a).set_angle_deg(angle_around_z);

        // View the normal in the A stage's local frame by undoing the
        // rotation just solved.
        let derotated = rotate3d(normal, -angle_around_z, DVec3::Z);
        let angle_around_y = angle_from_vector(derotated.x, derotated.z);
        let b_angle = angle_around_y - B_AXIS_REFERENCE_OFFSET_DEG;
        tree.node_mut(self.axes.b).set_angle_deg(b_angle);

        // Tool-tip offset from the B pivot in the unrotated reference
        // frame, then after the solved B and A rotations in sequence.
        let b_node = tree.node(self.axes.b);
        let tool_offset_ref = permute_yz(b_node.relative_translation + b_node.tool_end_offset);
        let tool_offset_rotated = rotate3d(
            rotate3d(tool_offset_ref, b_angle, DVec3::Y),
            angle_around_z,
            DVec3::Z,
        );
        let compensation = tool_offset_rotated - tool_offset_ref;

        tree.node_mut(self.axes.x)
            .set_position_mm(step.position.x - compensation.x * 1000.0);
        tree.node_mut(self.axes.y)
            .set_position_mm(step.position.y - compensation.y * 1000.0);
        tree.node_mut(self.axes.z)
            .set_position_mm(step.position.z - compensation.z * 1000.0);

        log::debug!(
            "ik solve: pos {:?} normal {:?} -> a {:.4} b {:.4} comp {:?}",
            step.position,
            step.normal,
            angle_around_z,
            b_angle,
            compensation
        );
    }
}
