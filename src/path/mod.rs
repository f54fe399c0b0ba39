//! Tool-path streams.
//!
//! The kinematics core consumes an ordered, finite, restartable
//! sequence of [`ToolPathStep`]s and indexes it cyclically, one step
//! per simulation tick. How the steps were produced is opaque to the
//! core; [`ToolPath::circle`] is the reference generator used by the
//! demo.

use std::f64::consts::TAU;

use glam::DVec3;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ToolPathError {
    #[error("tool path contains no steps")]
    Empty,
}

/// One sample of the desired tool-tip pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolPathStep {
    /// Desired tool-tip position in the linear-axis world frame, millimeters.
    pub position: DVec3,
    /// Desired surface normal, unit length.
    pub normal: DVec3,
}

impl ToolPathStep {
    pub fn new(position: DVec3, normal: DVec3) -> Self {
        Self { position, normal }
    }
}

/// An ordered, never-empty sequence of tool-path steps with cyclic
/// indexing: the step after the last is the first again.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolPath {
    steps: Vec<ToolPathStep>,
}

impl ToolPath {
    pub fn new(steps: Vec<ToolPathStep>) -> Result<Self, ToolPathError> {
        if steps.is_empty() {
            return Err(ToolPathError::Empty);
        }
        Ok(Self { steps })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        false // construction rejects empty paths
    }

    pub fn steps(&self) -> &[ToolPathStep] {
        &self.steps
    }

    /// Cyclic access: `index` wraps modulo the path length.
    pub fn step(&self, index: usize) -> &ToolPathStep {
        &self.steps[index % self.steps.len()]
    }

    /// Reference path generator: `segments` points around a unit circle
    /// in X/Y (scaled to millimeters) centered at `offset`, the height
    /// oscillating at twice the angular rate, the normal leaning
    /// outward with a non-negative vertical component.
    pub fn circle(segments: usize, offset: DVec3) -> Result<Self, ToolPathError> {
        let steps = (0..segments)
            .map(|i| {
                let t = i as f64 / segments as f64 * TAU;
                let position = DVec3::new(
                    t.cos() + offset.x,
                    t.sin() + offset.y,
                    (t * 2.0).sin() + offset.z,
                ) * 1000.0;
                let normal = DVec3::new(t.cos(), t.sin(), t.cos().abs()).normalize();
                ToolPathStep::new(position, normal)
            })
            .collect();
        Self::new(steps)
    }
}
