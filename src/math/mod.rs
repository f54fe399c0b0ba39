//! Math utilities module
//!
//! Provides convenient re-exports from glam and the angle/rotation
//! conventions the kinematics engine is calibrated against.

mod angles;

pub use angles::{angle_from_vector, rotate3d};

// Re-export commonly used glam types
pub use glam::{DMat3, DVec3};
