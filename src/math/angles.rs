//! Planar angle extraction and axis-weighted rotation.
//!
//! Both functions reproduce the numeric conventions the IK solver is
//! calibrated against. `angle_from_vector` is a quadrant-patched
//! arctangent with explicit axis cases, not `atan2`; `rotate3d` blends
//! elementary rotation matrices by a weight vector instead of composing
//! rotations. Downstream angle tie-breaking depends on both conventions,
//! so neither should be swapped for the textbook equivalent.

use glam::{DMat3, DVec3};

/// Polar angle of the 2D vector `(x, y)` in degrees, in `[0, 360)`.
///
/// Axis-aligned inputs return exact 0/90/180/270; the zero vector
/// returns 0.
pub fn angle_from_vector(x: f64, y: f64) -> f64 {
    if x == 0.0 && y == 0.0 {
        0.0
    } else if x == 0.0 {
        if y > 0.0 {
            90.0
        } else {
            270.0
        }
    } else if y == 0.0 {
        if x > 0.0 {
            0.0
        } else {
            180.0
        }
    } else {
        let base = (y / x).atan().to_degrees();
        if x < 0.0 {
            180.0 + base
        } else if y < 0.0 {
            360.0 + base
        } else {
            base
        }
    }
}

/// Rotates `v` by `angle_deg` degrees around the axis selected by the
/// one-hot `axis_weights` vector.
///
/// The rotation matrix is the weighted sum of the three elementary
/// matrices, each scaled by the matching weight component. For a
/// one-hot weight vector this reduces to the elementary rotation;
/// blending two non-zero weights does not produce a valid rotation, so
/// callers must only pass one-hot vectors.
pub fn rotate3d(v: DVec3, angle_deg: f64, axis_weights: DVec3) -> DVec3 {
    let a = angle_deg.to_radians();
    let (s, c) = a.sin_cos();

    // Columns are the transpose of the row-major reference tables.
    let rot_x = DMat3::from_cols(
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(0.0, c, -s),
        DVec3::new(0.0, s, c),
    );
    let rot_y = DMat3::from_cols(
        DVec3::new(c, 0.0, s),
        DVec3::new(0.0, 1.0, 0.0),
        DVec3::new(-s, 0.0, c),
    );
    let rot_z = DMat3::from_cols(
        DVec3::new(c, -s, 0.0),
        DVec3::new(s, c, 0.0),
        DVec3::new(0.0, 0.0, 1.0),
    );

    let blended = rot_x * axis_weights.x + rot_y * axis_weights.y + rot_z * axis_weights.z;
    blended * v
}
