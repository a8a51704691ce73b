//! Rotation transformation utilities for orienting plane patches.
//!
//! ## Rotation Convention
//!
//! Rotations follow the right-hand rule: a positive angle turns
//! counter-clockwise when looking down the rotation axis towards the pivot.
//! Angles are in degrees.
//! - 0° = no rotation
//! - 90° about +Z = +X becomes +Y
//! - 180° about any axis = directions perpendicular to the axis are reversed
//!
//! Points are rotated about an arbitrary pivot (translate to the pivot,
//! rotate, translate back); directions are rotated without translation.

use super::types::Vector3;

/// A 3D rotation about an axis passing through a pivot point.
#[derive(Debug, Clone, Copy)]
pub struct RotationTransform {
    /// Rotation angle in degrees (right-hand rule about `axis`)
    pub angle_degrees: f64,
    /// Rotation axis; need not be unit length
    pub axis: Vector3,
    /// Point the axis passes through
    pub center: Vector3,
}

impl RotationTransform {
    /// Create a new rotation transform.
    ///
    /// # Arguments
    /// * `angle_degrees` - Rotation angle in degrees
    /// * `axis` - Axis of rotation (normalized internally)
    /// * `center` - Pivot point the axis passes through
    pub fn new(angle_degrees: f64, axis: Vector3, center: Vector3) -> Self {
        Self {
            angle_degrees,
            axis,
            center,
        }
    }

    /// Check if this is effectively a no-op.
    ///
    /// A zero angle or a zero-length axis both leave every point in place.
    pub fn is_identity(&self) -> bool {
        self.angle_degrees.abs() < f64::EPSILON || self.axis.normalized().is_none()
    }

    /// Rotate a direction vector (no pivot translation) using Rodrigues' formula:
    /// ```text
    /// v' = v cos(θ) + (k × v) sin(θ) + k (k · v)(1 - cos(θ))
    /// ```
    /// where `k` is the unit axis.
    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        let Some(k) = self.axis.normalized() else {
            return v;
        };
        if self.angle_degrees.abs() < f64::EPSILON {
            return v;
        }

        let radians = self.angle_degrees.to_radians();
        let cos_a = radians.cos();
        let sin_a = radians.sin();

        v * cos_a + k.cross(v) * sin_a + k * (k.dot(v) * (1.0 - cos_a))
    }

    /// Rotate a point around the pivot.
    pub fn transform_point(&self, point: Vector3) -> Vector3 {
        if self.is_identity() {
            return point;
        }
        self.center + self.transform_vector(point - self.center)
    }
}
