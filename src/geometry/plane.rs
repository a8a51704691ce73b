//! Finite plane patches
//!
//! A [`Plane`] is a parallelogram described by an origin corner and two
//! neighbouring corners (`point1`, `point2`). The edge vectors run from the
//! origin to those corners; the centre and unit normal are kept in sync with
//! the corners by every operation.

use super::transform::RotationTransform;
use super::types::Vector3;

/// A finite planar patch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub origin: Vector3,
    pub point1: Vector3,
    pub point2: Vector3,
    pub center: Vector3,
    pub normal: Vector3,
}

impl Default for Plane {
    /// Unit square in the XY plane centred on the origin
    fn default() -> Self {
        Self::square(0.5)
    }
}

impl Plane {
    /// Build a patch from its origin corner and the two neighbouring corners.
    ///
    /// The normal is `axis1 × axis2`. When the edges are degenerate (zero
    /// length or parallel) the normal falls back to +Z.
    pub fn from_corners(origin: Vector3, point1: Vector3, point2: Vector3) -> Self {
        let axis1 = point1 - origin;
        let axis2 = point2 - origin;
        Self {
            origin,
            point1,
            point2,
            center: origin + (axis1 + axis2) * 0.5,
            normal: axis1.cross(axis2).normalized().unwrap_or(Vector3::unit_z()),
        }
    }

    /// Square of half-width `half_width` in the XY plane, centred on the origin
    pub fn square(half_width: f64) -> Self {
        let r = half_width;
        Self::from_corners(
            Vector3::new(-r, -r, 0.0),
            Vector3::new(r, -r, 0.0),
            Vector3::new(-r, r, 0.0),
        )
    }

    /// Edge vector from the origin to `point1`
    pub fn axis1(&self) -> Vector3 {
        self.point1 - self.origin
    }

    /// Edge vector from the origin to `point2`
    pub fn axis2(&self) -> Vector3 {
        self.point2 - self.origin
    }

    /// The four corners in winding order
    pub fn corners(&self) -> [Vector3; 4] {
        [
            self.origin,
            self.point1,
            self.point1 + self.axis2(),
            self.point2,
        ]
    }

    pub fn area(&self) -> f64 {
        self.axis1().cross(self.axis2()).length()
    }

    /// Translate the patch so its centre lands on `center`
    pub fn set_center(&mut self, center: Vector3) {
        let shift = center - self.center;
        self.origin = self.origin + shift;
        self.point1 = self.point1 + shift;
        self.point2 = self.point2 + shift;
        self.center = center;
    }

    /// Rotate the patch about its centre so its normal points along `normal`.
    ///
    /// Parallel normals leave the patch untouched; antiparallel normals flip
    /// it 180° about the first edge. A zero-length `normal` is ignored and
    /// the current orientation kept.
    pub fn set_normal(&mut self, normal: Vector3) {
        let Some(target) = normal.normalized() else {
            return;
        };

        let dp = self.normal.dot(target);
        let rotation = if dp >= 1.0 {
            None
        } else if dp <= -1.0 {
            Some(RotationTransform::new(180.0, self.axis1(), self.center))
        } else {
            Some(RotationTransform::new(
                dp.acos().to_degrees(),
                self.normal.cross(target),
                self.center,
            ))
        };

        if let Some(rotation) = rotation {
            self.origin = rotation.transform_point(self.origin);
            self.point1 = rotation.transform_point(self.point1);
            self.point2 = rotation.transform_point(self.point2);
        }
        self.normal = target;
    }

    /// Builder form of [`Plane::set_center`]
    pub fn centered_at(mut self, center: Vector3) -> Self {
        self.set_center(center);
        self
    }

    /// Builder form of [`Plane::set_normal`]
    pub fn oriented_to(mut self, normal: Vector3) -> Self {
        self.set_normal(normal);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: Vector3, b: Vector3) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_default_is_unit_square() {
        let p = Plane::default();
        assert_eq!(p.origin, Vector3::new(-0.5, -0.5, 0.0));
        assert_eq!(p.center, Vector3::zero());
        assert_eq!(p.normal, Vector3::unit_z());
        assert_eq!(p.area(), 1.0);
    }

    #[test]
    fn test_set_center_translates_corners() {
        let p = Plane::square(1.0).centered_at(Vector3::new(10.0, 0.0, -2.0));
        assert_eq!(p.origin, Vector3::new(9.0, -1.0, -2.0));
        assert_eq!(p.point1, Vector3::new(11.0, -1.0, -2.0));
        assert_eq!(p.point2, Vector3::new(9.0, 1.0, -2.0));
    }

    #[test]
    fn test_set_normal_tilts_about_center() {
        let center = Vector3::new(1.0, 2.0, 3.0);
        let p = Plane::square(2.0)
            .centered_at(center)
            .oriented_to(Vector3::new(1.0, 0.0, 0.0));

        // 90° about +Y: the first edge now runs along -Z
        assert!(approx_eq(p.axis1(), Vector3::new(0.0, 0.0, -4.0)), "axis1 = {}", p.axis1());
        assert!(approx_eq(p.axis2(), Vector3::new(0.0, 4.0, 0.0)), "axis2 = {}", p.axis2());
        assert!(approx_eq(p.corners()[0].midpoint(p.corners()[2]), center));
        assert_eq!(p.normal, Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_set_normal_antiparallel_flips() {
        let p = Plane::square(1.0).oriented_to(Vector3::new(0.0, 0.0, -5.0));
        assert_eq!(p.normal, -Vector3::unit_z());
        let computed = p.axis1().cross(p.axis2()).normalized().unwrap();
        assert!(approx_eq(computed, -Vector3::unit_z()), "normal = {}", computed);
        assert!((p.area() - 4.0).abs() < EPSILON);
    }

    #[test]
    fn test_zero_normal_keeps_orientation() {
        let p = Plane::square(1.0).oriented_to(Vector3::zero());
        assert_eq!(p, Plane::square(1.0));
    }

    #[test]
    fn test_degenerate_square_collapses_to_point() {
        let p = Plane::square(0.0)
            .centered_at(Vector3::new(4.0, 4.0, 4.0))
            .oriented_to(Vector3::new(0.0, 1.0, 1.0));
        assert_eq!(p.axis1().length(), 0.0);
        assert_eq!(p.axis2().length(), 0.0);
        assert_eq!(p.center, Vector3::new(4.0, 4.0, 4.0));
    }
}
