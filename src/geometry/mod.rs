//! 3D geometry primitives used by the boundary-condition model
//!
//! This module provides vectors, pivoted rotations, and the finite plane
//! patches that describe where an inlet or outlet cuts the domain.

pub mod plane;
pub mod transform;
pub mod types;

pub use plane::Plane;
pub use transform::RotationTransform;
pub use types::Vector3;
