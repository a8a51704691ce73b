//! Boundary-condition model for the mesh setup
//!
//! An [`Iolet`] is a flow boundary: a finite plane where fluid enters or
//! leaves the domain. Pressure-driven kinds add a sinusoidal pressure
//! `p(t) = average + amplitude · cos(ωt + phase)` and a display string for it.
//!
//! Iolets are built from keyword mappings ([`Attributes`]) so that a saved
//! setup can be reconstructed exactly; [`SetupSnapshot`] persists a list of
//! them as TOML.
//!
//! # Example
//!
//! ```rust
//! use flowsetup::model::{Iolet, IoletKind};
//!
//! let inlet = Iolet::new(IoletKind::Inlet)
//!     .with_centre([1.0, 2.0, 3.0])
//!     .with_radius(2.0)
//!     .with_pressure([80.0, 10.0, 90.0]);
//!
//! assert_eq!(inlet.plane().axis1().length(), 4.0);
//! assert_eq!(inlet.pressure_equation(), "p = 80.00 + 10.00 cos(wt + 90°)");
//! ```

pub mod dependency;
pub mod error;
pub mod iolet;
pub mod snapshot;
pub mod value;

pub use dependency::DependencyRegistry;
pub use error::{ModelError, SnapshotError};
pub use iolet::{AttributeSpec, Iolet, IoletKind, Role};
pub use snapshot::SetupSnapshot;
pub use value::{AttributeValue, Attributes};
