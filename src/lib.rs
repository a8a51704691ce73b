//! flowsetup - boundary conditions and job scripts for flow simulation setup
//!
//! This library provides two independent pieces of setup tooling:
//! - [`model`]: inlets and outlets of a simulation domain, the plane each one
//!   occupies, and the display form of their sinusoidal pressure
//! - [`template`]: filling `$name` job-script templates from ambient values
//!   and writing them as `<name>.sh`
//!
//! # Example
//!
//! ```rust
//! use flowsetup::model::{Attributes, Iolet, IoletKind};
//!
//! let mut args = Attributes::new();
//! args.insert("Centre".to_string(), [1.0, 2.0, 3.0].into());
//! args.insert("Radius".to_string(), 2.0_f64.into());
//!
//! let outlet = Iolet::from_attributes(IoletKind::Outlet, args).unwrap();
//! let plane = outlet.plane();
//! assert_eq!(plane.center.to_array(), [1.0, 2.0, 3.0]);
//! assert_eq!(plane.axis2().length(), 4.0);
//! ```

pub mod config;
pub mod geometry;
pub mod model;
pub mod template;

pub use config::{ConfigError, ProjectConfig};
pub use geometry::{Plane, Vector3};
pub use model::{Iolet, IoletKind, ModelError, Role, SetupSnapshot, SnapshotError};
pub use template::{Bindings, TemplateError, TemplateFiller};

use thiserror::Error;

/// Errors from any part of the setup tooling
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Load a saved setup and describe each boundary's plane and pressure
///
/// One block per iolet, e.g.
///
/// ```text
/// Inlet "in0"
///   centre:   (1, 2, 3)
///   normal:   (0, 0, 1)
///   axis1:    (4, 0, 0)
///   axis2:    (0, 4, 0)
///   pressure: p = 80.00 + 10.00 cos(wt + 90°)
/// ```
pub fn describe_snapshot(snapshot: &SetupSnapshot) -> String {
    snapshot
        .iolets
        .iter()
        .map(describe_iolet)
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe_iolet(iolet: &Iolet) -> String {
    let plane = iolet.plane();
    let mut out = match iolet.name() {
        Some(name) => format!("{} {:?}\n", iolet.kind(), name),
        None => format!("{}\n", iolet.kind()),
    };
    out.push_str(&format!("  centre:   {}\n", plane.center));
    out.push_str(&format!("  normal:   {}\n", plane.normal));
    out.push_str(&format!("  axis1:    {}\n", plane.axis1()));
    out.push_str(&format!("  axis2:    {}\n", plane.axis2()));
    if iolet.kind().has_pressure() {
        out.push_str(&format!("  pressure: {}\n", iolet.pressure_equation()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_plain_iolet() {
        let snapshot = SetupSnapshot::new(vec![Iolet::new(IoletKind::Plain).with_radius(1.0)]);
        let text = describe_snapshot(&snapshot);
        assert!(text.starts_with("Iolet\n"));
        assert!(text.contains("axis1:    (2, 0, 0)"));
        assert!(!text.contains("pressure"));
    }

    #[test]
    fn test_describe_named_inlet() {
        let snapshot = SetupSnapshot::new(vec![Iolet::new(IoletKind::Inlet)
            .with_name("in0")
            .with_pressure([80.0, 10.0, 90.0])]);
        let text = describe_snapshot(&snapshot);
        assert!(text.starts_with("Inlet \"in0\"\n"));
        assert!(text.contains("pressure: p = 80.00 + 10.00 cos(wt + 90°)"));
    }

    #[test]
    fn test_error_conversion() {
        let err: SetupError = TemplateError::MissingOutputName.into();
        assert!(matches!(err, SetupError::Template(_)));
    }
}
