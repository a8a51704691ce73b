//! TOML persistence for a set of boundary conditions
//!
//! Each iolet is stored as one `[[iolets]]` table holding its `kind` and the
//! attribute mapping produced by [`Iolet::to_attributes`]. TOML has no null:
//! an attribute without a value is omitted when its default is also empty
//! (an unnamed iolet's `Name`), and otherwise listed under `unset`.
//!
//! ```toml
//! [[iolets]]
//! kind = "inlet"
//! Name = "in0"
//! Radius = 2.0
//! Centre = { x = 1.0, y = 2.0, z = 3.0 }
//! Pressure = [80.0, 10.0, 90.0]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::SnapshotError;
use super::iolet::{Iolet, IoletKind};
use super::value::{AttributeValue, Attributes};

/// An ordered collection of iolets, as saved with a setup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetupSnapshot {
    pub iolets: Vec<Iolet>,
}

#[derive(Serialize, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    iolets: Vec<IoletRecord>,
}

#[derive(Serialize, Deserialize)]
struct IoletRecord {
    kind: IoletKind,
    /// Attributes explicitly without a value
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    unset: Vec<String>,
    #[serde(flatten)]
    attributes: Attributes,
}

impl SetupSnapshot {
    pub fn new(iolets: Vec<Iolet>) -> Self {
        Self { iolets }
    }

    /// Load a snapshot from a TOML file
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded snapshot from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Write the snapshot to a TOML file, replacing any existing content
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("saved {} iolets to {}", self.iolets.len(), path.display());
        Ok(())
    }

    /// Parse a snapshot from TOML text, rebuilding each iolet through
    /// [`Iolet::from_attributes`]
    pub fn from_toml_str(content: &str) -> Result<Self, SnapshotError> {
        let file: SnapshotFile = toml::from_str(content)?;
        let iolets = file
            .iolets
            .into_iter()
            .enumerate()
            .map(|(index, mut record)| {
                for name in record.unset {
                    record.attributes.entry(name).or_insert(AttributeValue::None);
                }
                Iolet::from_attributes(record.kind, record.attributes)
                    .map_err(|source| SnapshotError::Model { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { iolets })
    }

    pub fn to_toml_string(&self) -> Result<String, SnapshotError> {
        let file = SnapshotFile {
            iolets: self
                .iolets
                .iter()
                .map(IoletRecord::from_iolet)
                .collect(),
        };
        Ok(toml::to_string(&file)?)
    }
}

impl IoletRecord {
    fn from_iolet(iolet: &Iolet) -> Self {
        let mut unset = Vec::new();
        let mut attributes = Attributes::new();
        for (name, value) in iolet.to_attributes() {
            if !value.is_none() {
                attributes.insert(name, value);
            } else if !default_is_none(iolet.kind(), &name) {
                unset.push(name);
            }
        }
        Self {
            kind: iolet.kind(),
            unset,
            attributes,
        }
    }
}

fn default_is_none(kind: IoletKind, name: &str) -> bool {
    kind.attribute_specs()
        .iter()
        .find(|spec| spec.name == name)
        .map_or(true, |spec| spec.default_value().is_none())
}
