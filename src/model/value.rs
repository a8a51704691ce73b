//! Dynamic attribute values exchanged at the keyword/snapshot boundary

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::Vector3;

/// Mapping from attribute name to value, as accepted by construction and
/// produced by serialization
pub type Attributes = BTreeMap<String, AttributeValue>;

/// A loosely typed attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// No value (an unnamed iolet's `Name`)
    None,
    Number(f64),
    Text(String),
    Vector(Vector3),
    List(Vec<AttributeValue>),
}

impl AttributeValue {
    pub fn is_none(&self) -> bool {
        matches!(self, AttributeValue::None)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Interpret as a 3-vector: either a `Vector` or a list of exactly three numbers
    pub fn as_vector(&self) -> Option<Vector3> {
        match self {
            AttributeValue::Vector(v) => Some(*v),
            AttributeValue::List(items) => match items.as_slice() {
                [x, y, z] => Some(Vector3::new(x.as_number()?, y.as_number()?, z.as_number()?)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Canonical form: every list of exactly three numbers, at any depth,
    /// becomes a `Vector`. Snapshot TOML reads such lists back as vectors,
    /// so only canonical values round-trip.
    pub fn canonical(self) -> Self {
        match self {
            AttributeValue::List(items) => {
                let list = AttributeValue::List(
                    items.into_iter().map(AttributeValue::canonical).collect(),
                );
                list.as_vector().map(AttributeValue::Vector).unwrap_or(list)
            }
            other => other,
        }
    }

    /// Whether a list item, at any depth, is `None`; TOML cannot store one
    pub fn has_nested_none(&self) -> bool {
        match self {
            AttributeValue::List(items) => items
                .iter()
                .any(|item| item.is_none() || item.has_nested_none()),
            _ => false,
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        AttributeValue::Number(n)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Text(s)
    }
}

impl From<Option<String>> for AttributeValue {
    fn from(s: Option<String>) -> Self {
        s.map_or(AttributeValue::None, AttributeValue::Text)
    }
}

impl From<Vector3> for AttributeValue {
    fn from(v: Vector3) -> Self {
        AttributeValue::Vector(v)
    }
}

impl From<[f64; 3]> for AttributeValue {
    fn from(v: [f64; 3]) -> Self {
        AttributeValue::Vector(v.into())
    }
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeValue::None => write!(f, "none"),
            AttributeValue::Number(n) => write!(f, "{}", n),
            AttributeValue::Text(s) => write!(f, "{:?}", s),
            AttributeValue::Vector(v) => write!(f, "{}", v),
            AttributeValue::List(items) => {
                let parts: Vec<String> = items.iter().map(|i| i.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_of_three_numbers_is_vector() {
        let v = AttributeValue::List(vec![1.0_f64.into(), 2.0_f64.into(), 3.0_f64.into()]);
        assert_eq!(v.as_vector(), Some(Vector3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_list_with_text_is_not_vector() {
        let v = AttributeValue::List(vec![1.0_f64.into(), "two".into(), 3.0_f64.into()]);
        assert_eq!(v.as_vector(), None);
    }

    #[test]
    fn test_short_list_is_not_vector() {
        let v = AttributeValue::List(vec![1.0_f64.into(), 2.0_f64.into()]);
        assert_eq!(v.as_vector(), None);
    }

    #[test]
    fn test_canonical_turns_number_triples_into_vectors() {
        let nested = AttributeValue::List(vec![
            AttributeValue::List(vec![1.0_f64.into(), 2.0_f64.into(), 3.0_f64.into()]),
            "tag".into(),
        ]);
        assert_eq!(
            nested.canonical(),
            AttributeValue::List(vec![[1.0, 2.0, 3.0].into(), "tag".into()])
        );

        let pair = AttributeValue::List(vec![1.0_f64.into(), 2.0_f64.into()]);
        assert_eq!(pair.clone().canonical(), pair);
    }

    #[test]
    fn test_nested_none_detection() {
        assert!(!AttributeValue::None.has_nested_none());
        assert!(AttributeValue::List(vec![AttributeValue::None]).has_nested_none());
        assert!(
            AttributeValue::List(vec![AttributeValue::List(vec![AttributeValue::None])])
                .has_nested_none()
        );
        assert!(!AttributeValue::List(vec![1.0_f64.into()]).has_nested_none());
    }

    #[test]
    fn test_optional_text_conversion() {
        assert!(AttributeValue::from(None::<String>).is_none());
        assert_eq!(
            AttributeValue::from(Some("in".to_string())).as_text(),
            Some("in")
        );
    }
}
