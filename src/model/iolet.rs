//! Boundary conditions across which fluid can flow

use serde::{Deserialize, Serialize};

use crate::geometry::{Plane, Vector3};

use super::dependency::DependencyRegistry;
use super::error::ModelError;
use super::value::{AttributeValue, Attributes};

/// Attribute names
pub const NAME: &str = "Name";
pub const CENTRE: &str = "Centre";
pub const NORMAL: &str = "Normal";
pub const RADIUS: &str = "Radius";
pub const PRESSURE: &str = "Pressure";

/// Derived property names
pub const PLANE: &str = "Plane";
pub const PRESSURE_EQUATION: &str = "PressureEquation";

/// Which flavour of boundary an [`Iolet`] is.
///
/// `Plain` carries geometry only. The other kinds add a sinusoidal pressure;
/// `Inlet` and `Outlet` differ from `SinusoidalPressure` only by their [`Role`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IoletKind {
    Plain,
    SinusoidalPressure,
    Inlet,
    Outlet,
}

/// Flow direction of a boundary relative to the domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Inlet,
    Outlet,
}

impl Role {
    /// Sign of the flow through the boundary, positive into the domain
    pub fn flow_sign(self) -> f64 {
        match self {
            Role::Inlet => 1.0,
            Role::Outlet => -1.0,
        }
    }
}

/// A recognized attribute and the factory for its default value
#[derive(Debug, Clone, Copy)]
pub struct AttributeSpec {
    pub name: &'static str,
    default: fn() -> AttributeValue,
}

impl AttributeSpec {
    /// A freshly built default; never shared between instances
    pub fn default_value(&self) -> AttributeValue {
        (self.default)()
    }
}

fn default_name() -> AttributeValue {
    AttributeValue::None
}

fn default_centre() -> AttributeValue {
    Vector3::zero().into()
}

fn default_normal() -> AttributeValue {
    Vector3::unit_z().into()
}

fn default_radius() -> AttributeValue {
    0.5_f64.into()
}

fn default_pressure() -> AttributeValue {
    Vector3::new(80.0, 0.0, 0.0).into()
}

const GEOMETRY_ATTRIBUTES: &[AttributeSpec] = &[
    AttributeSpec { name: NAME, default: default_name },
    AttributeSpec { name: CENTRE, default: default_centre },
    AttributeSpec { name: NORMAL, default: default_normal },
    AttributeSpec { name: RADIUS, default: default_radius },
];

const PRESSURE_ATTRIBUTES: &[AttributeSpec] = &[
    AttributeSpec { name: NAME, default: default_name },
    AttributeSpec { name: CENTRE, default: default_centre },
    AttributeSpec { name: NORMAL, default: default_normal },
    AttributeSpec { name: RADIUS, default: default_radius },
    AttributeSpec { name: PRESSURE, default: default_pressure },
];

impl IoletKind {
    /// Whether this kind carries a time-varying pressure
    pub fn has_pressure(self) -> bool {
        !matches!(self, IoletKind::Plain)
    }

    pub fn role(self) -> Option<Role> {
        match self {
            IoletKind::Inlet => Some(Role::Inlet),
            IoletKind::Outlet => Some(Role::Outlet),
            _ => None,
        }
    }

    /// The recognized attributes, in declaration order
    pub fn attribute_specs(self) -> &'static [AttributeSpec] {
        if self.has_pressure() {
            PRESSURE_ATTRIBUTES
        } else {
            GEOMETRY_ATTRIBUTES
        }
    }

    pub fn attribute_names(self) -> Vec<&'static str> {
        self.attribute_specs().iter().map(|s| s.name).collect()
    }

    pub fn recognizes(self, name: &str) -> bool {
        self.attribute_specs().iter().any(|s| s.name == name)
    }
}

impl std::fmt::Display for IoletKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            IoletKind::Plain => "Iolet",
            IoletKind::SinusoidalPressure => "SinusoidalPressureIolet",
            IoletKind::Inlet => "Inlet",
            IoletKind::Outlet => "Outlet",
        };
        f.write_str(s)
    }
}

/// A named flow boundary: a disc of `radius` at `centre` facing `normal`,
/// optionally driven by a sinusoidal pressure `(average, amplitude, phase°)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Iolet {
    kind: IoletKind,
    name: Option<String>,
    centre: Vector3,
    normal: Vector3,
    radius: f64,
    /// Present iff the kind has pressure; kept loosely typed because its
    /// only consumer is the best-effort display string
    pressure: Option<AttributeValue>,
    dependencies: DependencyRegistry,
}

impl Iolet {
    /// Create an iolet of `kind` with every attribute at its default
    pub fn new(kind: IoletKind) -> Self {
        let mut dependencies = DependencyRegistry::new();
        for attribute in [CENTRE, NORMAL, RADIUS] {
            dependencies.add_dependency(PLANE, attribute);
        }
        if kind.has_pressure() {
            for component in ["x", "y", "z"] {
                dependencies.add_dependency(PRESSURE_EQUATION, format!("{PRESSURE}.{component}"));
            }
        }

        Self {
            kind,
            name: None,
            centre: Vector3::zero(),
            normal: Vector3::unit_z(),
            radius: 0.5,
            pressure: kind.has_pressure().then(default_pressure),
            dependencies,
        }
    }

    /// Construct from a keyword mapping.
    ///
    /// Each recognized attribute takes the supplied value or a fresh default.
    /// Keys outside the recognized set are rejected.
    pub fn from_attributes(kind: IoletKind, mut attributes: Attributes) -> Result<Self, ModelError> {
        if let Some(unexpected) = attributes.keys().find(|k| !kind.recognizes(k)) {
            return Err(ModelError::unexpected(kind, unexpected.as_str()));
        }

        let mut iolet = Self::new(kind);
        for spec in kind.attribute_specs() {
            let value = attributes
                .remove(spec.name)
                .unwrap_or_else(|| spec.default_value());
            iolet.assign(spec.name, value)?;
        }
        Ok(iolet)
    }

    /// Every recognized attribute with its current value; feeding this back
    /// to [`Iolet::from_attributes`] reproduces the iolet
    pub fn to_attributes(&self) -> Attributes {
        self.kind
            .attribute_specs()
            .iter()
            .filter_map(|spec| Some((spec.name.to_string(), self.attribute(spec.name)?)))
            .collect()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_centre(mut self, centre: impl Into<Vector3>) -> Self {
        self.centre = centre.into();
        self
    }

    pub fn with_normal(mut self, normal: impl Into<Vector3>) -> Self {
        self.normal = normal.into();
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Set the pressure; no effect on kinds without a pressure, or for a
    /// value that [`Iolet::set_attribute`] would reject
    pub fn with_pressure(mut self, pressure: impl Into<AttributeValue>) -> Self {
        if self.kind.has_pressure() {
            if let Ok(value) = pressure_value(pressure.into()) {
                self.pressure = Some(value);
            }
        }
        self
    }

    pub fn kind(&self) -> IoletKind {
        self.kind
    }

    pub fn role(&self) -> Option<Role> {
        self.kind.role()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn centre(&self) -> Vector3 {
        self.centre
    }

    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn pressure(&self) -> Option<&AttributeValue> {
        self.pressure.as_ref()
    }

    pub fn dependencies(&self) -> &DependencyRegistry {
        &self.dependencies
    }

    /// Read an attribute by path: a top-level name or a vector component
    /// such as `Centre.x`
    pub fn attribute(&self, path: &str) -> Option<AttributeValue> {
        if let Some((attribute, component)) = path.split_once('.') {
            let v = self.vector_attribute(attribute)?;
            return component_of(v, component).map(AttributeValue::Number);
        }

        match path {
            NAME => Some(self.name.clone().into()),
            CENTRE => Some(self.centre.into()),
            NORMAL => Some(self.normal.into()),
            RADIUS => Some(self.radius.into()),
            PRESSURE => self.pressure.clone(),
            _ => None,
        }
    }

    /// Mutate an attribute by path and report the derived properties that
    /// are now stale.
    pub fn set_attribute(
        &mut self,
        path: &str,
        value: impl Into<AttributeValue>,
    ) -> Result<Vec<String>, ModelError> {
        let value = value.into();
        match path.split_once('.') {
            Some((attribute, component)) => self.assign_component(attribute, component, value)?,
            None if self.kind.recognizes(path) => self.assign(path, value)?,
            None => return Err(ModelError::unknown(self.kind, path)),
        }

        Ok(self
            .dependencies
            .dependents_of(path)
            .into_iter()
            .map(String::from)
            .collect())
    }

    /// The finite plane patch this boundary occupies.
    ///
    /// Built as a `2 × radius` square in the XY plane, moved to `centre`, then
    /// rotated about `centre` to face `normal`. A zero normal keeps the +Z
    /// orientation; a zero radius collapses the patch onto `centre`.
    pub fn plane(&self) -> Plane {
        Plane::square(self.radius)
            .centered_at(self.centre)
            .oriented_to(self.normal)
    }

    /// Human-readable pressure, e.g. `p = 80.00 + 10.00 cos(wt + 90°)`.
    ///
    /// Never fails: a missing or malformed pressure yields an empty string.
    pub fn pressure_equation(&self) -> String {
        self.pressure
            .as_ref()
            .and_then(AttributeValue::as_vector)
            .map(|p| {
                format!(
                    "p = {} + {} cos(wt + {}°)",
                    fixed(p.x, 2),
                    fixed(p.y, 2),
                    fixed(p.z, 0)
                )
            })
            .unwrap_or_default()
    }

    fn assign(&mut self, name: &str, value: AttributeValue) -> Result<(), ModelError> {
        match name {
            NAME => {
                self.name = match value {
                    AttributeValue::None => None,
                    AttributeValue::Text(s) => Some(s),
                    _ => return Err(ModelError::invalid(NAME, "text or none")),
                };
            }
            CENTRE => {
                self.centre = value
                    .as_vector()
                    .ok_or_else(|| ModelError::invalid(CENTRE, "a 3-vector"))?;
            }
            NORMAL => {
                self.normal = value
                    .as_vector()
                    .ok_or_else(|| ModelError::invalid(NORMAL, "a 3-vector"))?;
            }
            RADIUS => {
                self.radius = value
                    .as_number()
                    .ok_or_else(|| ModelError::invalid(RADIUS, "a number"))?;
            }
            PRESSURE if self.kind.has_pressure() => self.pressure = Some(pressure_value(value)?),
            _ => return Err(ModelError::unknown(self.kind, name)),
        }
        Ok(())
    }

    fn assign_component(
        &mut self,
        attribute: &str,
        component: &str,
        value: AttributeValue,
    ) -> Result<(), ModelError> {
        let path = format!("{attribute}.{component}");
        let mut v = self
            .vector_attribute(attribute)
            .ok_or_else(|| ModelError::unknown(self.kind, path.as_str()))?;
        let n = value
            .as_number()
            .ok_or_else(|| ModelError::invalid(path.as_str(), "a number"))?;
        match component {
            "x" => v.x = n,
            "y" => v.y = n,
            "z" => v.z = n,
            _ => return Err(ModelError::unknown(self.kind, path)),
        }
        self.assign(attribute, v.into())
    }

    fn vector_attribute(&self, attribute: &str) -> Option<Vector3> {
        match attribute {
            CENTRE => Some(self.centre),
            NORMAL => Some(self.normal),
            PRESSURE => self.pressure.as_ref()?.as_vector(),
            _ => None,
        }
    }
}

/// Pressure accepts any value TOML can hold, kept in canonical form
fn pressure_value(value: AttributeValue) -> Result<AttributeValue, ModelError> {
    if value.has_nested_none() {
        return Err(ModelError::invalid(PRESSURE, "a value without empty list items"));
    }
    Ok(value.canonical())
}

/// Fixed-point with `precision` decimals; NaN is spelled `nan`, like `inf`
fn fixed(value: f64, precision: usize) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{:.*}", precision, value)
    }
}

fn component_of(v: Vector3, component: &str) -> Option<f64> {
    match component {
        "x" => Some(v.x),
        "y" => Some(v.y),
        "z" => Some(v.z),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, AttributeValue)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let iolet = Iolet::new(IoletKind::Plain);
        assert_eq!(iolet.name(), None);
        assert_eq!(iolet.centre(), Vector3::zero());
        assert_eq!(iolet.normal(), Vector3::unit_z());
        assert_eq!(iolet.radius(), 0.5);
        assert_eq!(iolet.pressure(), None);
    }

    #[test]
    fn test_pressure_default() {
        let inlet = Iolet::new(IoletKind::Inlet);
        assert_eq!(inlet.pressure_equation(), "p = 80.00 + 0.00 cos(wt + 0°)");
    }

    #[test]
    fn test_plain_rejects_pressure_keyword() {
        let err = Iolet::from_attributes(
            IoletKind::Plain,
            attrs(&[(PRESSURE, [1.0, 2.0, 3.0].into())]),
        )
        .unwrap_err();
        assert_eq!(err, ModelError::unexpected(IoletKind::Plain, PRESSURE));
    }

    #[test]
    fn test_wrong_shape_rejected() {
        let err =
            Iolet::from_attributes(IoletKind::Plain, attrs(&[(RADIUS, "big".into())])).unwrap_err();
        assert!(matches!(err, ModelError::InvalidAttribute { ref name, .. } if name == RADIUS));
    }

    #[test]
    fn test_instances_do_not_share_defaults() {
        let mut a = Iolet::new(IoletKind::Outlet);
        let b = Iolet::new(IoletKind::Outlet);
        a.set_attribute("Pressure.y", 5.0).unwrap();
        assert_eq!(b.pressure().and_then(AttributeValue::as_vector), Some(Vector3::new(80.0, 0.0, 0.0)));
    }

    #[test]
    fn test_set_component_reports_dependents() {
        let mut inlet = Iolet::new(IoletKind::Inlet);
        let affected = inlet.set_attribute("Pressure.z", 45.0).unwrap();
        assert_eq!(affected, vec![PRESSURE_EQUATION.to_string()]);
        assert_eq!(inlet.pressure_equation(), "p = 80.00 + 0.00 cos(wt + 45°)");

        let affected = inlet.set_attribute("Centre.x", 1.0).unwrap();
        assert_eq!(affected, vec![PLANE.to_string()]);
        assert_eq!(inlet.centre(), Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_set_name_affects_nothing() {
        let mut inlet = Iolet::new(IoletKind::Inlet);
        let affected = inlet.set_attribute(NAME, "in0").unwrap();
        assert!(affected.is_empty());
        assert_eq!(inlet.name(), Some("in0"));
    }

    #[test]
    fn test_set_unknown_attribute() {
        let mut iolet = Iolet::new(IoletKind::Plain);
        assert_eq!(
            iolet.set_attribute("Pressure", 1.0),
            Err(ModelError::unknown(IoletKind::Plain, "Pressure"))
        );
        assert_eq!(
            iolet.set_attribute("Centre.w", 1.0),
            Err(ModelError::unknown(IoletKind::Plain, "Centre.w"))
        );
    }

    #[test]
    fn test_attribute_component_read() {
        let iolet = Iolet::new(IoletKind::Plain).with_centre([1.0, 2.0, 3.0]);
        assert_eq!(iolet.attribute("Centre.y"), Some(AttributeValue::Number(2.0)));
        assert_eq!(iolet.attribute("Radius.x"), None);
    }

    #[test]
    fn test_roles() {
        assert_eq!(IoletKind::Inlet.role(), Some(Role::Inlet));
        assert_eq!(IoletKind::Outlet.role(), Some(Role::Outlet));
        assert_eq!(IoletKind::SinusoidalPressure.role(), None);
        assert_eq!(Role::Outlet.flow_sign(), -1.0);
    }

    #[test]
    fn test_pressure_equation_list_value() {
        let inlet = Iolet::new(IoletKind::Inlet).with_pressure(AttributeValue::List(vec![
            80.0_f64.into(),
            10.0_f64.into(),
            90.0_f64.into(),
        ]));
        assert_eq!(inlet.pressure_equation(), "p = 80.00 + 10.00 cos(wt + 90°)");
        assert_eq!(
            inlet.pressure().cloned(),
            Some(AttributeValue::Vector(Vector3::new(80.0, 10.0, 90.0)))
        );
    }

    #[test]
    fn test_nested_none_pressure_rejected() {
        let mut inlet = Iolet::new(IoletKind::Inlet);
        let err = inlet
            .set_attribute(PRESSURE, AttributeValue::List(vec![AttributeValue::None]))
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidAttribute { ref name, .. } if name == PRESSURE));

        let built = Iolet::new(IoletKind::Inlet)
            .with_pressure(AttributeValue::List(vec![1.0_f64.into(), AttributeValue::None]));
        assert_eq!(built.pressure(), Iolet::new(IoletKind::Inlet).pressure());
    }

    #[test]
    fn test_unset_pressure_has_no_equation() {
        let mut inlet = Iolet::new(IoletKind::Inlet);
        inlet.set_attribute(PRESSURE, AttributeValue::None).unwrap();
        assert_eq!(inlet.pressure(), Some(&AttributeValue::None));
        assert_eq!(inlet.pressure_equation(), "");
    }

    #[test]
    fn test_pressure_equation_non_finite() {
        let inlet = Iolet::new(IoletKind::Inlet).with_pressure([f64::NAN, 1.0, 2.0]);
        assert_eq!(inlet.pressure_equation(), "p = nan + 1.00 cos(wt + 2°)");

        let inlet = Iolet::new(IoletKind::Inlet).with_pressure([f64::INFINITY, 1.0, f64::NEG_INFINITY]);
        assert_eq!(inlet.pressure_equation(), "p = inf + 1.00 cos(wt + -inf°)");
    }
}
