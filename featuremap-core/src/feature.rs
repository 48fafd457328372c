//! Spatial features: an attribute bag plus an optional geometry.

use std::collections::HashMap;

use geo::Geometry;
use wkt::ToWkt;

use crate::AttributeValue;

/// Attribute values keyed by attribute (column) name.
pub type Attributes = HashMap<String, AttributeValue>;

/// A feature record destined for a feature table.
///
/// The mapping layer only reads features; it never mutates them. With the
/// `serde` feature enabled the feature reads from documents shaped like
/// `{"id": "7", "properties": {"name": "Quay"}, "geometry": "POINT(1 2)"}`,
/// the geometry being Well-Known Text.
///
/// # Examples
/// ```
/// use geo::{Geometry, Point};
/// use featuremap_core::SpatialFeature;
///
/// let feature = SpatialFeature::default()
///     .with_attribute("name", "Quay")
///     .with_geometry(Geometry::Point(Point::new(1.0, 2.0)));
///
/// assert_eq!(feature.geometry_wkt().as_deref(), Some("POINT(1 2)"));
/// assert!(feature.attribute("missing").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpatialFeature {
    /// Identifier of the row the feature was read from, if any. Documents
    /// may give it as a string or an integer.
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "feature_id::deserialize")
    )]
    pub id: Option<String>,
    /// Named attribute values.
    #[cfg_attr(feature = "serde", serde(rename = "properties", default))]
    pub attributes: Attributes,
    /// Feature geometry.
    #[cfg_attr(feature = "serde", serde(default, with = "wkt_serde"))]
    pub geometry: Option<Geometry<f64>>,
}

impl SpatialFeature {
    /// Construct a feature from attributes and an optional geometry.
    #[must_use]
    pub const fn new(attributes: Attributes, geometry: Option<Geometry<f64>>) -> Self {
        Self {
            id: None,
            attributes,
            geometry,
        }
    }

    /// Set the row identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add or replace an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the geometry.
    #[must_use]
    pub fn with_geometry(mut self, geometry: Geometry<f64>) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Look up a non-null attribute value.
    ///
    /// [`AttributeValue::Null`] is reported as absent.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name).filter(|value| !value.is_null())
    }

    /// Well-Known Text of the geometry, if the feature has one.
    #[must_use]
    pub fn geometry_wkt(&self) -> Option<String> {
        self.geometry.as_ref().map(ToWkt::wkt_string)
    }
}

/// Serde adapter storing an optional geometry as Well-Known Text.
#[cfg(feature = "serde")]
mod wkt_serde {
    use geo::Geometry;
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
    use wkt::{ToWkt, TryFromWkt};

    pub(super) fn serialize<S>(geometry: &Option<Geometry<f64>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        geometry
            .as_ref()
            .map(ToWkt::wkt_string)
            .serialize(serializer)
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<Geometry<f64>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|text| Geometry::<f64>::try_from_wkt_str(&text).map_err(D::Error::custom))
            .transpose()
    }
}

/// Accepts feature ids written as strings or as integer fids.
#[cfg(feature = "serde")]
mod feature_id {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
            RawId::Text(text) => text,
            RawId::Integer(number) => number.to_string(),
        }))
    }
}
