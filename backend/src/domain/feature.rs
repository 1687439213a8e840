//! GeoJSON features rebuilt from stored footprints.
//!
//! Decoding goes through the `geojson` crate, so a footprint is only a
//! feature when its geometry is complete: coordinates must have the shape
//! their geometry type requires and collections must list their geometries.
//! A missing `geometry` or `properties` member reads as `null`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reasons a JSON document is not a usable feature.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeatureError {
    /// The bytes were not JSON, or the document was not an object with a
    /// string `type`.
    #[error("footprint is not a valid feature document: {message}")]
    Malformed {
        /// Decoder message.
        message: String,
    },
    /// The top-level `type` was something other than `Feature`.
    #[error("footprint is not a feature: type={found}")]
    NotAFeature {
        /// The `type` value found.
        found: String,
    },
    /// A feature whose members do not decode as GeoJSON.
    #[error("footprint is not valid GeoJSON: {message}")]
    Invalid {
        /// Decoder message.
        message: String,
    },
}

/// A single GeoJSON feature.
///
/// # Examples
/// ```
/// use planet::domain::Feature;
///
/// let feature = Feature::from_json(r#"{"type":"Feature"}"#.as_bytes()).unwrap();
/// assert!(feature.geometry().is_none());
///
/// let broken = r#"{"type":"Feature","geometry":{"type":"Point","coordinates":"x"}}"#;
/// assert!(Feature::from_json(broken.as_bytes()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "geojson::Feature")]
pub struct Feature(geojson::Feature);

impl Feature {
    /// Parse a feature from its JSON bytes.
    pub fn from_json(bytes: &[u8]) -> Result<Self, FeatureError> {
        let value = serde_json::from_slice(bytes).map_err(|err| FeatureError::Malformed {
            message: err.to_string(),
        })?;
        Self::from_value(value)
    }

    /// Parse a feature from an already decoded JSON value.
    pub fn from_value(value: Value) -> Result<Self, FeatureError> {
        let Value::Object(mut object) = value else {
            return Err(FeatureError::Malformed {
                message: "expected a JSON object".to_owned(),
            });
        };
        match object.get("type") {
            Some(Value::String(kind)) if kind == "Feature" => {}
            Some(Value::String(kind)) => {
                return Err(FeatureError::NotAFeature {
                    found: kind.clone(),
                });
            }
            _ => {
                return Err(FeatureError::Malformed {
                    message: "missing string member `type`".to_owned(),
                });
            }
        }
        object.entry("geometry").or_insert(Value::Null);
        object.entry("properties").or_insert(Value::Null);

        geojson::Feature::try_from(object)
            .map(Self)
            .map_err(|err| FeatureError::Invalid {
                message: err.to_string(),
            })
    }

    /// Feature identifier, if the footprint carried one.
    pub fn id(&self) -> Option<&geojson::feature::Id> {
        self.0.id.as_ref()
    }

    /// Decoded geometry, if any.
    pub fn geometry(&self) -> Option<&geojson::Geometry> {
        self.0.geometry.as_ref()
    }

    /// Feature properties, if any.
    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.0.properties.as_ref()
    }
}

impl TryFrom<Value> for Feature {
    type Error = FeatureError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<Feature> for geojson::Feature {
    fn from(feature: Feature) -> Self {
        feature.0
    }
}

/// Ordered collection of features, serialised as a GeoJSON
/// `FeatureCollection`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct FeatureCollection {
    /// Features in read order.
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a feature at the end.
    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the collection has no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<T: IntoIterator<Item = Feature>>(iter: T) -> Self {
        Self {
            features: iter.into_iter().collect(),
        }
    }
}
