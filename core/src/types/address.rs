use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A postal address with its primary contact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Street.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    /// PO box, apartment, suite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State or province.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    /// Two letter country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Geo location as `[lon, lat]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc: Option<Vec<f64>>,
    /// Primary contact name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Address {
    /// `(longitude, latitude)` when `loc` holds both.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match self.loc.as_deref() {
            Some([lon, lat, ..]) => Some((*lon, *lat)),
            _ => None,
        }
    }
}
