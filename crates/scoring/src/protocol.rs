use std::collections::BTreeMap;

use foundation::{Coordinate, GeoPoint};
use serde::{Deserialize, Serialize};

/// Body of `POST /predict/{category}`.
///
/// Category fields are flattened next to the coordinates, so a healthcare
/// request reads `{"Latitude":..,"Longitude":..,"facilityOwnerType":..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRequest {
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl ScoreRequest {
    pub fn new(point: GeoPoint, fields: BTreeMap<String, String>) -> Self {
        Self {
            latitude: point.lat_deg,
            longitude: point.lon_deg,
            fields,
        }
    }

    /// Parses the displayed coordinate strings; `None` while unset.
    pub fn from_coordinate(coordinate: &Coordinate, fields: BTreeMap<String, String>) -> Option<Self> {
        coordinate.to_point().map(|point| Self::new(point, fields))
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Successful scoring reply. Extra keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResponse {
    #[serde(rename = "Demand Score")]
    pub demand_score: f64,
    #[serde(rename = "Recommendations")]
    pub recommendations: String,
}
