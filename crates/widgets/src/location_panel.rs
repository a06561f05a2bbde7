use foundation::Coordinate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationField {
    pub label: &'static str,
    pub value: String,
    pub disabled: bool,
}

/// Read-only latitude/longitude pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationPanel {
    pub latitude: LocationField,
    pub longitude: LocationField,
}

impl LocationPanel {
    pub fn view(coordinate: &Coordinate) -> Self {
        Self {
            latitude: LocationField {
                label: "Latitude",
                value: coordinate.latitude.clone(),
                disabled: true,
            },
            longitude: LocationField {
                label: "Longitude",
                value: coordinate.longitude.clone(),
                disabled: true,
            },
        }
    }
}
