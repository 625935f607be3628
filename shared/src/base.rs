use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// A named location ("base") as returned by the search service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub base_name: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl LocationRecord {
    pub fn new(base_name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            base_name: base_name.into(),
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    /// Position of the base, if the service sent a usable one.
    ///
    /// Zero is a valid latitude/longitude; only missing or non-finite values
    /// are rejected.
    pub fn coordinate(&self) -> Option<Coordinate> {
        let coord = Coordinate::new(self.latitude?, self.longitude?);
        coord.is_finite().then_some(coord)
    }

    pub fn key(&self) -> String {
        normalize_key(&self.base_name)
    }
}

/// Lookup key for a base name or a search-box value.
pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_search_payload() {
        let payload = r#"[
            {"base_name": "Andrews AFB", "latitude": 38.81, "longitude": -76.87, "state": "MD"},
            {"base_name": "Unknown Field", "latitude": null, "longitude": null},
            {"base_name": "No Coords"}
        ]"#;

        let records: Vec<LocationRecord> = serde_json::from_str(payload).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0].coordinate(),
            Some(Coordinate::new(38.81, -76.87))
        );
        assert_eq!(records[1].coordinate(), None);
        assert_eq!(records[2].coordinate(), None);
    }

    #[test]
    fn test_zero_coordinates_are_valid() {
        let record = LocationRecord::new("Null Island", 0.0, 0.0);
        assert_eq!(record.coordinate(), Some(Coordinate::new(0.0, 0.0)));
    }

    #[test]
    fn test_half_missing_coordinates_rejected() {
        let record = LocationRecord {
            base_name: "Half".into(),
            latitude: Some(12.0),
            longitude: None,
        };
        assert_eq!(record.coordinate(), None);
    }

    #[test]
    fn test_non_finite_coordinates_rejected() {
        let record = LocationRecord::new("Broken", f64::NAN, 4.0);
        assert_eq!(record.coordinate(), None);
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("  Fort Bragg "), "fort bragg");
        assert_eq!(
            LocationRecord::new("Fort BRAGG", 1.0, 2.0).key(),
            normalize_key("fort bragg")
        );
    }
}
