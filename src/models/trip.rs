use serde::{Deserialize, Serialize};

/// A point-to-point ("simple") trip is priced by driving distance, an hourly
/// trip by booked duration. Exactly one of destination/duration is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripType {
    Simple,
    Hourly,
}

/// Trip details as submitted by the intake form. Immutable once a booking
/// session has been opened with them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripDetails {
    pub trip_type: TripType,
    pub departure: String,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub waypoints: Vec<String>,
    #[serde(default)]
    pub duration_hours: Option<u32>,
    pub date: String,
    pub time: String,
    pub passengers: u32,
}

impl TripDetails {
    /// Waypoints with blank entries discarded, order preserved.
    pub fn active_waypoints(&self) -> Vec<String> {
        self.waypoints
            .iter()
            .map(|wp| wp.trim())
            .filter(|wp| !wp.is_empty())
            .map(|wp| wp.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_waypoints_are_discarded() {
        let trip = TripDetails {
            trip_type: TripType::Simple,
            departure: "Paris".to_string(),
            destination: Some("Orly".to_string()),
            waypoints: vec![
                "  ".to_string(),
                "Versailles".to_string(),
                "".to_string(),
                "Antony".to_string(),
            ],
            duration_hours: None,
            date: "2026-09-01".to_string(),
            time: "10:30".to_string(),
            passengers: 2,
        };

        assert_eq!(trip.active_waypoints(), vec!["Versailles", "Antony"]);
    }
}
