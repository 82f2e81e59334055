//! Driving-distance resolution via the Google Directions API.
//!
//! The booking flow only needs one number per trip: total driving kilometers
//! from departure to destination through the optional waypoints. Anything that
//! goes wrong here (missing key, network error, timeout, non-OK status) is
//! absorbed into a fixed fallback distance so that pricing can still proceed;
//! the failure is logged, never surfaced to the customer.
//!
//! ## Setup
//! 1. Get a Google Maps API key from Google Cloud Console
//! 2. Enable the Directions API
//! 3. Set the environment variable: `GOOGLE_MAPS_API_KEY=your_api_key_here`

use reqwest;
use serde::Deserialize;
use std::{env, time::Duration};

/// Substituted whenever the directions service cannot be reached. Chosen so a
/// failed lookup never underprices a trip into nothing.
pub const FALLBACK_DISTANCE_KM: u32 = 10;

const DIRECTIONS_API_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

// Bounded wait budget for the external call.
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    legs: Vec<DirectionsLeg>,
}

#[derive(Debug, Deserialize)]
struct DirectionsLeg {
    distance: LegDistance,
}

#[derive(Debug, Deserialize)]
struct LegDistance {
    value: u64, // meters
}

pub struct DistanceService {
    http_client: reqwest::Client,
    api_key: Option<String>,
}

impl DistanceService {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        // A missing key is not fatal: every lookup just takes the fallback.
        let api_key = env::var("GOOGLE_MAPS_API_KEY").ok();
        if api_key.is_none() {
            eprintln!("GOOGLE_MAPS_API_KEY not set; all distances will use the fallback value");
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http_client,
            api_key,
        })
    }

    /// Total driving distance for origin -> waypoints -> destination, in whole
    /// kilometers rounded up. Falls back to [`FALLBACK_DISTANCE_KM`] on any
    /// failure of the external service.
    pub async fn resolve_distance_km(
        &self,
        origin: &str,
        destination: &str,
        waypoints: &[String],
    ) -> u32 {
        match self.fetch_route_meters(origin, destination, waypoints).await {
            Ok(meters) => {
                let km = kilometers_from_meters(meters);
                println!("Resolved route {} -> {} as {} km", origin, destination, km);
                km
            }
            Err(e) => {
                eprintln!(
                    "Distance resolution failed ({}), using {} km fallback",
                    e, FALLBACK_DISTANCE_KM
                );
                FALLBACK_DISTANCE_KM
            }
        }
    }

    async fn fetch_route_meters(
        &self,
        origin: &str,
        destination: &str,
        waypoints: &[String],
    ) -> Result<u64, Box<dyn std::error::Error>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or("GOOGLE_MAPS_API_KEY environment variable not set")?;

        let mut params: Vec<(&str, String)> = vec![
            ("origin", origin.to_string()),
            ("destination", destination.to_string()),
            ("mode", "driving".to_string()),
            ("units", "metric".to_string()),
            ("key", api_key.to_string()),
        ];
        if !waypoints.is_empty() {
            params.push(("waypoints", waypoints.join("|")));
        }

        let response = self
            .http_client
            .get(DIRECTIONS_API_URL)
            .query(&params)
            .send()
            .await?;
        let response_text = response.text().await?;

        let directions: DirectionsResponse = serde_json::from_str(&response_text)
            .map_err(|e| format!("Failed to parse Directions response: {}", e))?;

        total_route_meters(&directions)
    }
}

/// Sums the distance of every leg of the first returned route.
fn total_route_meters(directions: &DirectionsResponse) -> Result<u64, Box<dyn std::error::Error>> {
    if directions.status != "OK" {
        return Err(format!("Directions API error: {}", directions.status).into());
    }

    let route = directions
        .routes
        .first()
        .ok_or("No route returned by the Directions API")?;

    Ok(route.legs.iter().map(|leg| leg.distance.value).sum())
}

/// Meters to whole kilometers, rounding up so a 10.1 km route is never billed
/// as 10 km.
pub fn kilometers_from_meters(meters: u64) -> u32 {
    meters.div_ceil(1000) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kilometers_round_up_to_the_next_whole_unit() {
        assert_eq!(kilometers_from_meters(0), 0);
        assert_eq!(kilometers_from_meters(1), 1);
        assert_eq!(kilometers_from_meters(999), 1);
        assert_eq!(kilometers_from_meters(1000), 1);
        assert_eq!(kilometers_from_meters(1001), 2);
        assert_eq!(kilometers_from_meters(11_999), 12);
        assert_eq!(kilometers_from_meters(12_000), 12);
    }

    #[test]
    fn sums_every_leg_of_the_route() {
        let body = r#"{
            "status": "OK",
            "routes": [{
                "legs": [
                    { "distance": { "value": 4200 } },
                    { "distance": { "value": 3100 } },
                    { "distance": { "value": 4500 } }
                ]
            }]
        }"#;
        let directions: DirectionsResponse = serde_json::from_str(body).unwrap();
        let meters = total_route_meters(&directions).unwrap();
        assert_eq!(meters, 11_800);
        assert_eq!(kilometers_from_meters(meters), 12);
    }

    #[test]
    fn non_ok_status_is_an_error() {
        let body = r#"{ "status": "ZERO_RESULTS", "routes": [] }"#;
        let directions: DirectionsResponse = serde_json::from_str(body).unwrap();
        assert!(total_route_meters(&directions).is_err());
    }

    #[test]
    fn ok_status_with_no_route_is_an_error() {
        let body = r#"{ "status": "OK", "routes": [] }"#;
        let directions: DirectionsResponse = serde_json::from_str(body).unwrap();
        assert!(total_route_meters(&directions).is_err());
    }

    #[tokio::test]
    async fn resolver_falls_back_without_an_api_key() {
        let service = DistanceService {
            http_client: reqwest::Client::new(),
            api_key: None,
        };
        let km = service
            .resolve_distance_km("Paris", "Orly", &[])
            .await;
        assert_eq!(km, FALLBACK_DISTANCE_KM);
    }
}
