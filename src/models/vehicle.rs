use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Fleet catalog entry, externally owned and read-only to this service.
///
/// `minimum_price >= base_price` is expected from the catalog but not enforced
/// here; pricing tolerates a violation (the floor simply never binds).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub passengers: u32,
    pub luggage: u32,
    pub base_price: f64,
    pub minimum_price: f64,
    pub price_per_km: f64,
    pub price_per_hour: f64,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Narrows the catalog to vehicles with enough seats. Input order is
/// preserved and nothing else is filtered; an empty result is a valid
/// "no vehicle available" state for the caller, not an error.
pub fn filter_by_capacity(vehicles: Vec<Vehicle>, passenger_count: u32) -> Vec<Vehicle> {
    vehicles
        .into_iter()
        .filter(|vehicle| vehicle.passengers >= passenger_count)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(name: &str, passengers: u32) -> Vehicle {
        Vehicle {
            id: None,
            name: name.to_string(),
            passengers,
            luggage: 2,
            base_price: 20.0,
            minimum_price: 40.0,
            price_per_km: 2.0,
            price_per_hour: 15.0,
            image_url: None,
        }
    }

    #[test]
    fn keeps_only_vehicles_with_enough_seats() {
        let fleet = vec![
            vehicle("Berline", 3),
            vehicle("Van", 6),
            vehicle("SUV", 4),
        ];

        let filtered = filter_by_capacity(fleet, 4);
        let names: Vec<&str> = filtered.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Van", "SUV"]);
        assert!(filtered.iter().all(|v| v.passengers >= 4));
    }

    #[test]
    fn preserves_input_order() {
        let fleet = vec![vehicle("A", 6), vehicle("B", 6), vehicle("C", 6)];
        let names: Vec<String> = filter_by_capacity(fleet, 1)
            .into_iter()
            .map(|v| v.name)
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn empty_result_when_no_vehicle_fits() {
        let fleet = vec![vehicle("Berline", 3)];
        assert!(filter_by_capacity(fleet, 5).is_empty());
    }
}
