use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::options::{self, AdditionalOption};
use crate::models::trip::{TripDetails, TripType};
use crate::models::vehicle::Vehicle;

/// Per-vehicle fare, recomputed whenever trip inputs or distance change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculatedPrice {
    /// The vehicle's base price, carried through unrounded.
    pub base: f64,
    /// Distance- or duration-proportional component.
    pub variable: f64,
    /// Floor-adjusted sum, rounded to 2 decimals.
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingError {
    NegativeDistance,
    NonPositiveDuration,
    MissingDistance,
    MissingDuration,
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::NegativeDistance => write!(f, "distance must not be negative"),
            PricingError::NonPositiveDuration => {
                write!(f, "duration must be a positive number of hours")
            }
            PricingError::MissingDistance => {
                write!(f, "a point-to-point trip needs a resolved distance")
            }
            PricingError::MissingDuration => write!(f, "an hourly trip needs a duration"),
        }
    }
}

pub struct PricingService;

impl PricingService {
    /// Standard half-up rounding to 2 decimal places. Every monetary total
    /// leaving the calculator goes through this.
    pub fn round2(value: f64) -> f64 {
        (value * 100.0).round() / 100.0
    }

    /// Point-to-point fare: base + distance component, with the minimum-fare
    /// floor applied to the combined total (not the distance part alone).
    pub fn point_to_point(
        vehicle: &Vehicle,
        distance_km: f64,
    ) -> Result<CalculatedPrice, PricingError> {
        if distance_km < 0.0 {
            return Err(PricingError::NegativeDistance);
        }

        let variable = distance_km * vehicle.price_per_km;
        let raw_total = vehicle.base_price + variable;
        let total = raw_total.max(vehicle.minimum_price);

        Ok(CalculatedPrice {
            base: vehicle.base_price,
            variable: Self::round2(variable),
            total: Self::round2(total),
        })
    }

    /// Hourly fare: base + booked hours. Deliberately no minimum-fare floor;
    /// a short hourly booking is not subsidized the way a short trip is.
    pub fn hourly(vehicle: &Vehicle, duration_hours: f64) -> Result<CalculatedPrice, PricingError> {
        if duration_hours <= 0.0 {
            return Err(PricingError::NonPositiveDuration);
        }

        let variable = duration_hours * vehicle.price_per_hour;
        let total = vehicle.base_price + variable;

        Ok(CalculatedPrice {
            base: vehicle.base_price,
            variable: Self::round2(variable),
            total: Self::round2(total),
        })
    }

    /// Prices one vehicle for a trip, picking the fare model from the trip
    /// type. `distance_km` is the resolver's output (possibly the fallback)
    /// and is only consulted for point-to-point trips.
    pub fn quote(
        vehicle: &Vehicle,
        trip: &TripDetails,
        distance_km: Option<u32>,
    ) -> Result<CalculatedPrice, PricingError> {
        match trip.trip_type {
            TripType::Simple => {
                let distance = distance_km.ok_or(PricingError::MissingDistance)?;
                Self::point_to_point(vehicle, f64::from(distance))
            }
            TripType::Hourly => {
                let hours = trip.duration_hours.ok_or(PricingError::MissingDuration)?;
                Self::hourly(vehicle, f64::from(hours))
            }
        }
    }

    /// Vehicle price plus every selected add-on, rounded to 2 decimals.
    pub fn grand_total(vehicle_price: f64, options: &[AdditionalOption]) -> f64 {
        Self::round2(vehicle_price + options::sum_selected(options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::options::{default_catalog, toggle_option};

    fn vehicle(base: f64, minimum: f64, per_km: f64, per_hour: f64) -> Vehicle {
        Vehicle {
            id: None,
            name: "Berline".to_string(),
            passengers: 4,
            luggage: 3,
            base_price: base,
            minimum_price: minimum,
            price_per_km: per_km,
            price_per_hour: per_hour,
            image_url: None,
        }
    }

    #[test]
    fn point_to_point_above_the_floor() {
        // 12 km at 2€/km on a 20€ base: 44€, floor of 40€ not triggered.
        let price = PricingService::point_to_point(&vehicle(20.0, 40.0, 2.0, 15.0), 12.0).unwrap();
        assert_eq!(price.base, 20.0);
        assert_eq!(price.variable, 24.0);
        assert_eq!(price.total, 44.0);
    }

    #[test]
    fn point_to_point_below_the_floor() {
        // 5 km raw total is 30€, so the 40€ minimum wins.
        let price = PricingService::point_to_point(&vehicle(20.0, 40.0, 2.0, 15.0), 5.0).unwrap();
        assert_eq!(price.variable, 10.0);
        assert_eq!(price.total, 40.0);
    }

    #[test]
    fn floor_applies_to_the_combined_total() {
        // The distance part alone (19€) is under the 40€ floor, but the
        // combined total clears it, so no clamping happens.
        let price = PricingService::point_to_point(&vehicle(25.0, 40.0, 1.0, 15.0), 19.0).unwrap();
        assert_eq!(price.total, 44.0);
    }

    #[test]
    fn hourly_has_no_minimum_fare_floor() {
        // 1h at 15€/h on a 10€ base stays at 25€ even with a 40€ minimum.
        let price = PricingService::hourly(&vehicle(10.0, 40.0, 2.0, 15.0), 1.0).unwrap();
        assert_eq!(price.total, 25.0);
    }

    #[test]
    fn hourly_two_hours() {
        let price = PricingService::hourly(&vehicle(30.0, 0.0, 0.0, 15.0), 2.0).unwrap();
        assert_eq!(price.total, 60.0);
    }

    #[test]
    fn totals_are_rounded_to_two_decimals() {
        let price = PricingService::point_to_point(&vehicle(0.1, 0.0, 0.333, 1.0), 1.0).unwrap();
        assert_eq!(price.variable, 0.33);
        assert_eq!(price.total, 0.43);
    }

    #[test]
    fn tolerates_a_minimum_price_below_base() {
        // Catalog data-entry error: the floor simply never binds.
        let price = PricingService::point_to_point(&vehicle(50.0, 10.0, 2.0, 15.0), 3.0).unwrap();
        assert_eq!(price.total, 56.0);
    }

    #[test]
    fn rejects_negative_inputs() {
        let v = vehicle(20.0, 40.0, 2.0, 15.0);
        assert_eq!(
            PricingService::point_to_point(&v, -1.0),
            Err(PricingError::NegativeDistance)
        );
        assert_eq!(
            PricingService::hourly(&v, 0.0),
            Err(PricingError::NonPositiveDuration)
        );
        assert_eq!(
            PricingService::hourly(&v, -2.0),
            Err(PricingError::NonPositiveDuration)
        );
    }

    #[test]
    fn grand_total_adds_the_selected_options() {
        // babySeat (10€) + pets (20€) on top of a 60€ hourly fare.
        let options = toggle_option(&toggle_option(&default_catalog(), "babySeat"), "pets");
        assert_eq!(PricingService::grand_total(60.0, &options), 90.0);
    }

    #[test]
    fn grand_total_is_monotonic_in_the_selected_set() {
        let mut options = default_catalog();
        let mut previous = PricingService::grand_total(60.0, &options);
        let ids: Vec<String> = options.iter().map(|o| o.id.clone()).collect();
        for id in ids {
            options = toggle_option(&options, &id);
            let next = PricingService::grand_total(60.0, &options);
            assert!(next >= previous);
            previous = next;
        }
    }
}
