use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::models::options::AdditionalOption;
use crate::models::personal_info::PersonalInfo;
use crate::models::reservation::{GuestInfo, ReservationDocument};
use crate::models::session::SelectedVehicle;
use crate::models::trip::{TripDetails, TripType};
use crate::services::pricing_service::PricingService;

// Catalog-imposed seating bound; nothing in the fleet takes more than 6.
pub const MAX_PASSENGERS: u32 = 6;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

// Compiled once; the pattern is a constant.
fn email_shape() -> &'static Regex {
    static EMAIL_SHAPE: OnceLock<Regex> = OnceLock::new();
    EMAIL_SHAPE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern must compile"))
}

/// Identifies the first failing field; assembly never partially constructs a
/// reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingField(&'static str),
    InvalidEmail,
    MissingDestination,
    MissingDuration,
    InvalidDate,
    InvalidTime,
    InvalidPassengerCount,
    NoVehicleSelected,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingField(field) => write!(f, "{} is required", field),
            ValidationError::InvalidEmail => write!(f, "email address is not valid"),
            ValidationError::MissingDestination => {
                write!(f, "a point-to-point trip requires a destination")
            }
            ValidationError::MissingDuration => {
                write!(f, "an hourly trip requires a positive duration")
            }
            ValidationError::InvalidDate => write!(f, "date must be a valid YYYY-MM-DD value"),
            ValidationError::InvalidTime => write!(f, "time must be a valid HH:MM value"),
            ValidationError::InvalidPassengerCount => {
                write!(f, "passengers must be between 1 and {}", MAX_PASSENGERS)
            }
            ValidationError::NoVehicleSelected => write!(f, "no vehicle selected"),
        }
    }
}

/// Checks the trip invariant: exactly one of destination/duration is active,
/// chosen by the trip type, and the calendar fields parse.
pub fn validate_trip(trip: &TripDetails) -> Result<(), ValidationError> {
    if trip.departure.trim().is_empty() {
        return Err(ValidationError::MissingField("departure"));
    }

    match trip.trip_type {
        TripType::Simple => {
            let has_destination = trip
                .destination
                .as_deref()
                .is_some_and(|d| !d.trim().is_empty());
            if !has_destination {
                return Err(ValidationError::MissingDestination);
            }
        }
        TripType::Hourly => {
            if !trip.duration_hours.is_some_and(|h| h > 0) {
                return Err(ValidationError::MissingDuration);
            }
        }
    }

    if NaiveDate::parse_from_str(trip.date.trim(), "%Y-%m-%d").is_err() {
        return Err(ValidationError::InvalidDate);
    }
    if NaiveTime::parse_from_str(trip.time.trim(), "%H:%M").is_err() {
        return Err(ValidationError::InvalidTime);
    }

    if trip.passengers == 0 || trip.passengers > MAX_PASSENGERS {
        return Err(ValidationError::InvalidPassengerCount);
    }

    Ok(())
}

/// All four contact fields must be non-empty after trimming, and the email
/// must have the something@something.something shape.
pub fn validate_personal_info(info: &PersonalInfo) -> Result<(), ValidationError> {
    if info.first_name.trim().is_empty() {
        return Err(ValidationError::MissingField("first_name"));
    }
    if info.last_name.trim().is_empty() {
        return Err(ValidationError::MissingField("last_name"));
    }
    if info.phone.trim().is_empty() {
        return Err(ValidationError::MissingField("phone"));
    }
    if info.email.trim().is_empty() {
        return Err(ValidationError::MissingField("email"));
    }

    if !email_shape().is_match(info.email.trim()) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(())
}

/// Combines trip, chosen vehicle, add-ons and contact details into the final
/// immutable reservation. Everything is re-checked here even though each step
/// validated on entry; the payment fields stay empty until the dispatcher
/// fills them in.
pub fn assemble(
    trip: &TripDetails,
    vehicle: Option<&SelectedVehicle>,
    options: &[AdditionalOption],
    personal_info: Option<&PersonalInfo>,
    distance_km: Option<u32>,
) -> Result<ReservationDocument, ValidationError> {
    validate_trip(trip)?;

    let vehicle = vehicle.ok_or(ValidationError::NoVehicleSelected)?;
    let info = personal_info.ok_or(ValidationError::MissingField("personal_info"))?;
    validate_personal_info(info)?;

    let selected_options: Vec<String> = options
        .iter()
        .filter(|option| option.selected)
        .map(|option| option.id.clone())
        .collect();
    let total_price = PricingService::grand_total(vehicle.price.total, options);

    Ok(ReservationDocument {
        id: None,
        trip_type: trip.trip_type,
        departure: trip.departure.trim().to_string(),
        destination: match trip.trip_type {
            TripType::Simple => trip.destination.as_deref().map(|d| d.trim().to_string()),
            TripType::Hourly => None,
        },
        waypoints: trip.active_waypoints(),
        date: trip.date.trim().to_string(),
        time: trip.time.trim().to_string(),
        duration_hours: match trip.trip_type {
            TripType::Hourly => trip.duration_hours,
            TripType::Simple => None,
        },
        distance_km: match trip.trip_type {
            TripType::Simple => distance_km,
            TripType::Hourly => None,
        },
        vehicle_id: vehicle.vehicle_id.clone(),
        vehicle_name: vehicle.name.clone(),
        vehicle_base_price: vehicle.price.total,
        selected_options,
        guest_info: GuestInfo {
            first_name: info.first_name.trim().to_string(),
            last_name: info.last_name.trim().to_string(),
            email: info.email.trim().to_string(),
            phone: info.phone.trim().to_string(),
            passengers: trip.passengers,
            flight_number: info
                .flight_number
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_string(),
        },
        total_price,
        payment_method: None,
        payment_id: None,
        payment_status: None,
        status: "pending".to_string(),
        created_at: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::options::{default_catalog, toggle_option};
    use crate::services::pricing_service::CalculatedPrice;

    fn trip(trip_type: TripType) -> TripDetails {
        TripDetails {
            trip_type,
            departure: "Gare de Lyon, Paris".to_string(),
            destination: Some("Aéroport d'Orly".to_string()),
            waypoints: vec![],
            duration_hours: Some(2),
            date: "2026-09-15".to_string(),
            time: "08:45".to_string(),
            passengers: 2,
        }
    }

    fn info() -> PersonalInfo {
        PersonalInfo {
            first_name: "Marie".to_string(),
            last_name: "Durand".to_string(),
            phone: "+33612345678".to_string(),
            email: "marie.durand@example.com".to_string(),
            flight_number: None,
        }
    }

    fn berline() -> SelectedVehicle {
        SelectedVehicle {
            vehicle_id: "veh-1".to_string(),
            name: "Berline".to_string(),
            price: CalculatedPrice {
                base: 20.0,
                variable: 24.0,
                total: 44.0,
            },
        }
    }

    #[test]
    fn rejects_email_without_an_at_sign() {
        let mut bad = info();
        bad.email = "marie.durand.example.com".to_string();
        assert_eq!(validate_personal_info(&bad), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn rejects_email_without_a_dot_after_the_at() {
        let mut bad = info();
        bad.email = "marie@example".to_string();
        assert_eq!(validate_personal_info(&bad), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn reports_the_first_failing_field() {
        let mut bad = info();
        bad.first_name = "  ".to_string();
        bad.email = "broken".to_string();
        assert_eq!(
            validate_personal_info(&bad),
            Err(ValidationError::MissingField("first_name"))
        );
    }

    #[test]
    fn simple_trip_needs_a_destination() {
        let mut t = trip(TripType::Simple);
        t.destination = Some("   ".to_string());
        assert_eq!(validate_trip(&t), Err(ValidationError::MissingDestination));

        t.destination = None;
        assert_eq!(validate_trip(&t), Err(ValidationError::MissingDestination));
    }

    #[test]
    fn hourly_trip_needs_a_duration() {
        let mut t = trip(TripType::Hourly);
        t.duration_hours = None;
        assert_eq!(validate_trip(&t), Err(ValidationError::MissingDuration));

        t.duration_hours = Some(0);
        assert_eq!(validate_trip(&t), Err(ValidationError::MissingDuration));
    }

    #[test]
    fn hourly_trip_ignores_a_missing_destination() {
        let mut t = trip(TripType::Hourly);
        t.destination = None;
        assert_eq!(validate_trip(&t), Ok(()));
    }

    #[test]
    fn passenger_count_is_bounded_by_the_catalog() {
        let mut t = trip(TripType::Simple);
        t.passengers = 0;
        assert_eq!(validate_trip(&t), Err(ValidationError::InvalidPassengerCount));
        t.passengers = 7;
        assert_eq!(validate_trip(&t), Err(ValidationError::InvalidPassengerCount));
    }

    #[test]
    fn malformed_date_or_time_is_rejected() {
        let mut t = trip(TripType::Simple);
        t.date = "15/09/2026".to_string();
        assert_eq!(validate_trip(&t), Err(ValidationError::InvalidDate));

        let mut t = trip(TripType::Simple);
        t.time = "8h45".to_string();
        assert_eq!(validate_trip(&t), Err(ValidationError::InvalidTime));
    }

    #[test]
    fn assembles_a_simple_trip_with_distance_and_options() {
        let options = toggle_option(&default_catalog(), "babySeat");
        let doc = assemble(
            &trip(TripType::Simple),
            Some(&berline()),
            &options,
            Some(&info()),
            Some(12),
        )
        .unwrap();

        assert_eq!(doc.distance_km, Some(12));
        assert_eq!(doc.duration_hours, None);
        assert_eq!(doc.vehicle_base_price, 44.0);
        assert_eq!(doc.total_price, 54.0);
        assert_eq!(doc.selected_options, vec!["babySeat"]);
        assert_eq!(doc.status, "pending");
        assert!(doc.payment_method.is_none());
    }

    #[test]
    fn hourly_reservation_has_no_distance() {
        let doc = assemble(
            &trip(TripType::Hourly),
            Some(&berline()),
            &default_catalog(),
            Some(&info()),
            Some(12),
        )
        .unwrap();

        assert_eq!(doc.distance_km, None);
        assert_eq!(doc.duration_hours, Some(2));
    }

    #[test]
    fn assembly_requires_a_vehicle() {
        let err = assemble(
            &trip(TripType::Simple),
            None,
            &default_catalog(),
            Some(&info()),
            Some(12),
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::NoVehicleSelected);
    }

    #[test]
    fn flight_number_defaults_to_empty() {
        let doc = assemble(
            &trip(TripType::Simple),
            Some(&berline()),
            &default_catalog(),
            Some(&info()),
            Some(12),
        )
        .unwrap();
        assert_eq!(doc.guest_info.flight_number, "");
    }
}
