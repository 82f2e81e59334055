use serde::Serialize;
use std::env;

use crate::models::reservation::{PaymentMethod, ReservationDocument};
use crate::models::trip::TripType;

/// Rendered trip/price/customer fields handed to the email collaborator.
#[derive(Debug, Serialize)]
pub struct ConfirmationDetails {
    pub reservation_id: String,
    pub customer_name: String,
    pub phone: String,
    pub email: String,
    pub date: String,
    pub passengers: u32,
    pub payment_method: String,
    pub departure: String,
    pub destination: Option<String>,
    pub distance: Option<String>,
    pub vehicle: String,
    pub options: Vec<String>,
    pub total_price: String,
    pub waypoints: Vec<String>,
}

impl ConfirmationDetails {
    pub fn from_reservation(
        reservation: &ReservationDocument,
        reservation_id: &str,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            reservation_id: reservation_id.to_string(),
            customer_name: format!(
                "{} {}",
                reservation.guest_info.first_name, reservation.guest_info.last_name
            ),
            phone: reservation.guest_info.phone.clone(),
            email: reservation.guest_info.email.clone(),
            date: format!("{} à {}", reservation.date, reservation.time),
            passengers: reservation.guest_info.passengers,
            payment_method: payment_method.display_label().to_string(),
            departure: reservation.departure.clone(),
            destination: reservation.destination.clone(),
            distance: reservation.distance_km.map(|km| format!("{} km", km)),
            vehicle: reservation.vehicle_name.clone(),
            options: reservation.selected_options.clone(),
            total_price: format!("{:.2}", reservation.total_price),
            waypoints: reservation.waypoints.clone(),
        }
    }
}

/// Sends the confirmation email through the hosted email function. Hourly
/// bookings go to a dedicated endpoint, as the templates differ.
pub async fn send_confirmation_email(
    reservation: &ReservationDocument,
    reservation_id: &str,
    payment_method: PaymentMethod,
) -> Result<(), String> {
    let url_var = match reservation.trip_type {
        TripType::Hourly => "CONFIRMATION_EMAIL_URL_HOURLY",
        TripType::Simple => "CONFIRMATION_EMAIL_URL",
    };
    let url = env::var(url_var).map_err(|_| format!("{} not configured", url_var))?;

    let subject = match reservation.trip_type {
        TripType::Hourly => "Confirmation de votre réservation horaire - VTC LILYGO",
        TripType::Simple => "Confirmation de votre réservation - VTC LILYGO",
    };

    let details = ConfirmationDetails::from_reservation(reservation, reservation_id, payment_method);
    let body = serde_json::json!({
        "to": reservation.guest_info.email,
        "subject": subject,
        "reservation_details": details,
    });

    let response = reqwest::Client::new()
        .post(&url)
        .json(&body)
        .send()
        .await
        .map_err(|e| format!("Email request failed: {}", e))?;

    if !response.status().is_success() {
        return Err(format!("Email send failed: {}", response.status()));
    }

    println!("Confirmation email sent for reservation {}", reservation_id);
    Ok(())
}

/// Fire-and-forget dispatch. The reservation is already safely persisted by
/// the time this runs, so a failed email is logged and swallowed; it must
/// never surface as a booking error.
pub fn spawn_confirmation_email(
    reservation: ReservationDocument,
    reservation_id: String,
    payment_method: PaymentMethod,
) {
    tokio::spawn(async move {
        if let Err(e) =
            send_confirmation_email(&reservation, &reservation_id, payment_method).await
        {
            eprintln!(
                "Failed to send confirmation email for reservation {}: {}",
                reservation_id, e
            );
        }
    });
}

/// Acknowledges a data-deletion request by email, best-effort. Same policy as
/// the booking confirmation: the request document is already stored, so a
/// failed send is only logged.
pub fn spawn_deletion_acknowledgement(email: String, request_id: String) {
    tokio::spawn(async move {
        let url = match env::var("DELETION_EMAIL_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("DELETION_EMAIL_URL not configured; skipping acknowledgement email");
                return;
            }
        };

        let body = serde_json::json!({
            "to": email,
            "subject": "Votre demande de suppression de données - VTC LILYGO",
            "request_id": request_id,
        });

        match reqwest::Client::new().post(&url).json(&body).send().await {
            Ok(response) if response.status().is_success() => {
                println!("Deletion acknowledgement sent for request {}", request_id);
            }
            Ok(response) => {
                eprintln!(
                    "Deletion acknowledgement for request {} failed: {}",
                    request_id,
                    response.status()
                );
            }
            Err(e) => {
                eprintln!(
                    "Deletion acknowledgement for request {} failed: {}",
                    request_id, e
                );
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reservation::GuestInfo;

    fn reservation(trip_type: TripType) -> ReservationDocument {
        ReservationDocument {
            id: None,
            trip_type,
            departure: "Paris".to_string(),
            destination: Some("Orly".to_string()),
            waypoints: vec!["Antony".to_string()],
            date: "2026-09-15".to_string(),
            time: "08:45".to_string(),
            duration_hours: None,
            distance_km: Some(12),
            vehicle_id: "veh-1".to_string(),
            vehicle_name: "Berline".to_string(),
            vehicle_base_price: 44.0,
            selected_options: vec!["babySeat".to_string()],
            guest_info: GuestInfo {
                first_name: "Marie".to_string(),
                last_name: "Durand".to_string(),
                email: "marie@example.com".to_string(),
                phone: "+33612345678".to_string(),
                passengers: 2,
                flight_number: String::new(),
            },
            total_price: 54.0,
            payment_method: Some(PaymentMethod::Cash),
            payment_id: Some(String::new()),
            payment_status: None,
            status: "pending".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn renders_the_customer_facing_fields() {
        let details = ConfirmationDetails::from_reservation(
            &reservation(TripType::Simple),
            "res-42",
            PaymentMethod::Cash,
        );
        assert_eq!(details.customer_name, "Marie Durand");
        assert_eq!(details.date, "2026-09-15 à 08:45");
        assert_eq!(details.distance.as_deref(), Some("12 km"));
        assert_eq!(details.total_price, "54.00");
        assert_eq!(details.payment_method, "Espèces");
    }

    #[tokio::test]
    async fn missing_endpoint_is_reported_not_panicked() {
        std::env::remove_var("CONFIRMATION_EMAIL_URL_HOURLY");
        let result =
            send_confirmation_email(&reservation(TripType::Hourly), "res-42", PaymentMethod::Cash)
                .await;
        assert!(result.is_err());
    }
}
