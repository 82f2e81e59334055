use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::models::trip::TripType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Stripe,
    Paypal,
    Cash,
}

impl PaymentMethod {
    /// Label used in customer-facing confirmation emails.
    pub fn display_label(&self) -> &'static str {
        match self {
            PaymentMethod::Stripe => "Carte bancaire",
            PaymentMethod::Paypal => "PayPal",
            PaymentMethod::Cash => "Espèces",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Completed,
    /// Cash bookings persist immediately and are collected later.
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub passengers: u32,
    pub flight_number: String,
}

/// The terminal, immutable booking artifact. Assembled in memory during the
/// flow and written to `Bookings/Reservations` only after a payment event;
/// later status transitions belong to external administrative tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub trip_type: TripType,
    pub departure: String,
    pub destination: Option<String>,
    pub waypoints: Vec<String>,
    pub date: String,
    pub time: String,
    pub duration_hours: Option<u32>,
    /// Resolved (or fallback) driving distance; None for hourly trips.
    pub distance_km: Option<u32>,
    pub vehicle_id: String,
    pub vehicle_name: String,
    /// Pre-options total for the chosen vehicle, kept apart from
    /// `total_price` for display and audit.
    pub vehicle_base_price: f64,
    pub selected_options: Vec<String>,
    pub guest_info: GuestInfo,
    pub total_price: f64,
    pub payment_method: Option<PaymentMethod>,
    pub payment_id: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub status: String,
    pub created_at: Option<DateTime>,
}
