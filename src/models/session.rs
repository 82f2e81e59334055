use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

/// How long an untouched session stays addressable. Generous enough for a
/// customer comparing quotes over coffee, short enough that abandoned
/// sessions do not pile up.
pub const SESSION_TTL: Duration = Duration::from_secs(2 * 60 * 60);

use crate::models::options::AdditionalOption;
use crate::models::personal_info::PersonalInfo;
use crate::models::trip::TripDetails;
use crate::services::pricing_service::CalculatedPrice;

/// Client-visible booking step. Transitions are strictly forward except the
/// explicit payment-failure retry edge; there is no skip-ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    TripEntered,
    VehiclesLoaded,
    VehicleSelected,
    OptionsChosen,
    PersonalInfoEntered,
    PaymentPending,
    PaymentSucceeded,
    Persisted,
}

impl BookingStep {
    pub fn can_advance_to(self, next: BookingStep) -> bool {
        use BookingStep::*;

        matches!(
            (self, next),
            (TripEntered, VehiclesLoaded)
                | (VehiclesLoaded, VehicleSelected)
                // Re-picking a vehicle or re-editing a step you are on is the
                // same step, not a move backwards.
                | (VehicleSelected, VehicleSelected)
                | (VehicleSelected, OptionsChosen)
                | (OptionsChosen, OptionsChosen)
                // Skipping the add-ons entirely is allowed.
                | (VehicleSelected, PersonalInfoEntered)
                | (OptionsChosen, PersonalInfoEntered)
                | (PersonalInfoEntered, PersonalInfoEntered)
                | (PersonalInfoEntered, PaymentPending)
                | (PaymentPending, PaymentSucceeded)
                // Payment failure: back to the pre-payment step for a retry.
                | (PaymentPending, PersonalInfoEntered)
                | (PaymentSucceeded, Persisted)
        )
    }
}

/// Priced catalog entry shown on the vehicle-selection step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleQuote {
    pub vehicle_id: String,
    pub name: String,
    pub passengers: u32,
    pub luggage: u32,
    pub image_url: Option<String>,
    pub price: CalculatedPrice,
}

/// Snapshot of the chosen vehicle taken at selection time, so a later catalog
/// edit cannot shift an in-flight booking's price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedVehicle {
    pub vehicle_id: String,
    pub name: String,
    pub price: CalculatedPrice,
}

/// One in-progress booking. Owned by a single interactive session; nothing
/// here is durable until a payment event fires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingSession {
    pub token: String,
    pub step: BookingStep,
    pub trip: TripDetails,
    pub distance_km: Option<u32>,
    pub quotes: Vec<VehicleQuote>,
    pub selected_vehicle: Option<SelectedVehicle>,
    pub options: Vec<AdditionalOption>,
    pub personal_info: Option<PersonalInfo>,
}

impl BookingSession {
    pub fn new(
        trip: TripDetails,
        distance_km: Option<u32>,
        quotes: Vec<VehicleQuote>,
        options: Vec<AdditionalOption>,
    ) -> Self {
        Self {
            token: Uuid::new_v4().to_string(),
            step: BookingStep::VehiclesLoaded,
            trip,
            distance_km,
            quotes,
            selected_vehicle: None,
            options,
            personal_info: None,
        }
    }
}

struct SessionEntry {
    session: BookingSession,
    touched: Instant,
}

/// In-memory hand-off between booking steps, keyed by an opaque token. This
/// replaces the browser-local storage of the original site. Sessions expire
/// after [`SESSION_TTL`] without activity: expired entries are invisible to
/// reads and swept out on every insert, and a persisted booking removes its
/// session outright.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionEntry>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(SESSION_TTL)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Stores a session and sweeps out everything past its TTL, so the map
    /// stays bounded by the rate of new bookings.
    pub async fn insert(&self, session: BookingSession) {
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();
        sessions.retain(|_, entry| now.duration_since(entry.touched) < self.ttl);
        sessions.insert(
            session.token.clone(),
            SessionEntry {
                session,
                touched: now,
            },
        );
    }

    pub async fn get(&self, token: &str) -> Option<BookingSession> {
        self.sessions
            .read()
            .await
            .get(token)
            .filter(|entry| entry.touched.elapsed() < self.ttl)
            .map(|entry| entry.session.clone())
    }

    /// Applies `f` to the session under the write lock and refreshes its TTL;
    /// returns None when the token is unknown or expired. Step-gate checks
    /// belong inside `f` so check and transition happen under one lock.
    pub async fn update<T>(
        &self,
        token: &str,
        f: impl FnOnce(&mut BookingSession) -> T,
    ) -> Option<T> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(token) {
            Some(entry) if entry.touched.elapsed() < self.ttl => {
                entry.touched = Instant::now();
                Some(f(&mut entry.session))
            }
            _ => None,
        }
    }

    pub async fn remove(&self, token: &str) -> Option<BookingSession> {
        self.sessions
            .write()
            .await
            .remove(token)
            .map(|entry| entry.session)
    }
}
