use serde::{Deserialize, Serialize};

/// Customer contact details, collected once vehicle and options are fixed.
/// Bookings are guest-only; this is the only identity the service holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub flight_number: Option<String>,
}

impl PersonalInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}
