use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// GDPR-style deletion request recorded for back-office processing. The
/// matching reservations are referenced, never deleted inline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletionRequest {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub phone: Option<String>,
    pub reason: Option<String>,
    pub reservation_ids: Vec<String>,
    pub status: String,
    pub created_at: DateTime,
    pub processed_at: Option<DateTime>,
    pub processed_by: Option<String>,
}
