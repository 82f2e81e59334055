use actix_web::{web, HttpResponse, Responder};
use futures::TryStreamExt;
use bson::{doc, DateTime};
use mongodb::Client;
use serde::Deserialize;
use std::sync::Arc;

use crate::models::deletion::DeletionRequest;
use crate::models::reservation::ReservationDocument;
use crate::services::notification_service;

#[derive(Deserialize)]
pub struct DeletionInput {
    email: String,
    phone: Option<String>,
    reason: Option<String>,
}

/// Records a personal-data deletion request. Matching reservations are only
/// referenced for the back office; nothing is removed here.
pub async fn request_deletion(
    data: web::Data<Arc<Client>>,
    input: web::Json<DeletionInput>,
) -> impl Responder {
    let input = input.into_inner();
    let email = input.email.trim().to_lowercase();

    if email.is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "email is required" }));
    }

    let client = data.into_inner();
    let reservations: mongodb::Collection<ReservationDocument> =
        client.database("Bookings").collection("Reservations");

    let mut filter = doc! { "guest_info.email": &email };
    if let Some(phone) = input.phone.as_deref().filter(|p| !p.trim().is_empty()) {
        filter = doc! {
            "$or": [
                { "guest_info.email": &email },
                { "guest_info.phone": phone.trim() },
            ]
        };
    }

    let matched = match reservations.find(filter).await {
        Ok(cursor) => match cursor.try_collect::<Vec<ReservationDocument>>().await {
            Ok(matched) => matched,
            Err(err) => {
                eprintln!("Failed to collect reservations for deletion: {:?}", err);
                return HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "error": "Failed to process the request" }));
            }
        },
        Err(err) => {
            eprintln!("Failed to query reservations for deletion: {:?}", err);
            return HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "Failed to process the request" }));
        }
    };

    if matched.is_empty() {
        return HttpResponse::NotFound().json(
            serde_json::json!({ "error": "No reservation matches this email or phone number" }),
        );
    }

    let request = DeletionRequest {
        id: None,
        email: email.clone(),
        phone: input.phone,
        reason: input.reason,
        reservation_ids: matched
            .iter()
            .filter_map(|r| r.id.map(|id| id.to_hex()))
            .collect(),
        status: "pending".to_string(),
        created_at: DateTime::now(),
        processed_at: None,
        processed_by: None,
    };

    let collection: mongodb::Collection<DeletionRequest> =
        client.database("Bookings").collection("DeletionRequests");

    match collection.insert_one(&request).await {
        Ok(result) => {
            let request_id = result
                .inserted_id
                .as_object_id()
                .map(|id| id.to_hex())
                .unwrap_or_default();

            notification_service::spawn_deletion_acknowledgement(email, request_id.clone());
            println!("Deletion request recorded with ID: {}", request_id);

            HttpResponse::Ok().json(serde_json::json!({
                "request_id": request_id,
                "matched_reservations": matched.len(),
                "status": "pending",
            }))
        }
        Err(err) => {
            eprintln!("Failed to record deletion request: {:?}", err);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "Failed to record the request" }))
        }
    }
}
