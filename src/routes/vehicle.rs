use actix_web::{web, HttpResponse, Responder};
use futures::TryStreamExt;
use bson::doc;
use mongodb::Client;
use std::sync::Arc;

use crate::models::vehicle::{filter_by_capacity, Vehicle};

#[derive(serde::Deserialize)]
pub struct QueryParams {
    passengers: Option<u32>,
}

/// Full fleet catalog, optionally narrowed to vehicles seating at least
/// `?passengers=` people. An empty list is a valid answer, not an error.
pub async fn get_vehicles(
    data: web::Data<Arc<Client>>,
    params: web::Query<QueryParams>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Vehicle> =
        client.database("Fleet").collection("Vehicles");

    match collection.find(doc! {}).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Vehicle>>().await {
            Ok(vehicles) => {
                let vehicles = match params.passengers {
                    Some(count) => filter_by_capacity(vehicles, count),
                    None => vehicles,
                };
                HttpResponse::Ok().json(vehicles)
            }
            Err(err) => {
                eprintln!("Failed to collect vehicles: {:?}", err);
                HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "error": "Failed to load the vehicle catalog" }))
            }
        },
        Err(err) => {
            eprintln!("Failed to query vehicles: {:?}", err);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "Failed to load the vehicle catalog" }))
        }
    }
}
