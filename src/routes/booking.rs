use actix_web::{web, HttpResponse, Responder};
use futures::TryStreamExt;
use bson::{doc, DateTime};
use mongodb::Client;
use serde::Deserialize;
use std::sync::Arc;

use crate::models::options::{self, default_catalog};
use crate::models::personal_info::PersonalInfo;
use crate::models::reservation::{PaymentMethod, ReservationDocument};
use crate::models::session::{
    BookingSession, BookingStep, SelectedVehicle, SessionStore, VehicleQuote,
};
use crate::models::trip::{TripDetails, TripType};
use crate::models::vehicle::{filter_by_capacity, Vehicle};
use crate::services::distance_service::DistanceService;
use crate::services::notification_service;
use crate::services::payment::cash::CashProvider;
use crate::services::payment::interface::{PaymentCollaborator, PaymentError, PaymentOutcome};
use crate::services::payment::paypal::PayPalProvider;
use crate::services::payment::stripe::StripeProvider;
use crate::services::pricing_service::PricingService;
use crate::services::reservation_service;

#[derive(Deserialize)]
pub struct SelectVehicleInput {
    vehicle_id: String,
}

#[derive(Deserialize)]
pub struct PayRequest {
    method: PaymentMethod,
    /// Required for card payments; the other providers ignore it.
    payment_method_id: Option<String>,
}

enum UpdateError {
    WrongStep(BookingStep),
    UnknownVehicle,
}

/// Client-facing view of a session, with the running grand total once a
/// vehicle has been chosen.
fn session_json(session: &BookingSession) -> serde_json::Value {
    let total_price = session
        .selected_vehicle
        .as_ref()
        .map(|vehicle| PricingService::grand_total(vehicle.price.total, &session.options));

    serde_json::json!({
        "token": session.token,
        "step": session.step,
        "trip": session.trip,
        "distance_km": session.distance_km,
        "quotes": session.quotes,
        "selected_vehicle": session.selected_vehicle,
        "options": session.options,
        "personal_info": session.personal_info,
        "total_price": total_price,
    })
}

fn respond_update(result: Option<Result<BookingSession, UpdateError>>) -> HttpResponse {
    match result {
        None => HttpResponse::NotFound()
            .json(serde_json::json!({ "error": "Booking session not found" })),
        Some(Err(UpdateError::WrongStep(step))) => HttpResponse::Conflict().json(
            serde_json::json!({ "error": format!("Action not available at step {:?}", step) }),
        ),
        Some(Err(UpdateError::UnknownVehicle)) => HttpResponse::NotFound()
            .json(serde_json::json!({ "error": "No such vehicle in this booking's quotes" })),
        Some(Ok(session)) => HttpResponse::Ok().json(session_json(&session)),
    }
}

/// The add-on catalog as it is seeded into a new session.
pub async fn get_option_catalog() -> impl Responder {
    HttpResponse::Ok().json(default_catalog())
}

/// Opens a booking session from the intake form: validates the trip, loads
/// and capacity-filters the fleet, resolves the driving distance for
/// point-to-point trips (with its safe fallback) and prices every candidate.
pub async fn create_booking(
    data: web::Data<Arc<Client>>,
    distance_service: web::Data<DistanceService>,
    store: web::Data<SessionStore>,
    input: web::Json<TripDetails>,
) -> impl Responder {
    let trip = input.into_inner();

    if let Err(e) = reservation_service::validate_trip(&trip) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }));
    }

    let client = data.into_inner();
    let collection: mongodb::Collection<Vehicle> =
        client.database("Fleet").collection("Vehicles");

    let vehicles = match collection.find(doc! {}).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Vehicle>>().await {
            Ok(vehicles) => vehicles,
            Err(err) => {
                eprintln!("Failed to collect vehicles: {:?}", err);
                return HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "error": "Failed to load the vehicle catalog" }));
            }
        },
        Err(err) => {
            eprintln!("Failed to query vehicles: {:?}", err);
            return HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "Failed to load the vehicle catalog" }));
        }
    };

    let candidates = filter_by_capacity(vehicles, trip.passengers);

    // Distance only matters for point-to-point pricing, and only when there
    // is something to price.
    let distance_km = match trip.trip_type {
        TripType::Simple if !candidates.is_empty() => {
            let destination = trip.destination.clone().unwrap_or_default();
            Some(
                distance_service
                    .resolve_distance_km(&trip.departure, &destination, &trip.active_waypoints())
                    .await,
            )
        }
        _ => None,
    };

    let mut quotes = Vec::with_capacity(candidates.len());
    for vehicle in &candidates {
        match PricingService::quote(vehicle, &trip, distance_km) {
            Ok(price) => quotes.push(VehicleQuote {
                vehicle_id: vehicle
                    .id
                    .map(|id| id.to_hex())
                    .unwrap_or_default(),
                name: vehicle.name.clone(),
                passengers: vehicle.passengers,
                luggage: vehicle.luggage,
                image_url: vehicle.image_url.clone(),
                price,
            }),
            Err(e) => {
                eprintln!("Failed to price vehicle {}: {}", vehicle.name, e);
                return HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "error": "Failed to price the vehicle catalog" }));
            }
        }
    }

    let session = BookingSession::new(trip, distance_km, quotes, default_catalog());
    let body = session_json(&session);
    store.insert(session).await;

    HttpResponse::Ok().json(body)
}

pub async fn get_booking(
    store: web::Data<SessionStore>,
    path: web::Path<String>,
) -> impl Responder {
    match store.get(&path.into_inner()).await {
        Some(session) => HttpResponse::Ok().json(session_json(&session)),
        None => HttpResponse::NotFound()
            .json(serde_json::json!({ "error": "Booking session not found" })),
    }
}

pub async fn select_vehicle(
    store: web::Data<SessionStore>,
    path: web::Path<String>,
    input: web::Json<SelectVehicleInput>,
) -> impl Responder {
    let token = path.into_inner();
    let input = input.into_inner();

    let result = store
        .update(&token, |session| {
            if !session.step.can_advance_to(BookingStep::VehicleSelected) {
                return Err(UpdateError::WrongStep(session.step));
            }
            let Some(quote) = session
                .quotes
                .iter()
                .find(|quote| quote.vehicle_id == input.vehicle_id)
                .cloned()
            else {
                return Err(UpdateError::UnknownVehicle);
            };

            session.selected_vehicle = Some(SelectedVehicle {
                vehicle_id: quote.vehicle_id,
                name: quote.name,
                price: quote.price,
            });
            session.step = BookingStep::VehicleSelected;
            Ok(session.clone())
        })
        .await;

    respond_update(result)
}

pub async fn toggle_option(
    store: web::Data<SessionStore>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (token, option_id) = path.into_inner();

    let result = store
        .update(&token, |session| {
            if !session.step.can_advance_to(BookingStep::OptionsChosen) {
                return Err(UpdateError::WrongStep(session.step));
            }
            // Unknown option ids fall through as a no-op by design.
            session.options = options::toggle_option(&session.options, &option_id);
            session.step = BookingStep::OptionsChosen;
            Ok(session.clone())
        })
        .await;

    respond_update(result)
}

pub async fn set_personal_info(
    store: web::Data<SessionStore>,
    path: web::Path<String>,
    input: web::Json<PersonalInfo>,
) -> impl Responder {
    let token = path.into_inner();
    let info = input.into_inner();

    if let Err(e) = reservation_service::validate_personal_info(&info) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }));
    }

    let result = store
        .update(&token, |session| {
            if !session.step.can_advance_to(BookingStep::PersonalInfoEntered) {
                return Err(UpdateError::WrongStep(session.step));
            }
            session.personal_info = Some(info);
            session.step = BookingStep::PersonalInfoEntered;
            Ok(session.clone())
        })
        .await;

    respond_update(result)
}

/// Dispatches the chosen payment provider and, on success, persists the
/// assembled reservation and fires the confirmation email. On failure the
/// session returns to the pre-payment step so the customer can retry or pick
/// another method.
pub async fn pay(
    data: web::Data<Arc<Client>>,
    stripe_client: web::Data<Arc<stripe::Client>>,
    store: web::Data<SessionStore>,
    path: web::Path<String>,
    input: web::Json<PayRequest>,
) -> impl Responder {
    let token = path.into_inner();
    let request = input.into_inner();

    if request.method == PaymentMethod::Stripe && request.payment_method_id.is_none() {
        return HttpResponse::BadRequest().json(
            serde_json::json!({ "error": "payment_method_id is required for card payments" }),
        );
    }

    // Gate check and the PaymentPending transition happen under one lock, so
    // a second pay call for the same token cannot slip through the gate.
    let gate = store
        .update(&token, |session| {
            if !session.step.can_advance_to(BookingStep::PaymentPending) {
                return Err(session.step);
            }
            session.step = BookingStep::PaymentPending;
            Ok(session.clone())
        })
        .await;

    let session = match gate {
        None => {
            return HttpResponse::NotFound()
                .json(serde_json::json!({ "error": "Booking session not found" }));
        }
        Some(Err(step)) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": format!("Payment is not available at step {:?}", step)
            }));
        }
        Some(Ok(session)) => session,
    };

    // Re-checks every validation rule; nothing is persisted if this fails.
    let mut reservation = match reservation_service::assemble(
        &session.trip,
        session.selected_vehicle.as_ref(),
        &session.options,
        session.personal_info.as_ref(),
        session.distance_km,
    ) {
        Ok(reservation) => reservation,
        Err(e) => {
            store
                .update(&token, |session| {
                    session.step = BookingStep::PersonalInfoEntered
                })
                .await;
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": e.to_string() }));
        }
    };

    let description = format!("Réservation {}", reservation.vehicle_name);
    let outcome: Result<PaymentOutcome, PaymentError> = match request.method {
        PaymentMethod::Stripe => {
            let payment_method_id = request.payment_method_id.clone().unwrap_or_default();
            StripeProvider::new(stripe_client.get_ref().clone(), payment_method_id)
                .initiate(reservation.total_price, &description)
                .await
        }
        PaymentMethod::Paypal => match PayPalProvider::from_env() {
            Ok(provider) => provider.initiate(reservation.total_price, &description).await,
            Err(e) => Err(e),
        },
        PaymentMethod::Cash => {
            CashProvider
                .initiate(reservation.total_price, &description)
                .await
        }
    };

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(error) => {
            // Back to the retry step; the reservation was never persisted.
            store
                .update(&token, |session| {
                    session.step = BookingStep::PersonalInfoEntered
                })
                .await;

            let body = serde_json::json!({ "error": error.to_string() });
            return match error {
                PaymentError::Declined(_) => HttpResponse::PaymentRequired().json(body),
                PaymentError::Provider(_) => HttpResponse::BadGateway().json(body),
            };
        }
    };

    store
        .update(&token, |session| {
            session.step = BookingStep::PaymentSucceeded
        })
        .await;

    reservation.payment_method = Some(request.method);
    reservation.payment_id = Some(outcome.reference.clone());
    reservation.payment_status = Some(outcome.status);
    reservation.created_at = Some(DateTime::now());

    let collection: mongodb::Collection<ReservationDocument> =
        data.database("Bookings").collection("Reservations");

    let reservation_id = match collection.insert_one(&reservation).await {
        Ok(result) => result
            .inserted_id
            .as_object_id()
            .map(|id| id.to_hex())
            .unwrap_or_default(),
        Err(err) => {
            // The most serious failure class: money has moved but there is no
            // durable record. Surfaced distinctly, with the payment reference.
            eprintln!("Failed to save reservation after payment: {:?}", err);
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Your payment was processed but the reservation could not be saved. \
                          Please contact support with your payment reference.",
                "payment_id": outcome.reference,
            }));
        }
    };

    // The booking is durable now; the session has served its purpose.
    store.remove(&token).await;

    notification_service::spawn_confirmation_email(
        reservation.clone(),
        reservation_id.clone(),
        request.method,
    );

    println!("Reservation saved with ID: {}", reservation_id);

    HttpResponse::Ok().json(serde_json::json!({
        "reservation_id": reservation_id,
        "payment_id": reservation.payment_id,
        "payment_status": reservation.payment_status,
        "total_price": reservation.total_price,
        "status": reservation.status,
    }))
}
