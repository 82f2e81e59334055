use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};

use lilygo_api::models::options::default_catalog;
use lilygo_api::models::session::{BookingSession, SessionStore, VehicleQuote};
use lilygo_api::models::trip::{TripDetails, TripType};
use lilygo_api::routes;
use lilygo_api::services::pricing_service::CalculatedPrice;

/// Test harness around the session-backed booking routes. These handlers only
/// touch the in-memory store, so no external service needs to be running.
pub struct TestApp {
    pub store: web::Data<SessionStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            store: web::Data::new(SessionStore::new()),
        }
    }

    /// Inserts a fresh session as `create_booking` would have left it and
    /// returns its token.
    pub async fn seed_session(&self) -> String {
        let session = BookingSession::new(
            sample_trip(),
            Some(12),
            sample_quotes(),
            default_catalog(),
        );
        let token = session.token.clone();
        self.store.insert(session).await;
        token
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.store.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .route(
                "/api/options",
                web::get().to(routes::booking::get_option_catalog),
            )
            .service(
                web::scope("/api/bookings")
                    .route("/{token}", web::get().to(routes::booking::get_booking))
                    .route(
                        "/{token}/vehicle",
                        web::post().to(routes::booking::select_vehicle),
                    )
                    .route(
                        "/{token}/options/{option_id}",
                        web::put().to(routes::booking::toggle_option),
                    )
                    .route(
                        "/{token}/personal-info",
                        web::post().to(routes::booking::set_personal_info),
                    ),
            )
    }
}

pub fn sample_trip() -> TripDetails {
    TripDetails {
        trip_type: TripType::Simple,
        departure: "Paris 8e".to_string(),
        destination: Some("Aéroport d'Orly".to_string()),
        waypoints: vec![],
        duration_hours: None,
        date: "2026-09-15".to_string(),
        time: "08:45".to_string(),
        passengers: 2,
    }
}

pub fn sample_quotes() -> Vec<VehicleQuote> {
    vec![
        VehicleQuote {
            vehicle_id: "veh-1".to_string(),
            name: "Berline".to_string(),
            passengers: 4,
            luggage: 3,
            image_url: None,
            price: CalculatedPrice {
                base: 20.0,
                variable: 24.0,
                total: 44.0,
            },
        },
        VehicleQuote {
            vehicle_id: "veh-2".to_string(),
            name: "Van".to_string(),
            passengers: 6,
            luggage: 6,
            image_url: None,
            price: CalculatedPrice {
                base: 35.0,
                variable: 35.0,
                total: 70.0,
            },
        },
    ]
}
