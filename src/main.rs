use std::env;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use lilygo_api::db;
use lilygo_api::models::session::SessionStore;
use lilygo_api::routes;
use lilygo_api::services::blog_service::BlogService;
use lilygo_api::services::chat_service::ChatService;
use lilygo_api::services::distance_service::DistanceService;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    println!("Logger initialized");

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        println!("Release mode");
    }

    let host = env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);
    println!("Attempting to bind to {}:{}", host, port);

    let mongo_uri = env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    println!("Got MongoDB URI, attempting connection...");
    let client = db::mongo::create_mongo_client(&mongo_uri)
        .await
        .expect("Failed to build the MongoDB client");
    println!("MongoDB connection established");

    let stripe_secret = env::var("STRIPE_SECRET_KEY").unwrap_or_else(|_| {
        eprintln!("STRIPE_SECRET_KEY not set; card payments will fail");
        String::new()
    });
    let stripe_client = Arc::new(stripe::Client::new(stripe_secret));

    let distance_service = web::Data::new(
        DistanceService::new().expect("Failed to build the distance resolver"),
    );
    let chat_service =
        web::Data::new(ChatService::new().expect("Failed to build the chat assistant"));
    let blog_service = web::Data::new(BlogService::new().expect("Failed to build the CMS client"));

    // Shared across all workers; created outside the factory closure.
    let session_store = web::Data::new(SessionStore::new());

    println!("Starting HTTP server...");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(web::Data::new(client.clone()))
            .app_data(web::Data::new(stripe_client.clone()))
            .app_data(distance_service.clone())
            .app_data(chat_service.clone())
            .app_data(blog_service.clone())
            .app_data(session_store.clone())
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/api")
                    .route("/vehicles", web::get().to(routes::vehicle::get_vehicles))
                    .route("/options", web::get().to(routes::booking::get_option_catalog))
                    .service(
                        web::scope("/bookings")
                            .route("", web::post().to(routes::booking::create_booking))
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
                            )
                            .route("/{token}/pay", web::post().to(routes::booking::pay)),
                    )
                    .route("/chat", web::post().to(routes::chat::chat))
                    .route(
                        "/delete-account",
                        web::post().to(routes::deletion::request_deletion),
                    )
                    .service(
                        web::scope("/blog")
                            .route("/articles", web::get().to(routes::blog::get_articles))
                            .route(
                                "/articles/{slug}",
                                web::get().to(routes::blog::get_article),
                            ),
                    ),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
