use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::services::chat_service::ChatService;

#[derive(Deserialize)]
pub struct ChatInput {
    #[serde(default)]
    message: String,
}

/// Single-turn chat with the site assistant. Stateless: each request carries
/// the whole message, nothing is stored.
pub async fn chat(
    service: web::Data<ChatService>,
    input: web::Json<ChatInput>,
) -> impl Responder {
    let message = input.message.trim();
    if message.is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Message is required" }));
    }

    match service.generate_reply(message).await {
        Ok(reply) => HttpResponse::Ok().json(serde_json::json!({ "reply": reply })),
        Err(e) => {
            eprintln!("Chat assistant failed: {}", e);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "The assistant is unavailable right now" }))
        }
    }
}
