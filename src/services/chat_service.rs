use serde::Deserialize;
use std::{env, time::Duration};

const GENERATIVE_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-pro:generateContent";

const SYSTEM_PROMPT: &str = "Tu es LilyGo, l'assistant AI d'un service de transport VIP premium en France. \
LilyGo propose des services de chauffeurs certifiés, véhicules haut de gamme, et réservations en ligne \
pour des trajets simples ou à l'heure. Réponds de manière professionnelle, helpful, et en français. \
Si la question n'est pas liée au transport, redirige poliment vers nos services.";

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

/// Thin wrapper over the hosted language model backing the site's chat
/// assistant.
pub struct ChatService {
    http_client: reqwest::Client,
    api_key: Option<String>,
}

impl ChatService {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let api_key = env::var("GOOGLE_AI_API_KEY").ok();
        if api_key.is_none() {
            eprintln!("GOOGLE_AI_API_KEY not set; the chat assistant will be unavailable");
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http_client,
            api_key,
        })
    }

    pub async fn generate_reply(&self, message: &str) -> Result<String, String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or("GOOGLE_AI_API_KEY not configured")?;

        let prompt = format!(
            "{}\n\nQuestion de l'utilisateur: {}\n\nRéponse:",
            SYSTEM_PROMPT, message
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        let response = self
            .http_client
            .post(GENERATIVE_API_URL)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("Model request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("Model returned {}", response.status()));
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse model response: {}", e))?;

        generated
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| "Model returned no candidates".to_string())
    }
}
