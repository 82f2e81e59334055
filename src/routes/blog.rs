use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::services::blog_service::BlogService;

#[derive(Deserialize)]
pub struct LocaleQuery {
    lang: Option<String>,
}

pub async fn get_articles(
    service: web::Data<BlogService>,
    params: web::Query<LocaleQuery>,
) -> impl Responder {
    match service.fetch_articles(params.lang.as_deref()).await {
        Ok(articles) => HttpResponse::Ok().json(articles),
        Err(e) => {
            eprintln!("Failed to fetch blog articles: {}", e);
            HttpResponse::BadGateway()
                .json(serde_json::json!({ "error": "Failed to load articles" }))
        }
    }
}

pub async fn get_article(
    service: web::Data<BlogService>,
    path: web::Path<String>,
    params: web::Query<LocaleQuery>,
) -> impl Responder {
    let slug = path.into_inner();
    match service.fetch_article(&slug, params.lang.as_deref()).await {
        Ok(Some(article)) => HttpResponse::Ok().json(article),
        Ok(None) => {
            HttpResponse::NotFound().json(serde_json::json!({ "error": "Article not found" }))
        }
        Err(e) => {
            eprintln!("Failed to fetch blog article {}: {}", slug, e);
            HttpResponse::BadGateway()
                .json(serde_json::json!({ "error": "Failed to load the article" }))
        }
    }
}
