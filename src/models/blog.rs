use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogImage {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogArticleSummary {
    pub title: String,
    pub subtitle: Option<String>,
    pub slug: String,
    pub date: String,
    #[serde(default)]
    pub picture: Option<BlogImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogArticleDetail {
    pub title: String,
    pub subtitle: Option<String>,
    pub slug: String,
    pub date: String,
    pub content_html: String,
    pub picture: Option<BlogImage>,
}
