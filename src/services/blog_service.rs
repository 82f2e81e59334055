use serde::Deserialize;
use std::{env, time::Duration};

use crate::models::blog::{BlogArticleDetail, BlogArticleSummary, BlogImage};

const DEFAULT_ENDPOINT: &str =
    "https://eu-west-2.cdn.hygraph.com/content/cmevmjyrn01mi07w8qsukduc7/master";

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ArticlesData {
    #[serde(default)]
    articles: Vec<BlogArticleSummary>,
}

#[derive(Debug, Deserialize)]
struct ArticleData {
    article: Option<RawArticle>,
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    title: String,
    subtitle: Option<String>,
    slug: String,
    date: String,
    content: Option<RichText>,
    #[serde(default)]
    picture: Option<BlogImage>,
}

#[derive(Debug, Deserialize)]
struct RichText {
    html: String,
}

/// Read-only client for the headless CMS holding the blog articles.
pub struct BlogService {
    http_client: reqwest::Client,
    endpoint: String,
}

impl BlogService {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let endpoint =
            env::var("HYGRAPH_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            http_client,
            endpoint,
        })
    }

    // The CMS only carries fr and en locales; anything else falls back to fr.
    fn normalize_locale(locale: Option<&str>) -> &'static str {
        match locale {
            Some("en") => "en",
            _ => "fr",
        }
    }

    async fn query<T: for<'de> Deserialize<'de>>(
        &self,
        query: String,
        variables: serde_json::Value,
    ) -> Result<T, String> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| format!("CMS request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("CMS request returned {}", response.status()));
        }

        let parsed: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse CMS response: {}", e))?;

        if !parsed.errors.is_empty() {
            return Err("CMS returned errors".to_string());
        }

        parsed.data.ok_or_else(|| "CMS returned no data".to_string())
    }

    pub async fn fetch_articles(
        &self,
        locale: Option<&str>,
    ) -> Result<Vec<BlogArticleSummary>, String> {
        let locale = Self::normalize_locale(locale);
        let query = format!(
            r#"query Articles {{
                articles(locales: {locale}) {{
                    title
                    subtitle
                    slug
                    date
                    picture(locales: [{locale}, en, fr]) {{
                        url
                    }}
                }}
            }}"#
        );

        let data: ArticlesData = self.query(query, serde_json::json!({})).await?;
        Ok(data.articles)
    }

    pub async fn fetch_article(
        &self,
        slug: &str,
        locale: Option<&str>,
    ) -> Result<Option<BlogArticleDetail>, String> {
        let locale = Self::normalize_locale(locale);
        let query = format!(
            r#"query Article($slug: String!) {{
                article(where: {{ slug: $slug }}, locales: {locale}) {{
                    title
                    subtitle
                    slug
                    date
                    content {{
                        html
                    }}
                    picture(locales: [{locale}, en, fr]) {{
                        url
                    }}
                }}
            }}"#
        );

        let data: ArticleData = self
            .query(query, serde_json::json!({ "slug": slug }))
            .await?;

        Ok(data.article.map(|article| BlogArticleDetail {
            title: article.title,
            subtitle: article.subtitle,
            slug: article.slug,
            date: article.date,
            content_html: article.content.map(|c| c.html).unwrap_or_default(),
            picture: article.picture,
        }))
    }
}
