use std::path::Path;

use chrono::{DateTime, Utc};
use comrak::{markdown_to_html, Options};
use serde::Serialize;
use tera::{Context, Tera};

use crate::article::{Article, ArticleId};
use crate::error::StoreError;

const TEMPLATE_NAME: &str = "article.html";
const DEFAULT_TEMPLATE: &str = include_str!("../templates/article.html");

/// What a template sees for one article. Keys are camelCase so templates
/// written against the backend's JSON keep working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleView {
    #[serde(rename = "article_id", skip_serializing_if = "Option::is_none")]
    pub article_id: Option<ArticleId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Markdown already converted to HTML.
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_ago: Option<i64>,
    pub publish_status: String,
}

/// Compiles the article template once and renders articles through it.
#[derive(Debug, Clone)]
pub struct ArticleRenderer {
    tera: Tera,
}

impl ArticleRenderer {
    pub fn new() -> Result<Self, StoreError> {
        Self::with_template(DEFAULT_TEMPLATE)
    }

    pub fn with_template(source: &str) -> Result<Self, StoreError> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, source)?;
        Ok(Self { tera })
    }

    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let source = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| StoreError::io(path, e))?;
        Self::with_template(&source)
    }

    /// Derives the render-time fields without touching `article`.
    pub fn view(article: &Article, now: DateTime<Utc>) -> ArticleView {
        let (days_ago, publish_status) = publish_status(article, now);
        ArticleView {
            article_id: article.article_id.clone(),
            author: article.author.clone(),
            author_url: article.author_url.clone(),
            category: article.category.clone(),
            published_on: article.published_on.clone(),
            title: article.title.clone(),
            body: body_to_html(article.body.as_deref().unwrap_or_default()),
            days_ago,
            publish_status,
        }
    }

    pub fn render(&self, article: &Article, now: DateTime<Utc>) -> Result<String, StoreError> {
        let view = Self::view(article, now);
        let context = Context::from_serialize(&view)?;
        Ok(self.tera.render(TEMPLATE_NAME, &context)?)
    }

    pub fn render_all(
        &self,
        articles: &[Article],
        now: DateTime<Utc>,
    ) -> Result<Vec<String>, StoreError> {
        articles
            .iter()
            .map(|article| self.render(article, now))
            .collect()
    }
}

/// Whole days between `published` and `now`, truncated toward zero.
pub fn days_between(published: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - published).num_days()
}

fn publish_status(article: &Article, now: DateTime<Utc>) -> (Option<i64>, String) {
    match article.published_on.as_deref() {
        None | Some("") => (None, "(draft)".to_owned()),
        Some(raw) => match article.published_at() {
            Some(published) => {
                let days = days_between(published, now);
                (Some(days), format!("published {days} days ago"))
            }
            None => (None, format!("published {raw}")),
        },
    }
}

// GFM flavour; raw HTML in bodies is passed through untouched.
fn body_to_html(markdown: &str) -> String {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.render.unsafe_ = true;
    markdown_to_html(markdown, &options)
}
