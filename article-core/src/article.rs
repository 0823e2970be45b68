use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Backend-assigned identifier. Postgres-backed servers hand out integers,
/// others strings; both are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArticleId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArticleId::Number(n) => write!(f, "{n}"),
            ArticleId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ArticleId {
    fn from(value: i64) -> Self {
        ArticleId::Number(value)
    }
}

impl From<&str> for ArticleId {
    fn from(value: &str) -> Self {
        ArticleId::Text(value.to_owned())
    }
}

/// A record as it travels on the wire. Every field may be missing; keys the
/// model does not know about are dropped during decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleRecord {
    #[serde(
        rename = "article_id",
        alias = "articleId",
        skip_serializing_if = "Option::is_none"
    )]
    pub article_id: Option<ArticleId>,
    pub author: Option<String>,
    pub author_url: Option<String>,
    pub body: Option<String>,
    pub category: Option<String>,
    pub published_on: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(rename = "article_id", skip_serializing_if = "Option::is_none")]
    pub article_id: Option<ArticleId>,
    pub author: Option<String>,
    pub author_url: Option<String>,
    pub body: Option<String>,
    pub category: Option<String>,
    pub published_on: Option<String>,
    pub title: Option<String>,
}

impl Article {
    /// Builds an article from a raw record. Nothing is validated and nothing
    /// is registered anywhere.
    pub fn create(record: ArticleRecord) -> Self {
        Self {
            article_id: record.article_id,
            author: record.author,
            author_url: record.author_url,
            body: record.body,
            category: record.category,
            published_on: record.published_on,
            title: record.title,
        }
    }

    pub fn is_draft(&self) -> bool {
        self.published_on.as_deref().map_or(true, str::is_empty)
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_on.as_deref().and_then(parse_published_on)
    }

    /// The six mutable fields sent on create and update.
    pub fn payload(&self) -> ArticlePayload<'_> {
        ArticlePayload {
            author: self.author.as_deref(),
            author_url: self.author_url.as_deref(),
            body: self.body.as_deref(),
            category: self.category.as_deref(),
            published_on: self.published_on.as_deref(),
            title: self.title.as_deref(),
        }
    }

    /// Form-encoded variant of [`Article::payload`]: missing values go out
    /// as empty strings so every one of the six keys is present.
    pub fn form_fields(&self) -> ArticleForm<'_> {
        ArticleForm {
            author: self.author.as_deref().unwrap_or_default(),
            author_url: self.author_url.as_deref().unwrap_or_default(),
            body: self.body.as_deref().unwrap_or_default(),
            category: self.category.as_deref().unwrap_or_default(),
            published_on: self.published_on.as_deref().unwrap_or_default(),
            title: self.title.as_deref().unwrap_or_default(),
        }
    }
}

impl From<ArticleRecord> for Article {
    fn from(record: ArticleRecord) -> Self {
        Article::create(record)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePayload<'a> {
    pub author: Option<&'a str>,
    pub author_url: Option<&'a str>,
    pub body: Option<&'a str>,
    pub category: Option<&'a str>,
    pub published_on: Option<&'a str>,
    pub title: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleForm<'a> {
    pub author: &'a str,
    pub author_url: &'a str,
    pub body: &'a str,
    pub category: &'a str,
    pub published_on: &'a str,
    pub title: &'a str,
}

/// Parses the loose date strings backends produce for `publishedOn`.
/// Values without an offset are read as UTC.
pub fn parse_published_on(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
