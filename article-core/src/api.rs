use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, info};
use url::Url;

use crate::article::{Article, ArticleId, ArticleRecord};
use crate::config::{BodyEncoding, ServerConfig};
use crate::error::StoreError;

/// REST client for one article collection (`/articles`) and its single
/// resources (`/articles/{id}`).
#[derive(Debug, Clone)]
pub struct ArticlesApi {
    client: Client,
    collection: Url,
    encoding: BodyEncoding,
    timeout: Option<Duration>,
}

impl ArticlesApi {
    pub fn new(client: Client, base_url: &Url, collection: &str) -> Result<Self, StoreError> {
        let mut url = base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::CannotBeABase(base_url.to_string()))?
            .pop_if_empty()
            .push(collection);
        Ok(Self {
            client,
            collection: url,
            encoding: BodyEncoding::default(),
            timeout: None,
        })
    }

    pub fn from_config(client: Client, config: &ServerConfig) -> Result<Self, StoreError> {
        Ok(Self::new(client, &config.base_url()?, &config.collection)?
            .with_body_encoding(config.body_encoding)
            .with_timeout(config.request_timeout()))
    }

    pub fn with_body_encoding(mut self, encoding: BodyEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn collection_url(&self) -> &Url {
        &self.collection
    }

    pub fn resource_url(&self, id: &ArticleId) -> Url {
        let mut url = self.collection.clone();
        // the collection url was built through path_segments_mut already
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(&id.to_string());
        }
        url
    }

    /// `GET /articles`. An empty vector means the backend holds nothing yet.
    pub async fn list(&self) -> Result<Vec<ArticleRecord>, StoreError> {
        let response = self
            .send(self.client.get(self.collection.clone()))
            .await?;
        let bytes = response.bytes().await?;
        let records: Vec<ArticleRecord> = serde_json::from_slice(&bytes)?;
        debug!(count = records.len(), url = %self.collection, "articles listed");
        Ok(records)
    }

    /// `POST /articles` with the six mutable fields. The backend-assigned
    /// identifier is not copied back onto `article`.
    pub async fn insert(&self, article: &Article) -> Result<String, StoreError> {
        let request = self.with_payload(self.client.post(self.collection.clone()), article);
        let body = self.send(request).await?.text().await?;
        info!(url = %self.collection, response = %body, "article inserted");
        Ok(body)
    }

    /// `PUT /articles/{id}` with the six mutable fields.
    pub async fn update(&self, article: &Article) -> Result<String, StoreError> {
        let id = article.article_id.as_ref().ok_or(StoreError::MissingId)?;
        let url = self.resource_url(id);
        let request = self.with_payload(self.client.put(url.clone()), article);
        let body = self.send(request).await?.text().await?;
        info!(url = %url, response = %body, "article updated");
        Ok(body)
    }

    /// `DELETE /articles/{id}`.
    pub async fn delete(&self, article: &Article) -> Result<String, StoreError> {
        let id = article.article_id.as_ref().ok_or(StoreError::MissingId)?;
        self.delete_by_id(id).await
    }

    pub async fn delete_by_id(&self, id: &ArticleId) -> Result<String, StoreError> {
        let url = self.resource_url(id);
        let body = self
            .send(self.client.delete(url.clone()))
            .await?
            .text()
            .await?;
        info!(url = %url, response = %body, "article deleted");
        Ok(body)
    }

    /// `DELETE /articles`. Leaves any in-memory list alone.
    pub async fn truncate(&self) -> Result<String, StoreError> {
        let body = self
            .send(self.client.delete(self.collection.clone()))
            .await?
            .text()
            .await?;
        info!(url = %self.collection, response = %body, "article table truncated");
        Ok(body)
    }

    fn with_payload(&self, request: RequestBuilder, article: &Article) -> RequestBuilder {
        match self.encoding {
            BodyEncoding::Form => request.form(&article.form_fields()),
            BodyEncoding::Json => request.json(&article.payload()),
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let request = match self.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        };
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                status,
                url: response.url().to_string(),
            });
        }
        Ok(response)
    }
}
