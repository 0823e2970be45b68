use futures_util::future::join_all;
use tracing::{debug, info, warn};

use crate::api::ArticlesApi;
use crate::article::Article;
use crate::config::SeedConfig;
use crate::error::StoreError;
use crate::seed::SeedSource;
use crate::store::{load_all, SharedArticleList};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// How many times an empty backend gets seeded before giving up.
    pub max_seed_rounds: u8,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self { max_seed_rounds: 1 }
    }
}

impl From<&SeedConfig> for FetchOptions {
    fn from(config: &SeedConfig) -> Self {
        Self {
            max_seed_rounds: config.max_seed_rounds,
        }
    }
}

/// Loads the backend's articles into `store`, seeding the backend first when
/// it is empty. Returns how many articles were appended.
///
/// Each seed round awaits every insert before listing again, so a follow-up
/// listing never races the inserts it depends on.
pub async fn fetch_all(
    api: &ArticlesApi,
    store: &SharedArticleList,
    seed: &SeedSource,
    options: &FetchOptions,
) -> Result<usize, StoreError> {
    let mut rounds = 0u8;
    loop {
        let records = api.list().await?;
        if !records.is_empty() {
            debug!(count = records.len(), rounds, "backend populated");
            return Ok(load_all(store, records).await);
        }
        if rounds >= options.max_seed_rounds {
            warn!(rounds, "backend still empty after seeding");
            return Err(StoreError::BackendStillEmpty { rounds });
        }
        rounds += 1;
        info!(round = rounds, "backend empty, seeding");
        seed_backend(api, seed).await?;
    }
}

/// Inserts every seed record. A failed insert is logged and skipped; the
/// return value counts the ones that went through.
pub async fn seed_backend(api: &ArticlesApi, seed: &SeedSource) -> Result<usize, StoreError> {
    let articles: Vec<Article> = seed
        .load(api.client())
        .await?
        .into_iter()
        .map(Article::create)
        .collect();

    let results = join_all(articles.iter().map(|article| api.insert(article))).await;

    let mut inserted = 0;
    for (article, result) in articles.iter().zip(results) {
        match result {
            Ok(_) => inserted += 1,
            Err(err) => {
                warn!(title = ?article.title, error = %err, "failed to insert seed article")
            }
        }
    }
    info!(inserted, total = articles.len(), "seed round finished");
    Ok(inserted)
}
