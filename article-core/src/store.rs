use std::cmp::Reverse;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::article::{parse_published_on, Article, ArticleRecord};

/// The ordered, in-memory article list. Owned by whoever builds it and passed
/// to the renderer and the sync code explicitly.
pub type SharedArticleList = Arc<RwLock<Vec<Article>>>;

pub fn shared_article_list(initial: Vec<Article>) -> SharedArticleList {
    Arc::new(RwLock::new(initial))
}

/// Sorts `rows` newest first and appends an article for each. Rows without a
/// readable date go after every dated row; ties keep their input order.
/// Never clears what is already stored.
pub async fn load_all(store: &SharedArticleList, rows: Vec<ArticleRecord>) -> usize {
    let articles = sorted_articles(rows);
    let loaded = articles.len();
    let mut list = store.write().await;
    list.extend(articles);
    debug!(loaded, total = list.len(), "articles loaded");
    loaded
}

/// Clears the list and loads `rows` under a single write lock.
pub async fn replace_articles(store: &SharedArticleList, rows: Vec<ArticleRecord>) -> usize {
    let articles = sorted_articles(rows);
    let loaded = articles.len();
    let mut list = store.write().await;
    *list = articles;
    loaded
}

pub async fn clear_articles(store: &SharedArticleList) {
    store.write().await.clear();
}

pub async fn list_articles(store: &SharedArticleList) -> Vec<Article> {
    store.read().await.clone()
}

fn sorted_articles(mut rows: Vec<ArticleRecord>) -> Vec<Article> {
    rows.sort_by_key(|row| {
        Reverse(
            row.published_on
                .as_deref()
                .and_then(parse_published_on),
        )
    });
    rows.into_iter().map(Article::create).collect()
}
