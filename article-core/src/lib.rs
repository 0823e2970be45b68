pub mod api;
pub mod article;
pub mod config;
pub mod error;
pub mod render;
pub mod seed;
pub mod store;
pub mod sync;

pub use api::ArticlesApi;
pub use article::{Article, ArticleForm, ArticleId, ArticlePayload, ArticleRecord};
pub use config::{AppConfig, BodyEncoding, RenderConfig, SeedConfig, ServerConfig};
pub use error::StoreError;
pub use render::{ArticleRenderer, ArticleView};
pub use seed::SeedSource;
pub use store::shared_article_list;
pub use store::{clear_articles, list_articles, load_all, replace_articles, SharedArticleList};
pub use sync::{fetch_all, seed_backend, FetchOptions};
