use std::path::Path;

use article_core::{
    fetch_all, list_articles, shared_article_list, AppConfig, Article, ArticleId,
    ArticleRecord, ArticleRenderer, ArticlesApi, FetchOptions, SeedSource, SharedArticleList,
    StoreError,
};
use chrono::Utc;
use reqwest::{redirect, ClientBuilder};
use tracing::{info, warn};

use crate::args::{CliArgs, Command};

pub struct App {
    api: ArticlesApi,
    store: SharedArticleList,
    renderer: ArticleRenderer,
    seed: SeedSource,
    options: FetchOptions,
    text_width: Option<usize>,
}

impl App {
    pub async fn build(args: &CliArgs, config: &AppConfig) -> Result<Self, StoreError> {
        let client = ClientBuilder::new()
            .redirect(redirect::Policy::limited(5))
            .user_agent(config.server.user_agent.clone())
            .build()?;
        let api = ArticlesApi::from_config(client, &config.server)?;

        let template = args
            .template
            .as_ref()
            .or(config.render.template_path.as_ref());
        let renderer = match template {
            Some(path) => ArticleRenderer::from_file(path).await?,
            None => ArticleRenderer::new()?,
        };

        let seed = match &args.seed {
            Some(path) => SeedSource::File(path.clone()),
            None => SeedSource::from_config(&config.seed)?,
        };

        Ok(Self {
            api,
            store: shared_article_list(Vec::new()),
            renderer,
            seed,
            options: FetchOptions::from(&config.seed),
            text_width: args.text.then_some(config.render.text_width),
        })
    }

    pub async fn run(&self, command: &Command) -> Result<(), StoreError> {
        match command {
            Command::List => self.list().await,
            Command::Insert(path) => {
                let article = read_article(path).await?;
                self.api.insert(&article).await.map(drop)
            }
            Command::Update(path) => {
                let article = read_article(path).await?;
                self.api.update(&article).await.map(drop)
            }
            Command::Delete(id) => self.api.delete_by_id(&parse_id(id)).await.map(drop),
            Command::Truncate => self.api.truncate().await.map(drop),
            Command::Help => Ok(()),
        }
    }

    async fn list(&self) -> Result<(), StoreError> {
        let loaded = fetch_all(&self.api, &self.store, &self.seed, &self.options).await?;
        info!(loaded, "articles ready");

        let articles = list_articles(&self.store).await;
        let now = Utc::now();
        for html in self.renderer.render_all(&articles, now)? {
            let Some(width) = self.text_width else {
                println!("{html}");
                continue;
            };
            match html2text::config::plain().string_from_read(html.as_bytes(), width) {
                Ok(text) => println!("{text}"),
                Err(err) => {
                    warn!(error = %err, "could not convert article to text, printing html");
                    println!("{html}");
                }
            }
        }
        Ok(())
    }
}

async fn read_article(path: &Path) -> Result<Article, StoreError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let record: ArticleRecord = serde_json::from_slice(&bytes)?;
    Ok(Article::create(record))
}

fn parse_id(raw: &str) -> ArticleId {
    raw.parse::<i64>()
        .map(ArticleId::Number)
        .unwrap_or_else(|_| ArticleId::Text(raw.to_owned()))
}
