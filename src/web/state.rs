use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    articles::Newsroom,
    config::AppConfig,
    storage::JsonFileStore,
    web::auth::AdminCredential,
};

#[derive(Clone)]
pub struct AppState {
    newsroom: Arc<Newsroom<JsonFileStore>>,
    credential: Arc<AdminCredential>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let credential = AdminCredential::from_source(&config.credential)
            .context("failed to prepare moderation credential")?;

        let pending = JsonFileStore::pending_in(&config.data_dir);
        let published = JsonFileStore::published_in(&config.data_dir);
        info!(
            pending = %pending.path().display(),
            published = %published.path().display(),
            "article stores configured"
        );

        Ok(Self {
            newsroom: Arc::new(Newsroom::new(pending, published)),
            credential: Arc::new(credential),
        })
    }

    pub fn newsroom(&self) -> &Newsroom<JsonFileStore> {
        &self.newsroom
    }

    pub fn credential(&self) -> &AdminCredential {
        &self.credential
    }
}
