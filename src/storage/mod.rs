use std::{
    future::Future,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tokio::fs;
use uuid::Uuid;

use crate::articles::ArticleRecord;

pub const PENDING_FILE: &str = "pending-articles.json";
pub const PUBLISHED_FILE: &str = "published-articles.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to {action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("store file {} is not a valid article list", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize articles for {}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A durable, insertion-ordered sequence of articles that is always read and
/// written as a whole.
pub trait ArticleStore: Send + Sync {
    /// Returns the full contents, or an empty list when nothing was ever saved.
    fn load(&self) -> impl Future<Output = Result<Vec<ArticleRecord>, StoreError>> + Send;

    /// Replaces the full contents.
    fn save(&self, articles: &[ArticleRecord])
    -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Pretty-printed JSON array kept in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn pending_in(data_dir: &Path) -> Self {
        Self::new(data_dir.join(PENDING_FILE))
    }

    pub fn published_in(data_dir: &Path) -> Self {
        Self::new(data_dir.join(PUBLISHED_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, action: &'static str, source: std::io::Error) -> StoreError {
        StoreError::Io {
            action,
            path: self.path.clone(),
            source,
        }
    }
}

impl ArticleStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<ArticleRecord>, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(self.io_error("read", err)),
        };

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    async fn save(&self, articles: &[ArticleRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(articles).map_err(|source| StoreError::Encode {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|err| self.io_error("create directory for", err))?;
        }

        // Readers never observe a half-written file.
        let tmp_path = self.path.with_extension(format!("{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, json)
            .await
            .map_err(|err| self.io_error("write", err))?;

        if let Err(err) = fs::rename(&tmp_path, &self.path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(self.io_error("replace", err));
        }

        Ok(())
    }
}
