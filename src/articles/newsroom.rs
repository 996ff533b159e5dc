use std::cmp::Reverse;

use chrono::{DateTime, SubsecRound, Utc};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::{ArticleDraft, ArticleRecord, ReviewAction, next_article_id};
use crate::storage::{ArticleStore, StoreError};

#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("submission is missing a required field")]
    IncompleteSubmission,
    #[error("review request is missing a required field")]
    IncompleteReview,
    #[error("moderation credential did not match")]
    InvalidCredential,
    #[error("unknown review action {0:?}")]
    UnknownAction(String),
    #[error("no pending article with id {0}")]
    NotFound(i64),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Raw review request fields, before any of them is checked.
#[derive(Debug, Clone, Default)]
pub struct ReviewInput {
    pub id: Option<i64>,
    pub action: Option<String>,
    pub password: Option<String>,
}

/// The pending and published stores plus the rules for moving articles
/// between them.
///
/// Every read-modify-write cycle runs under one lock, so requests served by
/// the same process never overwrite each other. Separate processes sharing
/// the same files can still lose updates: nothing coordinates them.
pub struct Newsroom<S> {
    pending: S,
    published: S,
    write_lock: Mutex<()>,
}

impl<S: ArticleStore> Newsroom<S> {
    pub fn new(pending: S, published: S) -> Self {
        Self {
            pending,
            published,
            write_lock: Mutex::new(()),
        }
    }

    /// Appends a new pending article and returns it.
    pub async fn submit(
        &self,
        draft: ArticleDraft,
        now: DateTime<Utc>,
    ) -> Result<ArticleRecord, ModerationError> {
        // Stored timestamps only keep milliseconds.
        let now = now.trunc_subsecs(3);
        let _guard = self.write_lock.lock().await;

        let mut pending = self.pending.load().await?;
        // Intake keeps working when the published store is unreadable; ids
        // are then only guaranteed unique among pending articles.
        let published = match self.published.load().await {
            Ok(published) => published,
            Err(err) => {
                warn!(?err, "published store unreadable, picking id from pending articles");
                Vec::new()
            }
        };
        let id = next_article_id(now, pending.iter().chain(published.iter()));

        let article = draft.into_record(id, now);
        pending.push(article.clone());
        self.pending.save(&pending).await?;

        info!(
            id,
            status = article.status.as_str(),
            pending = pending.len(),
            "article submitted"
        );
        Ok(article)
    }

    pub async fn pending_articles(&self) -> Result<Vec<ArticleRecord>, StoreError> {
        self.pending.load().await
    }

    /// Published articles, most recently published first.
    pub async fn published_articles(&self) -> Result<Vec<ArticleRecord>, StoreError> {
        let mut articles = self.published.load().await?;
        articles.sort_by_key(|article| Reverse(article.published_at));
        Ok(articles)
    }

    /// Approves or rejects a pending article. Either way the article leaves
    /// the pending store; only approval copies it into the published store.
    pub async fn review<F>(
        &self,
        input: ReviewInput,
        verify_password: F,
        now: DateTime<Utc>,
    ) -> Result<ReviewAction, ModerationError>
    where
        F: FnOnce(&str) -> bool,
    {
        let ReviewInput {
            id,
            action,
            password,
        } = input;
        let present = |value: Option<String>| value.filter(|value| !value.is_empty());
        let (Some(id), Some(action), Some(password)) = (id, present(action), present(password))
        else {
            return Err(ModerationError::IncompleteReview);
        };

        if !verify_password(&password) {
            warn!(id, "rejected review request with wrong credential");
            return Err(ModerationError::InvalidCredential);
        }

        let action = ReviewAction::parse(&action).ok_or(ModerationError::UnknownAction(action))?;

        let now = now.trunc_subsecs(3);
        let _guard = self.write_lock.lock().await;

        let mut pending = self.pending.load().await?;
        let index = pending
            .iter()
            .position(|article| article.id == id)
            .ok_or(ModerationError::NotFound(id))?;

        if action == ReviewAction::Approve {
            let mut published = self.published.load().await?;
            published.push(pending[index].published(now));
            self.published.save(&published).await?;
        }

        // A crash between the two saves leaves the article in both stores.
        pending.remove(index);
        self.pending.save(&pending).await?;

        match action {
            ReviewAction::Approve => info!(id, "article approved"),
            ReviewAction::Reject => info!(id, "article rejected"),
        }

        Ok(action)
    }
}
