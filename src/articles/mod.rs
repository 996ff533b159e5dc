use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod newsroom;

pub use newsroom::{ModerationError, Newsroom, ReviewInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    Pending,
    Published,
}

impl ArticleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Pending => "pending",
            ArticleStatus::Published => "published",
        }
    }
}

/// One submitted article, as persisted in either store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub content: String,
    pub status: ArticleStatus,
    #[serde(with = "iso_millis")]
    pub submitted_at: DateTime<Utc>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "iso_millis_opt"
    )]
    pub published_at: Option<DateTime<Utc>>,
}

impl ArticleRecord {
    /// Copy of this record moved to the published state. The publish stamp
    /// never precedes the submission stamp.
    pub fn published(&self, now: DateTime<Utc>) -> Self {
        Self {
            status: ArticleStatus::Published,
            published_at: Some(now.max(self.submitted_at)),
            ..self.clone()
        }
    }
}

/// Title, author and content of a submission, already trimmed and checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    title: String,
    author: String,
    content: String,
}

impl ArticleDraft {
    /// Returns `None` when any field is absent or blank.
    pub fn new(
        title: Option<&str>,
        author: Option<&str>,
        content: Option<&str>,
    ) -> Option<Self> {
        let required = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        Some(Self {
            title: required(title)?,
            author: required(author)?,
            content: required(content)?,
        })
    }

    pub fn into_record(self, id: i64, now: DateTime<Utc>) -> ArticleRecord {
        ArticleRecord {
            id,
            title: self.title,
            author: self.author,
            content: self.content,
            status: ArticleStatus::Pending,
            submitted_at: now,
            published_at: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Approve,
    Reject,
}

impl ReviewAction {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "approve" => Some(ReviewAction::Approve),
            "reject" => Some(ReviewAction::Reject),
            _ => None,
        }
    }
}

/// Picks the id for a new article: the submission time in epoch milliseconds,
/// bumped past every id already handed out so rapid submissions never collide.
pub fn next_article_id<'a>(
    now: DateTime<Utc>,
    existing: impl IntoIterator<Item = &'a ArticleRecord>,
) -> i64 {
    let candidate = now.timestamp_millis();
    existing
        .into_iter()
        .map(|article| article.id.saturating_add(1))
        .fold(candidate, i64::max)
}

/// Timestamps are written the way browsers print `Date#toISOString`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|value| value.with_timezone(&Utc))
            .map_err(D::Error::custom)
    }
}

mod iso_millis_opt {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => super::iso_millis::serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wrapper(#[serde(with = "super::iso_millis")] DateTime<Utc>);

        Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|Wrapper(value)| value))
    }
}
