use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    AppState,
    articles::ReviewInput,
    web::{ActionResult, ApiError},
};

use super::{invalid_body, moderation_error};

/// Clients send the id back exactly as the pending list returned it, but a
/// numeric string is accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ArticleIdField {
    Number(i64),
    Text(String),
}

impl ArticleIdField {
    /// Zero and non-numeric text count as a missing id.
    fn into_id(self) -> Option<i64> {
        let id = match self {
            ArticleIdField::Number(id) => id,
            ArticleIdField::Text(text) => text.trim().parse().ok()?,
        };
        (id != 0).then_some(id)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ReviewRequest {
    id: Option<ArticleIdField>,
    action: Option<String>,
    password: Option<String>,
}

pub(super) async fn review_article(
    State(state): State<AppState>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<Json<ActionResult>, (StatusCode, Json<ApiError>)> {
    let Json(request) = payload.map_err(invalid_body)?;

    let input = ReviewInput {
        id: request.id.and_then(ArticleIdField::into_id),
        action: request.action,
        password: request.password,
    };

    let credential = state.credential();
    state
        .newsroom()
        .review(input, |password| credential.verify(password), Utc::now())
        .await
        .map_err(moderation_error)?;

    Ok(Json(ActionResult { success: true }))
}
