use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::{error, warn};

mod admin;

use crate::{
    AppState,
    articles::{ArticleDraft, ModerationError},
    storage::StoreError,
    web::{
        ApiError, ApiMessage, ArticleList, json_error,
        responses::{MSG_INTERNAL, MSG_INVALID_BODY, method_not_allowed},
    },
};

const MSG_SUBMITTED: &str = "Artículo enviado correctamente";
const MSG_MISSING_SUBMISSION_FIELDS: &str = "Faltan campos requeridos";
const MSG_MISSING_REVIEW_FIELDS: &str = "Faltan datos requeridos";
const MSG_WRONG_PASSWORD: &str = "Contraseña incorrecta";
const MSG_UNKNOWN_ACTION: &str = "Acción no válida";
const MSG_NOT_FOUND: &str = "Artículo no encontrado";

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/submit",
            post(submit_article).fallback(method_not_allowed),
        )
        .route(
            "/api/pending-articles",
            get(pending_articles).fallback(method_not_allowed),
        )
        .route(
            "/api/published-articles",
            get(published_articles).fallback(method_not_allowed),
        )
        .route(
            "/api/review-article",
            post(admin::review_article).fallback(method_not_allowed),
        )
}

#[derive(Debug, Default, Deserialize)]
struct SubmitRequest {
    title: Option<String>,
    author: Option<String>,
    content: Option<String>,
}

async fn submit_article(
    State(state): State<AppState>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<ApiMessage>, (StatusCode, Json<ApiError>)> {
    let Json(request) = payload.map_err(invalid_body)?;

    let draft = ArticleDraft::new(
        request.title.as_deref(),
        request.author.as_deref(),
        request.content.as_deref(),
    )
    .ok_or(ModerationError::IncompleteSubmission)
    .map_err(moderation_error)?;

    state
        .newsroom()
        .submit(draft, Utc::now())
        .await
        .map_err(moderation_error)?;

    Ok(Json(ApiMessage::new(MSG_SUBMITTED)))
}

async fn pending_articles(
    State(state): State<AppState>,
) -> Result<Json<ArticleList>, (StatusCode, Json<ApiError>)> {
    let articles = state
        .newsroom()
        .pending_articles()
        .await
        .map_err(store_error)?;

    Ok(Json(ArticleList { articles }))
}

async fn published_articles(
    State(state): State<AppState>,
) -> Result<Json<ArticleList>, (StatusCode, Json<ApiError>)> {
    let articles = state
        .newsroom()
        .published_articles()
        .await
        .map_err(store_error)?;

    Ok(Json(ArticleList { articles }))
}

fn invalid_body(rejection: JsonRejection) -> (StatusCode, Json<ApiError>) {
    warn!(%rejection, "rejected malformed request body");
    json_error(StatusCode::BAD_REQUEST, MSG_INVALID_BODY)
}

fn store_error(err: StoreError) -> (StatusCode, Json<ApiError>) {
    error!(?err, "article store failure");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL)
}

fn moderation_error(err: ModerationError) -> (StatusCode, Json<ApiError>) {
    match err {
        ModerationError::IncompleteSubmission => {
            json_error(StatusCode::BAD_REQUEST, MSG_MISSING_SUBMISSION_FIELDS)
        }
        ModerationError::IncompleteReview => {
            json_error(StatusCode::BAD_REQUEST, MSG_MISSING_REVIEW_FIELDS)
        }
        ModerationError::InvalidCredential => {
            json_error(StatusCode::UNAUTHORIZED, MSG_WRONG_PASSWORD)
        }
        ModerationError::UnknownAction(_) => {
            json_error(StatusCode::BAD_REQUEST, MSG_UNKNOWN_ACTION)
        }
        ModerationError::NotFound(_) => json_error(StatusCode::NOT_FOUND, MSG_NOT_FOUND),
        ModerationError::Store(err) => store_error(err),
    }
}
