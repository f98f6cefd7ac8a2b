//! # Handlers
//!
//! This module coordinates the flow between HTTP requests and the services
//! layer. Handlers stay thin: decode, delegate, map to a response shape.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::Engine;
use bytes::Bytes;
use mime::Mime;
use serde_json::json;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use domains::ports::MediaStorage;
use domains::AppError;
use services::{AccountService, PhotoEngagementService};

use crate::dto::{
    CommentRequest, CommentResponse, ListQuery, LoginRequest, PhotoDetailResponse, PhotoResponse,
    PublishRequest, RegisterRequest, TokenResponse, VoteRequest,
};
use crate::error::ApiError;
use crate::extract::Identity;

/// State shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub engagement: Arc<PhotoEngagementService>,
    pub accounts: Arc<AccountService>,
    pub media: Arc<dyn MediaStorage>,
}

/// Builds the API router. The uploads directory and CORS policy are mounted
/// by the binary, which owns their configuration.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/photos", post(publish).get(list_photos))
        .route("/api/photos/{id}", get(get_photo))
        .route("/api/photos/{id}/vote", post(vote))
        .route("/api/photos/{id}/comment", post(add_comment))
        .route("/api/photos/{id}/flag", post(flag))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .accounts
        .register(&req.username, &req.email, &req.password)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "user created successfully" })),
    ))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state.accounts.authenticate(&req.email, &req.password).await?;
    Ok(Json(TokenResponse { token }))
}

/// Publish flow: decode the payload, store the blob, record the document.
async fn publish(
    State(state): State<AppState>,
    Identity(owner): Identity,
    Json(req): Json<PublishRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // 1. Decode the base64 image payload.
    let data = base64::engine::general_purpose::STANDARD
        .decode(req.image_base64.as_bytes())
        .map_err(|_| AppError::ValidationError("image payload is not valid base64".into()))?;

    // 2. Validate the declared content type.
    let content_type: Mime = req
        .content_type
        .parse()
        .map_err(|_| AppError::ValidationError("content type is not a valid MIME tag".into()))?;

    // 3. Store the blob first; the document only records its locator.
    let locator = state.media.save(Bytes::from(data), &content_type).await?;

    // 4. Create the photo document with zeroed engagement state.
    let photo = state
        .engagement
        .publish(owner, &req.name, req.description, &locator, content_type.as_ref())
        .await?;

    let media = Arc::clone(&state.media);
    Ok((
        StatusCode::CREATED,
        Json(PhotoResponse::from_photo(photo, |loc| media.url(loc))),
    ))
}

async fn list_photos(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<PhotoResponse>>, ApiError> {
    let photos = state.engagement.list(query.hot()).await?;
    let media = Arc::clone(&state.media);
    let out = photos
        .into_iter()
        .map(|p| PhotoResponse::from_photo(p, |loc| media.url(loc)))
        .collect();
    Ok(Json(out))
}

async fn get_photo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PhotoDetailResponse>, ApiError> {
    let detail = state.engagement.get(id).await?;
    let media = Arc::clone(&state.media);
    Ok(Json(PhotoDetailResponse::from_detail(detail, |loc| {
        media.url(loc)
    })))
}

async fn vote(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(id): Path<Uuid>,
    Json(req): Json<VoteRequest>,
) -> Result<Json<PhotoResponse>, ApiError> {
    let photo = state.engagement.vote(id, user, &req.action).await?;
    let media = Arc::clone(&state.media);
    Ok(Json(PhotoResponse::from_photo(photo, |loc| media.url(loc))))
}

async fn add_comment(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(id): Path<Uuid>,
    Json(req): Json<CommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state.engagement.add_comment(id, user, &req.text).await?;
    Ok((StatusCode::CREATED, Json(CommentResponse::from(view))))
}

async fn flag(
    State(state): State<AppState>,
    Identity(_user): Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<PhotoResponse>, ApiError> {
    let photo = state.engagement.flag(id).await?;
    let media = Arc::clone(&state.media);
    Ok(Json(PhotoResponse::from_photo(photo, |loc| media.url(loc))))
}
