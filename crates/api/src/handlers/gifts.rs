//! Handlers for the gift catalog.
//!
//! Thin adapters over [`GiftService`](crate::services::gifts::GiftService):
//! path ids are passed through as raw strings so the service owns the
//! format check, and every payload leaves wrapped in an [`Envelope`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use giftlist_core::error::CoreError;
use giftlist_core::gift::{GiftInput, GiftPatch, GiftRecord};

use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::response::Envelope;
use crate::state::AppState;

/// POST /gifts
pub async fn create_gift(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<GiftInput>,
) -> AppResult<impl IntoResponse> {
    let gift = state.gifts.create(input).await?;

    tracing::info!(gift_id = %gift.id(), title = %gift.title(), "Gift created");

    Ok(Envelope::success(StatusCode::CREATED, gift.to_record()))
}

/// GET /gifts
///
/// Newest first.
pub async fn list_gifts(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let gifts = state.gifts.find_all().await?;
    let records: Vec<GiftRecord> = gifts.into_iter().map(GiftRecord::from).collect();

    Ok(Envelope::success(StatusCode::OK, records))
}

/// GET /gifts/{id}
pub async fn get_gift(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let gift = state
        .gifts
        .find_one(&id)
        .await?
        .ok_or_else(|| CoreError::gift_not_found(&id))?;

    Ok(Envelope::success(StatusCode::OK, gift.to_record()))
}

/// PUT /gifts/{id}
///
/// Accepts any subset of the four business fields.
pub async fn update_gift(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<GiftPatch>,
) -> AppResult<impl IntoResponse> {
    let gift = state.gifts.update(&id, patch).await?;

    tracing::info!(gift_id = %gift.id(), "Gift updated");

    Ok(Envelope::success(StatusCode::OK, gift.to_record()))
}

/// DELETE /gifts/{id}
pub async fn delete_gift(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let gift = state.gifts.remove(&id).await?;

    tracing::info!(gift_id = %gift.id(), title = %gift.title(), "Gift deleted");

    Ok(StatusCode::NO_CONTENT)
}
