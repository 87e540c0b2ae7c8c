use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde_json::Value;
use tracing::debug;

use crate::controllers::RatingController;
use crate::error::ApiResult;
use crate::models::rating::{MessageResponse, RatingSummary};
use crate::store::SharedStore;

/// POST /rate
pub async fn add_rating_route(
    State(store): State<SharedStore>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let body = match payload {
        Ok(Json(body)) => Some(body),
        Err(e) => {
            debug!("Unreadable rating body: {}", e);
            None
        }
    };
    RatingController::add_rating(store.as_ref(), body)
        .await
        .map(Json)
}

/// GET /ratings/{song_id}
pub async fn get_ratings_route(
    State(store): State<SharedStore>,
    Path(song_id): Path<String>,
) -> ApiResult<Json<RatingSummary>> {
    RatingController::get_ratings(store.as_ref(), &song_id)
        .await
        .map(Json)
}
