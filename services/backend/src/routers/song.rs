use std::collections::HashMap;

use axum::{
    Json,
    extract::{Query, State},
};

use crate::controllers::SongController;
use crate::error::ApiResult;
use crate::models::song::{AverageDifficulty, SongPage, SongResponse};
use crate::store::SharedStore;

/// GET /songs
pub async fn list_songs_route(
    State(store): State<SharedStore>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<SongPage>> {
    SongController::list_songs(store.as_ref(), &query).await.map(Json)
}

/// GET /average_difficulty
pub async fn average_difficulty_route(
    State(store): State<SharedStore>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<AverageDifficulty>> {
    SongController::average_difficulty(store.as_ref(), &query)
        .await
        .map(Json)
}

/// GET /search - bare array, unlike the /songs envelope
pub async fn search_songs_route(
    State(store): State<SharedStore>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<Vec<SongResponse>>> {
    SongController::search_songs(store.as_ref(), &query)
        .await
        .map(Json)
}
