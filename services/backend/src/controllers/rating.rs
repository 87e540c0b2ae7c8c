use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    models::rating::{MessageResponse, RatingSummary, MAX_RATING, MIN_RATING},
    store::SongStore,
};

pub struct RatingController;

impl RatingController {
    /// Record one rating for an existing song.
    ///
    /// The existence check and the insert are two separate store calls; a song
    /// removed in between would still receive the rating.
    pub async fn add_rating(
        store: &dyn SongStore,
        body: Option<Value>,
    ) -> ApiResult<MessageResponse> {
        let body = body.unwrap_or(Value::Null);
        let song_id = body
            .get("song_id")
            .filter(|v| !v.is_null() && v.as_str() != Some(""));
        let rating = body
            .get("rating")
            .and_then(Value::as_i64)
            .filter(|r| (MIN_RATING..=MAX_RATING).contains(r));

        let (Some(song_id), Some(rating)) = (song_id, rating) else {
            return Err(ApiError::validation("Invalid song_id or rating"));
        };
        let song_id = parse_song_id(song_id.as_str().unwrap_or_default())?;

        if store.find_song(song_id).await?.is_none() {
            debug!("Rating rejected, no song {}", song_id);
            return Err(ApiError::not_found("Song not found"));
        }

        // In range 1..=5 after the filter above.
        store.insert_rating(song_id, rating as i32).await?;
        info!("Added rating {} for song {}", rating, song_id);

        Ok(MessageResponse {
            message: "Rating added successfully".to_string(),
        })
    }

    pub async fn get_ratings(store: &dyn SongStore, song_id: &str) -> ApiResult<RatingSummary> {
        let song_id = parse_song_id(song_id)?;
        let ratings: Vec<i32> = store
            .ratings_for_song(song_id)
            .await?
            .iter()
            .map(|r| r.rating)
            .collect();
        debug!("Found {} ratings for song {}", ratings.len(), song_id);

        RatingSummary::from_ratings(&ratings)
            .ok_or_else(|| ApiError::not_found("No ratings found for this song"))
    }
}

fn parse_song_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::validation("Invalid song_id format"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::{sample_songs, MemoryStore};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    async fn store_with_song() -> (MemoryStore, Uuid) {
        let store = MemoryStore::with_songs(sample_songs(2)).await;
        let id = store.song_ids().await[0];
        (store, id)
    }

    #[tokio::test]
    async fn adds_rating_for_existing_song() {
        let (store, id) = store_with_song().await;

        let response = RatingController::add_rating(
            &store,
            Some(json!({ "song_id": id.to_string(), "rating": 4 })),
        )
        .await
        .unwrap();

        assert_eq!(response.message, "Rating added successfully");
        let stored = store.ratings_for_song(id).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].rating, 4);
        assert_eq!(stored[0].song_id, id);
    }

    #[rstest]
    #[case(json!({ "rating": 6 }))]
    #[case(json!({ "rating": 0 }))]
    #[case(json!({ "rating": -2 }))]
    #[case(json!({ "rating": 3.5 }))]
    #[case(json!({ "rating": "5" }))]
    #[case(json!({}))]
    #[tokio::test]
    async fn rejects_missing_or_out_of_range_rating(#[case] body: Value) {
        let (store, id) = store_with_song().await;
        let mut body = body;
        body["song_id"] = json!(id.to_string());

        let err = RatingController::add_rating(&store, Some(body))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(err.to_string(), "Invalid song_id or rating");
        assert_eq!(store.rating_count().await, 0);
    }

    #[rstest]
    #[case(json!({ "rating": 3 }))]
    #[case(json!({ "song_id": "", "rating": 3 }))]
    #[case(json!({ "song_id": null, "rating": 3 }))]
    #[case(json!("not an object"))]
    #[tokio::test]
    async fn rejects_missing_song_id(#[case] body: Value) {
        let (store, _) = store_with_song().await;

        let err = RatingController::add_rating(&store, Some(body))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid song_id or rating");
    }

    #[tokio::test]
    async fn rejects_missing_body() {
        let (store, _) = store_with_song().await;

        let err = RatingController::add_rating(&store, None).await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid song_id or rating");
    }

    #[rstest]
    #[case(json!("not-a-uuid"))]
    #[case(json!(12345))]
    #[tokio::test]
    async fn rejects_malformed_song_id(#[case] song_id: Value) {
        let (store, _) = store_with_song().await;

        let err = RatingController::add_rating(&store, Some(json!({ "song_id": song_id, "rating": 3 })))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(err.to_string(), "Invalid song_id format");
    }

    #[tokio::test]
    async fn unknown_song_is_not_found() {
        let (store, _) = store_with_song().await;

        let err = RatingController::add_rating(
            &store,
            Some(json!({ "song_id": Uuid::new_v4().to_string(), "rating": 3 })),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.to_string(), "Song not found");
        assert_eq!(store.rating_count().await, 0);
    }

    #[tokio::test]
    async fn repeated_ratings_are_all_kept_and_summarised() {
        let (store, id) = store_with_song().await;
        for rating in [5, 2, 4, 1] {
            RatingController::add_rating(
                &store,
                Some(json!({ "song_id": id.to_string(), "rating": rating })),
            )
            .await
            .unwrap();
        }

        let summary = RatingController::get_ratings(&store, &id.to_string())
            .await
            .unwrap();

        assert_eq!(
            summary,
            RatingSummary {
                average: 3.0,
                min: 1,
                max: 5,
            }
        );
    }

    #[tokio::test]
    async fn ratings_of_other_songs_are_ignored() {
        let store = MemoryStore::with_songs(sample_songs(2)).await;
        let ids = store.song_ids().await;
        store.insert_rating(ids[0], 5).await.unwrap();
        store.insert_rating(ids[1], 1).await.unwrap();

        let summary = RatingController::get_ratings(&store, &ids[0].to_string())
            .await
            .unwrap();

        assert_eq!(summary.min, 5);
        assert_eq!(summary.max, 5);
    }

    #[tokio::test]
    async fn song_without_ratings_is_not_found() {
        let (store, id) = store_with_song().await;

        let err = RatingController::get_ratings(&store, &id.to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.to_string(), "No ratings found for this song");
    }

    #[tokio::test]
    async fn malformed_id_in_ratings_lookup_is_rejected() {
        let (store, _) = store_with_song().await;

        let err = RatingController::get_ratings(&store, "nope").await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid song_id format");
    }
}
