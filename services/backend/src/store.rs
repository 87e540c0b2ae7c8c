use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::rating::Rating;
use crate::models::song::{NewSong, Song};

pub type SharedStore = Arc<dyn SongStore>;

/// Everything the routes need from the songs and ratings collections.
///
/// Songs come back in the store's natural order, which for both
/// implementations is insertion order.
#[async_trait]
pub trait SongStore: Send + Sync {
    async fn ping(&self) -> Result<(), sqlx::Error>;

    async fn list_songs(&self, skip: i64, limit: i64) -> Result<Vec<Song>, sqlx::Error>;

    async fn count_songs(&self) -> Result<i64, sqlx::Error>;

    /// Mean difficulty over songs at `level` (or all songs). `None` if nothing matched.
    async fn average_difficulty(&self, level: Option<i32>) -> Result<Option<f64>, sqlx::Error>;

    /// Case-insensitive literal substring match on title or artist.
    async fn search_songs(&self, needle: &str) -> Result<Vec<Song>, sqlx::Error>;

    async fn find_song(&self, id: Uuid) -> Result<Option<Song>, sqlx::Error>;

    async fn insert_rating(&self, song_id: Uuid, rating: i32) -> Result<(), sqlx::Error>;

    async fn ratings_for_song(&self, song_id: Uuid) -> Result<Vec<Rating>, sqlx::Error>;

    async fn insert_songs(&self, songs: Vec<NewSong>) -> Result<u64, sqlx::Error>;
}
