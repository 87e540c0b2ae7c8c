use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Release value as it appears in the source data: a bare year or a string
/// (usually a date), stored and returned exactly as given.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum Released {
    Year(i32),
    Text(String),
}

#[derive(Deserialize, Serialize, Clone, Debug, FromRow)]
pub struct Song {
    pub id: Uuid,
    pub artist: String,
    pub title: String,
    pub difficulty: f64,
    pub level: i32,
    #[sqlx(json)]
    pub released: Released,
}

/// A song as read from the loader's input file, before the store assigns an id.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct NewSong {
    pub artist: String,
    pub title: String,
    pub difficulty: f64,
    pub level: i32,
    pub released: Released,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct SongResponse {
    pub id: i64,
    pub artist: String,
    pub title: String,
    pub difficulty: f64,
    pub level: i32,
    pub released: Released,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct SongPage {
    pub songs: Vec<SongResponse>,
    pub total_count: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub per_page: i64,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct AverageDifficulty {
    pub average_difficulty: f64,
}

/// Shape a stored song for a response. `seq` is the per-response display id;
/// the stored id never leaves the service.
pub fn format_song(song: &Song, seq: i64) -> SongResponse {
    SongResponse {
        id: seq,
        artist: song.artist.clone(),
        title: song.title.clone(),
        difficulty: song.difficulty,
        level: song.level,
        released: song.released.clone(),
    }
}
