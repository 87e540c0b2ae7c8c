use async_trait::async_trait;
use sqlx::types::chrono::Utc;
use sqlx::types::Json;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::rating::Rating;
use crate::models::song::{NewSong, Song};
use crate::secrets::SECRET_MANAGER;
use crate::store::SongStore;

const SONG_COLUMNS: &str = "id, artist, title, difficulty, level, released";

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new() -> Result<Self, sqlx::Error> {
        let database_url = SECRET_MANAGER.get("DATABASE_URL");
        Self::connect(&database_url).await
    }

    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        debug!("DATABASE_URL={}", database_url);
        let max_connections = SECRET_MANAGER
            .get("DB_MAX_CONNECTIONS")
            .parse()
            .unwrap_or(5);

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

impl From<PgPool> for Database {
    fn from(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escape `LIKE` metacharacters so user input matches literally.
pub(crate) fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `ILIKE` pattern matching `needle` anywhere in a value.
pub(crate) fn contains_pattern(needle: &str) -> String {
    format!("%{}%", escape_like(needle))
}

#[cfg(test)]
enum LikeToken {
    Any,
    One,
    Literal(char),
}

/// Evaluate `text ILIKE pattern ESCAPE '\'` the way Postgres does.
#[cfg(test)]
pub(crate) fn ilike(pattern: &str, text: &str) -> bool {
    let mut tokens = Vec::new();
    let mut chars = pattern.to_lowercase().chars().collect::<Vec<_>>().into_iter();
    while let Some(c) = chars.next() {
        tokens.push(match c {
            '%' => LikeToken::Any,
            '_' => LikeToken::One,
            '\\' => LikeToken::Literal(chars.next().unwrap_or('\\')),
            other => LikeToken::Literal(other),
        });
    }

    let text: Vec<char> = text.to_lowercase().chars().collect();
    // matched[j]: the tokens consumed so far match text[..j]
    let mut matched = vec![false; text.len() + 1];
    matched[0] = true;
    for token in tokens {
        let mut next = vec![false; text.len() + 1];
        match token {
            LikeToken::Any => {
                let mut reachable = false;
                for j in 0..=text.len() {
                    reachable |= matched[j];
                    next[j] = reachable;
                }
            }
            LikeToken::One => {
                for j in 1..=text.len() {
                    next[j] = matched[j - 1];
                }
            }
            LikeToken::Literal(c) => {
                for j in 1..=text.len() {
                    next[j] = matched[j - 1] && text[j - 1] == c;
                }
            }
        }
        matched = next;
    }
    matched[text.len()]
}

#[async_trait]
impl SongStore for Database {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_songs(&self, skip: i64, limit: i64) -> Result<Vec<Song>, sqlx::Error> {
        sqlx::query_as::<_, Song>(&format!(
            "SELECT {SONG_COLUMNS} FROM songs ORDER BY seq LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await
    }

    async fn count_songs(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM songs")
            .fetch_one(&self.pool)
            .await
    }

    async fn average_difficulty(&self, level: Option<i32>) -> Result<Option<f64>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT AVG(difficulty) FROM songs WHERE ($1::INTEGER IS NULL OR level = $1)",
        )
        .bind(level)
        .fetch_one(&self.pool)
        .await
    }

    async fn search_songs(&self, needle: &str) -> Result<Vec<Song>, sqlx::Error> {
        let pattern = contains_pattern(needle);
        sqlx::query_as::<_, Song>(&format!(
            "SELECT {SONG_COLUMNS} FROM songs \
             WHERE title ILIKE $1 ESCAPE '\\' OR artist ILIKE $1 ESCAPE '\\' \
             ORDER BY seq"
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
    }

    async fn find_song(&self, id: Uuid) -> Result<Option<Song>, sqlx::Error> {
        sqlx::query_as::<_, Song>(&format!("SELECT {SONG_COLUMNS} FROM songs WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn insert_rating(&self, song_id: Uuid, rating: i32) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO ratings (id, song_id, rating, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(song_id)
        .bind(rating)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn ratings_for_song(&self, song_id: Uuid) -> Result<Vec<Rating>, sqlx::Error> {
        sqlx::query_as::<_, Rating>(
            "SELECT id, song_id, rating, created_at FROM ratings WHERE song_id = $1 ORDER BY created_at",
        )
        .bind(song_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn insert_songs(&self, songs: Vec<NewSong>) -> Result<u64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for song in songs {
            sqlx::query(
                "INSERT INTO songs (id, artist, title, difficulty, level, released)
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(Uuid::new_v4())
            .bind(song.artist)
            .bind(song.title)
            .bind(song.difficulty)
            .bind(song.level)
            .bind(Json(song.released))
            .execute(&mut *tx)
            .await?;
            inserted += 1;
        }

        tx.commit().await?;
        info!("Inserted {} songs", inserted);
        Ok(inserted)
    }
}
