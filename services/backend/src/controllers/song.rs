use std::collections::HashMap;

use tracing::{debug, info};

use crate::{
    error::{ApiError, ApiResult},
    models::song::{format_song, AverageDifficulty, Song, SongPage, SongResponse},
    store::SongStore,
};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_PER_PAGE: i64 = 10;

pub struct SongController;

impl SongController {
    /// One page of songs in store order, numbered from `skip + 1`.
    pub async fn list_songs(
        store: &dyn SongStore,
        params: &HashMap<String, String>,
    ) -> ApiResult<SongPage> {
        let page = positive_param(params, "page", DEFAULT_PAGE)?;
        let per_page = positive_param(params, "per_page", DEFAULT_PER_PAGE)?;
        let skip = (page - 1)
            .checked_mul(per_page)
            .ok_or_else(|| ApiError::validation("page is out of range"))?;
        let first_seq = skip
            .checked_add(1)
            .ok_or_else(|| ApiError::validation("page is out of range"))?;

        let songs = store.list_songs(skip, per_page).await?;
        let total_count = store.count_songs().await?;
        debug!(
            "page={} per_page={} returned={} total={}",
            page,
            per_page,
            songs.len(),
            total_count
        );

        Ok(SongPage {
            songs: number_from(&songs, first_seq),
            total_count,
            total_pages: total_pages(total_count, per_page),
            current_page: page,
            per_page,
        })
    }

    pub async fn average_difficulty(
        store: &dyn SongStore,
        params: &HashMap<String, String>,
    ) -> ApiResult<AverageDifficulty> {
        let level = match params.get("level").map(String::as_str) {
            None | Some("") => None,
            Some(raw) => Some(
                raw.trim()
                    .parse::<i32>()
                    .map_err(|_| ApiError::validation("level must be an integer"))?,
            ),
        };

        let average = store.average_difficulty(level).await?;
        Ok(AverageDifficulty {
            average_difficulty: average.unwrap_or(0.0),
        })
    }

    /// All songs whose title or artist contains `message`, numbered from 1.
    pub async fn search_songs(
        store: &dyn SongStore,
        params: &HashMap<String, String>,
    ) -> ApiResult<Vec<SongResponse>> {
        let message = match params.get("message") {
            Some(m) if !m.is_empty() => m,
            _ => return Err(ApiError::validation("Search string is required")),
        };

        let songs = store.search_songs(message).await?;
        info!("Search {:?} matched {} songs", message, songs.len());
        Ok(number_from(&songs, 1))
    }
}

fn positive_param(params: &HashMap<String, String>, name: &str, default: i64) -> ApiResult<i64> {
    let Some(raw) = params.get(name) else {
        return Ok(default);
    };
    match raw.trim().parse::<i64>() {
        Ok(value) if value >= 1 => Ok(value),
        _ => Err(ApiError::validation(format!(
            "{name} must be a positive integer"
        ))),
    }
}

fn number_from(songs: &[Song], first: i64) -> Vec<SongResponse> {
    songs
        .iter()
        .enumerate()
        .map(|(i, song)| format_song(song, first + i as i64))
        .collect()
}

pub fn total_pages(total_count: i64, per_page: i64) -> i64 {
    total_count / per_page + i64::from(total_count % per_page > 0)
}
