use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rating {
    pub id: Uuid,
    pub song_id: Uuid,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RatingSummary {
    pub average: f64,
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl RatingSummary {
    /// `None` when there is nothing to summarise.
    pub fn from_ratings(ratings: &[i32]) -> Option<Self> {
        let min = *ratings.iter().min()?;
        let max = *ratings.iter().max()?;
        let sum: i64 = ratings.iter().map(|r| i64::from(*r)).sum();

        Some(RatingSummary {
            average: sum as f64 / ratings.len() as f64,
            min,
            max,
        })
    }
}
