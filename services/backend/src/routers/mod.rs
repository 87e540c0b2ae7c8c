pub mod rating;
pub mod root;
pub mod song;

use axum::{
    Router,
    routing::{get, post},
};

pub use rating::{add_rating_route, get_ratings_route};
pub use root::{health_check_route, root_route};
pub use song::{average_difficulty_route, list_songs_route, search_songs_route};

use crate::store::SharedStore;

pub fn song_routes() -> Router<SharedStore> {
    Router::new()
        .route("/songs", get(list_songs_route))
        .route("/average_difficulty", get(average_difficulty_route))
        .route("/search", get(search_songs_route))
}

pub fn rating_routes() -> Router<SharedStore> {
    Router::new()
        .route("/rate", post(add_rating_route))
        .route("/ratings/{song_id}", get(get_ratings_route))
}
