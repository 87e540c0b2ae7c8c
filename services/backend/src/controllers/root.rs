use axum::Json;
use serde_json::{json, Value};
use tracing::debug;

use crate::{error::ApiResult, store::SongStore};

pub struct RootController;

impl RootController {
    pub async fn root() -> Json<Value> {
        Json(json!({ "message": "Songs API" }))
    }

    /// Healthy only if the store answers.
    pub async fn health_check(store: &dyn SongStore) -> ApiResult<Json<Value>> {
        store.ping().await?;
        debug!("Health check passed");
        Ok(Json(json!({ "status": "ok" })))
    }
}
