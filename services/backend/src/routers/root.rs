use axum::extract::State;
use axum::response::IntoResponse;

use crate::controllers::RootController;
use crate::error::ApiResult;
use crate::store::SharedStore;

pub async fn root_route() -> impl IntoResponse {
    RootController::root().await
}

pub async fn health_check_route(
    State(store): State<SharedStore>,
) -> ApiResult<impl IntoResponse> {
    RootController::health_check(store.as_ref()).await
}
