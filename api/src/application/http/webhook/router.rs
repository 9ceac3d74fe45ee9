use axum::{Router, routing::post};

use super::handlers::receive_update::receive_update;
use crate::application::http::server::app_state::AppState;

pub fn webhook_routes(root_path: &str) -> Router<AppState> {
    Router::new().route(&format!("{}/webhook", root_path), post(receive_update))
}
