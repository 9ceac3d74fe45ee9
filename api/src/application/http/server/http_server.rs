use std::sync::Arc;

use axum::Router;
use snapchef_core::{application::create_service, domain::common::SnapchefConfig};
use tracing::info_span;

use crate::application::http::{
    health::health_routes, server::app_state::AppState, webhook::router::webhook_routes,
};
use crate::args::Args;

pub async fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let config = SnapchefConfig::from(args.as_ref().clone());
    let service = create_service(config).await?;

    Ok(AppState::new(args, service))
}

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().path().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let root_path = state.args.server.root_path.clone();

    let router = axum::Router::new()
        .merge(webhook_routes(&root_path))
        .merge(health_routes(&root_path))
        .layer(trace_layer)
        .with_state(state);
    Ok(router)
}
