use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use serde::Serialize;
use snapchef_core::{
    application::SnapchefService,
    domain::conversation::{ChatEvent, ConversationService},
    infrastructure::telegram::mappers::TelegramUpdate,
};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::application::http::{
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    webhook::validators::verify_secret_token,
};

#[derive(Debug, Serialize, PartialEq)]
pub struct WebhookAck {
    pub ok: bool,
}

/// Each event runs on its own task so the webhook answers before the LLM does.
fn dispatch(service: SnapchefService, event: ChatEvent) -> JoinHandle<()> {
    tokio::spawn(async move {
        match event {
            ChatEvent::Message(message) => {
                service.handle_message(message).await;
            }
            ChatEvent::Callback(query) => service.handle_callback(query).await,
            ChatEvent::UnroutedCallback { callback_id } => {
                service.dismiss_callback(callback_id).await
            }
        }
    })
}

pub async fn receive_update(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<TelegramUpdate>, JsonRejection>,
) -> Result<Response<WebhookAck>, ApiError> {
    verify_secret_token(&headers, state.args.telegram.webhook_secret.as_deref()).map_err(|e| {
        warn!("webhook call rejected: {}", e);
        e
    })?;

    let Json(update) = payload.map_err(|e| {
        warn!("malformed update: {}", e.body_text());
        ApiError::BadRequest(e.body_text())
    })?;

    let update_id = update.update_id;
    match update.into_event() {
        Some(event) => {
            debug!(update_id, chat_id = ?event.chat_id(), "dispatching update");
            dispatch(state.service.clone(), event);
        }
        None => debug!(update_id, "ignoring update"),
    }

    Ok(Response::OK(WebhookAck { ok: true }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::http::{HeaderName, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use clap::Parser;
    use sea_orm::DatabaseConnection;
    use serde_json::json;
    use snapchef_core::{
        domain::common::{TelegramConfig, services::Service},
        infrastructure::{
            history::repositories::recipe_history_repository::PostgresRecipeHistoryRepository,
            llm::gemini_client::GeminiLLMClient,
            preferences::repositories::preferences_repository::PostgresPreferencesRepository,
            session::memory::InMemorySessionRepository,
            telegram::client::TelegramClient,
            user::repositories::user_repository::PostgresUserRepository,
        },
    };

    use crate::application::http::{
        server::http_server::router, webhook::validators::SECRET_TOKEN_HEADER,
    };
    use crate::args::Args;

    use super::*;

    /// State whose collaborators are all unreachable: nothing here talks to the network
    /// successfully, which is all the webhook itself needs.
    fn offline_state(secret: Option<&str>) -> AppState {
        let mut argv = vec![
            "snapchef",
            "--gemini-api-key",
            "key",
            "--telegram-bot-token",
            "123:abc",
        ];
        if let Some(secret) = secret {
            argv.extend(["--telegram-webhook-secret", secret]);
        }
        let args = Arc::new(Args::parse_from(argv));

        let db = Arc::new(DatabaseConnection::Disconnected);
        let service = Service::new(
            PostgresUserRepository::new(Arc::clone(&db)),
            PostgresPreferencesRepository::new(Arc::clone(&db)),
            PostgresRecipeHistoryRepository::new(Arc::clone(&db)),
            InMemorySessionRepository::default(),
            GeminiLLMClient::new(
                "key".to_string(),
                "gemini-2.0-flash".to_string(),
                Duration::from_secs(1),
                None,
            )
            .unwrap(),
            TelegramClient::new(&TelegramConfig {
                bot_token: "123:abc".to_string(),
                api_url: "http://127.0.0.1:9".to_string(),
            }),
            Duration::from_secs(1),
        );

        AppState::new(args, service)
    }

    fn server(state: AppState) -> TestServer {
        TestServer::new(router(state).unwrap()).unwrap()
    }

    fn text_update(text: &str) -> serde_json::Value {
        json!({
            "update_id": 1,
            "message": {
                "message_id": 10,
                "chat": { "id": 42, "type": "private" },
                "from": { "id": 42, "is_bot": false, "first_name": "Ada" },
                "date": 1700000000,
                "text": text
            }
        })
    }

    #[tokio::test]
    async fn test_message_is_acknowledged_and_dispatched() {
        let state = offline_state(None);
        let sessions = state.service.session_repository.clone();
        let server = server(state);

        let response = server.post("/webhook").json(&text_update("hello")).await;

        response.assert_status_ok();
        response.assert_json(&json!({ "ok": true }));

        for _ in 0..100 {
            if !sessions.is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_ignored_update_is_acknowledged() {
        let state = offline_state(None);
        let sessions = state.service.session_repository.clone();
        let server = server(state);

        let response = server
            .post("/webhook")
            .json(&json!({ "update_id": 2, "channel_post": { "message_id": 1 } }))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "ok": true }));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(sessions.is_empty());
    }

    #[tokio::test]
    async fn test_secret_token_is_enforced() {
        let server = server(offline_state(Some("s3cret")));

        let rejected = server.post("/webhook").json(&text_update("hi")).await;
        rejected.assert_status(StatusCode::UNAUTHORIZED);

        let accepted = server
            .post("/webhook")
            .add_header(
                HeaderName::from_static(SECRET_TOKEN_HEADER),
                HeaderValue::from_static("s3cret"),
            )
            .json(&text_update("hi"))
            .await;
        accepted.assert_status_ok();
    }

    #[tokio::test]
    async fn test_malformed_update_is_rejected() {
        let server = server(offline_state(None));

        let response = server
            .post("/webhook")
            .json(&json!({ "message": "not an update" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health() {
        let server = server(offline_state(None));

        let response = server.get("/health").await;

        response.assert_status_ok();
        response.assert_json(&json!({ "status": "ok" }));
    }
}
