use std::sync::Arc;

use crate::{
    domain::common::{SnapchefConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::{
        db::postgres::Postgres,
        history::repositories::recipe_history_repository::PostgresRecipeHistoryRepository,
        llm::gemini_client::GeminiLLMClient,
        preferences::repositories::preferences_repository::PostgresPreferencesRepository,
        session::memory::InMemorySessionRepository,
        telegram::client::TelegramClient,
        user::repositories::user_repository::PostgresUserRepository,
    },
};

pub type SnapchefService = Service<
    PostgresUserRepository,
    PostgresPreferencesRepository,
    PostgresRecipeHistoryRepository,
    InMemorySessionRepository,
    GeminiLLMClient,
    TelegramClient,
>;

pub async fn create_service(config: SnapchefConfig) -> Result<SnapchefService, CoreError> {
    let postgres = Postgres::new(&config.database).await.map_err(|e| {
        tracing::error!("Failed to connect to database: {}", e);
        CoreError::InternalServerError
    })?;
    let db = postgres.get_db();

    let llm_client = GeminiLLMClient::new(
        config.llm.gemini_api_key.clone(),
        config.llm.gemini_model.clone(),
        config.llm.timeout,
        config.llm.temperature,
    )?;

    Ok(Service::new(
        PostgresUserRepository::new(Arc::clone(&db)),
        PostgresPreferencesRepository::new(Arc::clone(&db)),
        PostgresRecipeHistoryRepository::new(db),
        InMemorySessionRepository::new(config.session.ttl),
        llm_client,
        TelegramClient::new(&config.telegram),
        config.llm.timeout,
    ))
}
