use tokio::time::timeout;
use tracing::{error, info, instrument, warn};

use crate::domain::{
    common::services::Service,
    conversation::ports::ChatTransport,
    history::ports::RecipeHistoryRepository,
    ingredients::{
        parser::{is_empty_response, parse_ingredients},
        ports::IngredientService,
        prompt::VISION_PROMPT,
    },
    llm::ports::LLMClient,
    preferences::ports::PreferencesRepository,
    session::ports::SessionRepository,
    user::ports::UserRepository,
};

impl<U, P, H, S, LLM, T> IngredientService for Service<U, P, H, S, LLM, T>
where
    U: UserRepository,
    P: PreferencesRepository,
    H: RecipeHistoryRepository,
    S: SessionRepository,
    LLM: LLMClient,
    T: ChatTransport,
{
    fn extract_from_text(&self, text: &str) -> Vec<String> {
        parse_ingredients(text)
    }

    #[instrument(skip(self, image_data), fields(image_bytes = image_data.len()))]
    async fn extract_from_image(&self, image_data: Vec<u8>) -> Vec<String> {
        if image_data.is_empty() {
            warn!("empty image payload, skipping vision call");
            return Vec::new();
        }

        let call = self
            .llm_client
            .generate_with_image(VISION_PROMPT.to_string(), image_data);

        let response = match timeout(self.llm_timeout, call).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                error!("Vision call failed: {}", e);
                return Vec::new();
            }
            Err(_) => {
                error!("Vision call timed out after {:?}", self.llm_timeout);
                return Vec::new();
            }
        };

        info!(response = %response, "vision response received");

        if is_empty_response(&response) {
            return Vec::new();
        }

        parse_ingredients(&response)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::{
        common::entities::app_errors::CoreError, llm::ports::MockLLMClient,
    };
    use crate::test_utils::{service_with_llm, RecordingTransport};

    #[tokio::test]
    async fn test_photo_answer_is_parsed() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_image()
            .times(1)
            .returning(|_, _| Box::pin(async { Ok("Eggs, milk, eggs, flour.".to_string()) }));

        let service = service_with_llm(llm, RecordingTransport::default());
        let found = service.extract_from_image(vec![1, 2, 3]).await;

        assert_eq!(
            found,
            vec!["Eggs".to_string(), "milk".to_string(), "flour".to_string()]
        );
    }

    #[tokio::test]
    async fn test_sentinel_answer_yields_nothing() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_image()
            .returning(|_, _| Box::pin(async { Ok("No ingredients".to_string()) }));

        let service = service_with_llm(llm, RecordingTransport::default());
        assert!(service.extract_from_image(vec![1]).await.is_empty());
    }

    #[tokio::test]
    async fn test_vision_failure_yields_nothing() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_image().returning(|_, _| {
            Box::pin(async { Err(CoreError::ExternalServiceError("boom".to_string())) })
        });

        let service = service_with_llm(llm, RecordingTransport::default());
        assert!(service.extract_from_image(vec![1]).await.is_empty());
    }

    #[tokio::test]
    async fn test_vision_timeout_yields_nothing() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_image().returning(|_, _| {
            Box::pin(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok("apple".to_string())
            })
        });

        let mut service = service_with_llm(llm, RecordingTransport::default());
        service.llm_timeout = Duration::from_millis(20);
        assert!(service.extract_from_image(vec![1]).await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_image_skips_the_call() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_image().never();

        let service = service_with_llm(llm, RecordingTransport::default());
        assert!(service.extract_from_image(Vec::new()).await.is_empty());
    }
}
