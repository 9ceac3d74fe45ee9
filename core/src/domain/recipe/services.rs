use tokio::time::timeout;
use tracing::{debug, error, info, instrument};

use crate::domain::{
    common::services::Service,
    conversation::ports::ChatTransport,
    history::ports::RecipeHistoryRepository,
    llm::ports::LLMClient,
    preferences::ports::PreferencesRepository,
    recipe::{
        formatter::format_recipe,
        ports::RecipeService,
        prompt::build_recipe_prompt,
        value_objects::{RecipeOutcome, RecipeRequest},
    },
    session::ports::SessionRepository,
    user::ports::UserRepository,
};

impl<U, P, H, S, LLM, T> RecipeService for Service<U, P, H, S, LLM, T>
where
    U: UserRepository,
    P: PreferencesRepository,
    H: RecipeHistoryRepository,
    S: SessionRepository,
    LLM: LLMClient,
    T: ChatTransport,
{
    #[instrument(
        skip(self, request),
        fields(
            user_id = ?request.user_id,
            ingredients = request.ingredients.len(),
            difficulty = ?request.difficulty_override
        )
    )]
    async fn compose_recipe(&self, request: RecipeRequest) -> RecipeOutcome {
        if request.ingredients.is_empty() {
            error!("Recipe requested without ingredients");
            return RecipeOutcome::Failed {
                reason: "no ingredients".to_string(),
            };
        }

        let prompt = build_recipe_prompt(&request);
        debug!(prompt = %prompt, "recipe prompt assembled");

        let call = self.llm_client.generate_with_text(prompt);
        let answer = match timeout(self.llm_timeout, call).await {
            Ok(Ok(answer)) => answer,
            Ok(Err(e)) => {
                error!("Recipe generation failed: {}", e);
                return RecipeOutcome::Failed {
                    reason: e.to_string(),
                };
            }
            Err(_) => {
                error!("Recipe generation timed out after {:?}", self.llm_timeout);
                return RecipeOutcome::Failed {
                    reason: "timeout".to_string(),
                };
            }
        };

        if answer.trim().is_empty() {
            error!("Recipe generation returned an empty answer");
            return RecipeOutcome::Failed {
                reason: "empty answer".to_string(),
            };
        }

        info!("recipe generated");
        RecipeOutcome::Composed(format_recipe(&answer))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::{
        common::entities::app_errors::CoreError,
        llm::ports::MockLLMClient,
        preferences::{entities::UserPreferences, value_objects::Difficulty},
        recipe::value_objects::FALLBACK_RECIPE,
    };
    use crate::test_utils::{RecordingTransport, service_with_llm};

    fn request() -> RecipeRequest {
        RecipeRequest::new(vec!["apple".to_string(), "oats".to_string()])
    }

    #[tokio::test]
    async fn test_answer_is_formatted() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_text()
            .times(1)
            .returning(|_| Box::pin(async { Ok("Crumble\nSteps:\n1. Bake.".to_string()) }));

        let service = service_with_llm(llm, RecordingTransport::default());
        let outcome = service.compose_recipe(request()).await;

        assert!(outcome.is_composed());
        assert!(outcome.text().starts_with("Crumble\n\nSteps:\n1. Bake."));
        assert!(outcome.text().ends_with("Enjoy your meal!"));
    }

    #[tokio::test]
    async fn test_override_reaches_the_prompt() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_text()
            .withf(|prompt: &String| prompt.contains("Make it simpler"))
            .times(1)
            .returning(|_| Box::pin(async { Ok("Porridge".to_string()) }));

        let mut preferences = UserPreferences::defaults_for(3);
        preferences.difficulty = Difficulty::Hard;
        let service = service_with_llm(llm, RecordingTransport::default());

        let outcome = service
            .compose_recipe(
                request()
                    .with_preferences(preferences)
                    .with_difficulty(Some(Difficulty::Simple)),
            )
            .await;
        assert!(outcome.is_composed());
    }

    #[tokio::test]
    async fn test_provider_error_yields_fallback() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_text().returning(|_| {
            Box::pin(async { Err(CoreError::ExternalServiceError("quota".to_string())) })
        });

        let service = service_with_llm(llm, RecordingTransport::default());
        let outcome = service.compose_recipe(request()).await;

        assert!(!outcome.is_composed());
        assert_eq!(outcome.text(), FALLBACK_RECIPE);
    }

    #[tokio::test]
    async fn test_timeout_yields_fallback() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_text().returning(|_| {
            Box::pin(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok("late".to_string())
            })
        });

        let mut service = service_with_llm(llm, RecordingTransport::default());
        service.llm_timeout = Duration::from_millis(20);

        let outcome = service.compose_recipe(request()).await;
        assert_eq!(outcome.text(), FALLBACK_RECIPE);
    }

    #[tokio::test]
    async fn test_blank_answer_yields_fallback() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_text()
            .returning(|_| Box::pin(async { Ok("  \n".to_string()) }));

        let service = service_with_llm(llm, RecordingTransport::default());
        assert!(!service.compose_recipe(request()).await.is_composed());
    }
}
