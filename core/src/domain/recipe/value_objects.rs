use crate::domain::preferences::{entities::UserPreferences, value_objects::Difficulty};

/// Text shown to the user whenever a recipe could not be produced.
pub const FALLBACK_RECIPE: &str = "could not generate a recipe, please try again later";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeRequest {
    pub ingredients: Vec<String>,
    pub user_id: Option<i64>,
    pub preferences: Option<UserPreferences>,
    /// Transient override coming from the "easier"/"harder" actions.
    pub difficulty_override: Option<Difficulty>,
}

impl RecipeRequest {
    pub fn new(ingredients: Vec<String>) -> Self {
        Self {
            ingredients,
            user_id: None,
            preferences: None,
            difficulty_override: None,
        }
    }

    pub fn with_preferences(mut self, preferences: UserPreferences) -> Self {
        self.user_id = Some(preferences.user_id);
        self.preferences = Some(preferences);
        self
    }

    pub fn with_difficulty(mut self, difficulty: Option<Difficulty>) -> Self {
        self.difficulty_override = difficulty;
        self
    }
}

/// Result of a composition. Never an error: a failure still carries the text to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeOutcome {
    Composed(String),
    Failed { reason: String },
}

impl RecipeOutcome {
    pub fn is_composed(&self) -> bool {
        matches!(self, RecipeOutcome::Composed(_))
    }

    pub fn text(&self) -> &str {
        match self {
            RecipeOutcome::Composed(recipe) => recipe,
            RecipeOutcome::Failed { .. } => FALLBACK_RECIPE,
        }
    }
}
