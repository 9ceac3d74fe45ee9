use crate::{domain::history::entities::RecipeHistoryEntry, entity::recipe_history};

impl From<&recipe_history::Model> for RecipeHistoryEntry {
    fn from(model: &recipe_history::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            ingredients: model.ingredients.clone(),
            recipe: model.recipe.clone(),
            created_at: model.created_at.to_utc(),
        }
    }
}

impl From<recipe_history::Model> for RecipeHistoryEntry {
    fn from(model: recipe_history::Model) -> Self {
        Self::from(&model)
    }
}
