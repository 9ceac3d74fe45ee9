use crate::{
    domain::preferences::{
        entities::UserPreferences,
        value_objects::{Cuisine, Difficulty},
    },
    entity::user_preferences,
};

/// Unknown labels read as `Any`.
impl From<&user_preferences::Model> for UserPreferences {
    fn from(model: &user_preferences::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            healthy_profile: model.healthy_profile,
            preferred_cuisine: Cuisine::from_label(&model.preferred_cuisine).unwrap_or_default(),
            difficulty: Difficulty::from_label(&model.difficulty).unwrap_or_default(),
        }
    }
}

impl From<user_preferences::Model> for UserPreferences {
    fn from(model: user_preferences::Model) -> Self {
        Self::from(&model)
    }
}
