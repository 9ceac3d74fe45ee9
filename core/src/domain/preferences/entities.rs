use serde::{Deserialize, Serialize};

use crate::domain::preferences::value_objects::{Cuisine, Difficulty};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub id: i64,
    pub user_id: i64,
    pub healthy_profile: bool,
    pub preferred_cuisine: Cuisine,
    pub difficulty: Difficulty,
}

impl UserPreferences {
    /// Defaults for a user who never opened the settings.
    pub fn defaults_for(user_id: i64) -> Self {
        Self {
            id: 0,
            user_id,
            healthy_profile: false,
            preferred_cuisine: Cuisine::Any,
            difficulty: Difficulty::Any,
        }
    }
}
