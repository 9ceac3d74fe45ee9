use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::preferences::value_objects::Difficulty;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConversationState {
    #[default]
    Main,
    WaitIngredients,
    Confirming,
    Adding,
    Removing,
    Settings,
    AfterRecipe,
    /// Tag read from storage that matches no known state.
    Unknown,
}

impl ConversationState {
    /// Decodes a stored tag in any letter case, mapping legacy names onto the current
    /// states.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_uppercase().as_str() {
            "MAIN" | "IDLE" => ConversationState::Main,
            "WAIT_INGREDIENTS" => ConversationState::WaitIngredients,
            "CONFIRMING" => ConversationState::Confirming,
            "ADDING" | "ADD" => ConversationState::Adding,
            "REMOVING" | "REMOVE" => ConversationState::Removing,
            "SETTINGS" => ConversationState::Settings,
            "AFTER_RECIPE" => ConversationState::AfterRecipe,
            _ => ConversationState::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for ConversationState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

/// Per-chat conversation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Session {
    #[serde(default)]
    pub state: ConversationState,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_recipe: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_difficulty: Option<Difficulty>,
}

fn same_ingredient(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

impl Session {
    pub fn in_state(state: ConversationState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    /// Appends names not already present (case-insensitive), keeping insertion order and
    /// the first spelling seen. Returns how many were added.
    pub fn add_ingredients<I>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let mut added = 0;
        for name in names {
            let name = name.trim();
            if name.is_empty() || self.find_ingredient(name).is_some() {
                continue;
            }
            self.ingredients.push(name.to_string());
            added += 1;
        }
        added
    }

    /// Drops every ingredient matching one of `names` (case-insensitive). Returns how many
    /// were removed.
    pub fn remove_ingredients(&mut self, names: &[String]) -> usize {
        let before = self.ingredients.len();
        self.ingredients
            .retain(|existing| !names.iter().any(|name| same_ingredient(existing, name)));
        before - self.ingredients.len()
    }

    pub fn find_ingredient(&self, name: &str) -> Option<&String> {
        self.ingredients
            .iter()
            .find(|existing| same_ingredient(existing, name))
    }

    /// One dash-prefixed line per ingredient.
    pub fn ingredient_list(&self) -> String {
        self.ingredients
            .iter()
            .map(|name| format!("– {}", name))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
