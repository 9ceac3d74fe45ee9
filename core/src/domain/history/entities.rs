use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Separator used when an ingredient list is stored as a single column.
pub const INGREDIENT_SEPARATOR: &str = ", ";

const TITLE_MAX_CHARS: usize = 40;

/// A saved recipe. Entries are never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeHistoryEntry {
    pub id: i64,
    pub user_id: i64,
    pub ingredients: String,
    pub recipe: String,
    pub created_at: DateTime<Utc>,
}

impl RecipeHistoryEntry {
    pub fn join_ingredients(ingredients: &[String]) -> String {
        ingredients.join(INGREDIENT_SEPARATOR)
    }

    /// Short label used in the saved-recipes list: first line of the recipe plus the
    /// creation date.
    pub fn list_label(&self) -> String {
        let title: String = self
            .recipe
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or_default()
            .chars()
            .take(TITLE_MAX_CHARS)
            .collect();

        format!("{} ({})", title, self.created_at.format("%d.%m.%Y"))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_list_label_truncates_title_and_appends_date() {
        let entry = RecipeHistoryEntry {
            id: 1,
            user_id: 7,
            ingredients: "apple, banana".to_string(),
            recipe: "\nCaramelised apple and banana pancakes with a honey drizzle\nSteps..."
                .to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap(),
        };

        assert_eq!(
            entry.list_label(),
            "Caramelised apple and banana pancakes wi (09.03.2024)"
        );
    }

    #[test]
    fn test_join_ingredients() {
        let joined =
            RecipeHistoryEntry::join_ingredients(&["egg".to_string(), "milk".to_string()]);
        assert_eq!(joined, "egg, milk");
    }
}
