use crate::domain::{
    preferences::value_objects::{Cuisine, Difficulty},
    recipe::value_objects::RecipeRequest,
};

const RECIPE_PROMPT: &str = "You are SnapChef, a professional cooking assistant. Write recipes in a modern, structured, clear and minimal style.\n\n\
Lay out every recipe strictly in this order:\n\n\
1. Dish title on the first line, capitalised.\n\
2. Difficulty: rate the recipe as Easy, Medium or Hard.\n\
3. Ingredients: one per line, each starting with a dash.\n\
4. Preparation: what to do before cooking (wash, peel, chop). Include this section only when such steps exist.\n\
5. Steps: numbered cooking steps, one per line.\n\
6. Tips: 1 to 3 tips about taste, substitutions or serving.\n\
7. Nutrition: approximate calories, protein, fat and carbs, both per 100g and per serving. This section is mandatory; give a rough estimate if unsure.\n\n\
Tone: friendly, warm and confident, like an experienced chef. Do not use Markdown (*, **, __, #). \
Do not write an introduction and do not ask questions. Start with the recipe right away.\n\
Use exactly the ingredients listed below and every one of them. Add nothing else except basic seasonings (salt, pepper, oil, water).";

const HEALTHY_INSTRUCTION: &str = "Healthy mode: prefer healthy cooking methods (steaming, baking, grilling), minimal oil, less salt and sugar, more vegetables. \
Add one sentence explaining the health benefit of the dish.";

const SIMPLE_INSTRUCTION: &str = "Make it simpler: few easy steps, minimal technique, no long braising or baking.";
const MEDIUM_INSTRUCTION: &str = "Medium level: moderate techniques such as baking or stewing, about 40 to 60 minutes in total.";
const HARD_INSTRUCTION: &str = "Make it more elaborate: combined techniques (marinating, grilling, staged preparation), more than 60 minutes in total.";

/// Maps a difficulty label onto its instruction by case-insensitive prefix.
pub fn difficulty_instruction(label: &str) -> Option<&'static str> {
    let label = label.trim().to_lowercase();
    if label.starts_with("simp") || label.starts_with("eas") {
        Some(SIMPLE_INSTRUCTION)
    } else if label.starts_with("hard") || label.starts_with("comp") {
        Some(HARD_INSTRUCTION)
    } else if label.starts_with("med") {
        Some(MEDIUM_INSTRUCTION)
    } else {
        None
    }
}

fn cuisine_instruction(cuisine: Cuisine) -> Option<String> {
    match cuisine {
        Cuisine::Any => None,
        other => Some(format!(
            "Style the dish as {} cuisine while keeping to the listed ingredients.",
            other.label()
        )),
    }
}

/// Assembles the generation prompt: user settings first, then the fixed structure, then
/// the ingredient list.
pub fn build_recipe_prompt(request: &RecipeRequest) -> String {
    let mut settings: Vec<String> = Vec::new();

    if let Some(preferences) = &request.preferences {
        if preferences.healthy_profile {
            settings.push(HEALTHY_INSTRUCTION.to_string());
        }
        if let Some(instruction) = cuisine_instruction(preferences.preferred_cuisine) {
            settings.push(instruction);
        }
    }

    let difficulty = request.difficulty_override.or_else(|| {
        request
            .preferences
            .as_ref()
            .map(|p| p.difficulty)
            .filter(|d| *d != Difficulty::Any)
    });
    if let Some(instruction) = difficulty.and_then(|d| difficulty_instruction(d.label())) {
        settings.push(instruction.to_string());
    }

    let mut prompt = String::new();
    if !settings.is_empty() {
        prompt.push_str("User settings:\n");
        for line in &settings {
            prompt.push_str("- ");
            prompt.push_str(line);
            prompt.push('\n');
        }
        prompt.push('\n');
    }

    prompt.push_str(RECIPE_PROMPT);
    prompt.push_str("\n\nIngredients:\n");
    let listed: Vec<String> = request
        .ingredients
        .iter()
        .map(|name| format!("– {}", name))
        .collect();
    prompt.push_str(&listed.join("\n"));
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::preferences::entities::UserPreferences;

    fn request(preferences: UserPreferences, difficulty: Option<Difficulty>) -> RecipeRequest {
        RecipeRequest::new(vec!["apple".to_string(), "oats".to_string()])
            .with_preferences(preferences)
            .with_difficulty(difficulty)
    }

    #[test]
    fn test_plain_prompt_lists_ingredients_and_structure() {
        let prompt = build_recipe_prompt(&RecipeRequest::new(vec!["apple".to_string()]));

        assert!(prompt.starts_with("You are SnapChef"));
        assert!(prompt.contains("Nutrition"));
        assert!(prompt.contains("per 100g and per serving"));
        assert!(prompt.ends_with("Ingredients:\n– apple"));
        assert!(!prompt.contains("User settings"));
    }

    #[test]
    fn test_healthy_and_cuisine_settings_are_injected() {
        let mut preferences = UserPreferences::defaults_for(1);
        preferences.healthy_profile = true;
        preferences.preferred_cuisine = Cuisine::MiddleEastern;

        let prompt = build_recipe_prompt(&request(preferences, None));

        assert!(prompt.contains(HEALTHY_INSTRUCTION));
        assert!(prompt.contains("Style the dish as Middle Eastern cuisine"));
    }

    #[test]
    fn test_override_wins_over_stored_difficulty() {
        let mut preferences = UserPreferences::defaults_for(1);
        preferences.difficulty = Difficulty::Hard;

        let prompt = build_recipe_prompt(&request(preferences.clone(), Some(Difficulty::Simple)));
        assert!(prompt.contains(SIMPLE_INSTRUCTION));
        assert!(!prompt.contains(HARD_INSTRUCTION));

        let prompt = build_recipe_prompt(&request(preferences, None));
        assert!(prompt.contains(HARD_INSTRUCTION));
    }

    #[test]
    fn test_any_difficulty_adds_nothing() {
        let prompt = build_recipe_prompt(&request(UserPreferences::defaults_for(1), None));
        assert!(!prompt.contains("User settings"));
    }

    #[test]
    fn test_difficulty_labels_match_by_prefix() {
        assert_eq!(difficulty_instruction("Easier"), Some(SIMPLE_INSTRUCTION));
        assert_eq!(difficulty_instruction("SIMPLE"), Some(SIMPLE_INSTRUCTION));
        assert_eq!(difficulty_instruction("complex"), Some(HARD_INSTRUCTION));
        assert_eq!(difficulty_instruction("medium"), Some(MEDIUM_INSTRUCTION));
        assert_eq!(difficulty_instruction("Any"), None);
    }
}
