use crate::domain::{
    conversation::{
        entities::{InlineButton, Keyboard},
        texts::*,
    },
    preferences::{
        entities::UserPreferences,
        value_objects::{Cuisine, Difficulty},
    },
    session::entities::ConversationState,
};

/// A reserved menu label or slash command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    StartCooking,
    Settings,
    SavedRecipes,
    Back,
    BackToList,
    Confirm,
    Add,
    Remove,
    Cancel,
    SaveRecipe,
    AnotherRecipe,
    Easier,
    Harder,
    Finish,
    Difficulty,
}

const LABELS: [(&str, Command); 18] = [
    ("/start", Command::Start),
    ("/help", Command::Help),
    (BTN_HELP, Command::Help),
    (BTN_START_COOKING, Command::StartCooking),
    (BTN_SETTINGS, Command::Settings),
    (BTN_SAVED_RECIPES, Command::SavedRecipes),
    (BTN_BACK, Command::Back),
    (BTN_BACK_TO_LIST, Command::BackToList),
    (BTN_CONFIRM, Command::Confirm),
    (BTN_ADD, Command::Add),
    (BTN_REMOVE, Command::Remove),
    (BTN_CANCEL, Command::Cancel),
    (BTN_SAVE_RECIPE, Command::SaveRecipe),
    (BTN_ANOTHER_RECIPE, Command::AnotherRecipe),
    (BTN_EASIER, Command::Easier),
    (BTN_HARDER, Command::Harder),
    (BTN_FINISH, Command::Finish),
    (BTN_DIFFICULTY, Command::Difficulty),
];

/// Lower-cased label without its leading emoji.
fn normalize(label: &str) -> String {
    label
        .trim()
        .trim_start_matches(|c: char| !c.is_alphanumeric() && c != '/')
        .trim()
        .to_lowercase()
}

impl Command {
    pub fn parse(text: &str) -> Option<Command> {
        let text = text.trim();
        let normalized = normalize(text);
        if normalized.is_empty() {
            return None;
        }

        LABELS
            .iter()
            .find(|(label, _)| *label == text || normalize(label) == normalized)
            .map(|(_, command)| *command)
    }
}

/// Reply keyboard shown in each state.
pub fn menu(state: ConversationState) -> Keyboard {
    match state {
        ConversationState::Main | ConversationState::Unknown => Keyboard::reply(&[
            &[BTN_START_COOKING],
            &[BTN_SETTINGS, BTN_SAVED_RECIPES],
            &[BTN_HELP],
        ]),
        ConversationState::WaitIngredients => Keyboard::reply(&[&[BTN_BACK]]),
        ConversationState::Confirming => Keyboard::reply(&[
            &[BTN_CONFIRM],
            &[BTN_ADD, BTN_REMOVE],
            &[BTN_CANCEL],
        ]),
        ConversationState::Adding | ConversationState::Removing => {
            Keyboard::reply(&[&[BTN_BACK_TO_LIST]])
        }
        ConversationState::Settings => Keyboard::reply(&[&[BTN_DIFFICULTY], &[BTN_BACK]]),
        ConversationState::AfterRecipe => Keyboard::reply(&[
            &[BTN_SAVE_RECIPE],
            &[BTN_ANOTHER_RECIPE],
            &[BTN_EASIER, BTN_HARDER],
            &[BTN_FINISH],
        ]),
    }
}

/// Reply keyboard listing every difficulty option plus the way back.
pub fn difficulty_menu() -> Keyboard {
    let mut rows: Vec<Vec<String>> = Difficulty::OPTIONS
        .iter()
        .map(|d| vec![d.label().to_string()])
        .collect();
    rows.push(vec![BTN_BACK.to_string()]);
    Keyboard::Reply(rows)
}

/// Action carried by an inline button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    ShowRecipe(i64),
    ToggleHealthyProfile,
    ChooseCuisine,
    SetCuisine(Cuisine),
    ChooseDifficulty,
    SetDifficulty(Difficulty),
}

const SHOW_RECIPE_PREFIX: &str = "show_recipe_";
const SET_CUISINE_PREFIX: &str = "set_cuisine_";
const SET_DIFFICULTY_PREFIX: &str = "set_difficulty_";
const TOGGLE_HEALTHY_PROFILE: &str = "toggle_healthy_profile";
const CHOOSE_CUISINE: &str = "choose_cuisine";
const CHOOSE_DIFFICULTY: &str = "choose_difficulty";

impl CallbackAction {
    /// Unknown cuisine or difficulty labels fall back to `Any`.
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            TOGGLE_HEALTHY_PROFILE => Some(CallbackAction::ToggleHealthyProfile),
            CHOOSE_CUISINE => Some(CallbackAction::ChooseCuisine),
            CHOOSE_DIFFICULTY => Some(CallbackAction::ChooseDifficulty),
            _ => {
                if let Some(id) = data.strip_prefix(SHOW_RECIPE_PREFIX) {
                    id.parse().ok().map(CallbackAction::ShowRecipe)
                } else if let Some(label) = data.strip_prefix(SET_CUISINE_PREFIX) {
                    Some(CallbackAction::SetCuisine(
                        Cuisine::from_label(label).unwrap_or_default(),
                    ))
                } else if let Some(label) = data.strip_prefix(SET_DIFFICULTY_PREFIX) {
                    Some(CallbackAction::SetDifficulty(
                        Difficulty::from_label(label).unwrap_or_default(),
                    ))
                } else {
                    None
                }
            }
        }
    }

    pub fn data(&self) -> String {
        match self {
            CallbackAction::ShowRecipe(id) => format!("{}{}", SHOW_RECIPE_PREFIX, id),
            CallbackAction::ToggleHealthyProfile => TOGGLE_HEALTHY_PROFILE.to_string(),
            CallbackAction::ChooseCuisine => CHOOSE_CUISINE.to_string(),
            CallbackAction::SetCuisine(cuisine) => {
                format!("{}{}", SET_CUISINE_PREFIX, cuisine.label())
            }
            CallbackAction::ChooseDifficulty => CHOOSE_DIFFICULTY.to_string(),
            CallbackAction::SetDifficulty(difficulty) => {
                format!("{}{}", SET_DIFFICULTY_PREFIX, difficulty.label())
            }
        }
    }
}

/// Text of the settings panel.
pub fn settings_text(preferences: &UserPreferences) -> String {
    format!(
        "🥗 Healthy eating: {}\n🍱 Cuisine: {}\n🎚️ Difficulty: {}",
        if preferences.healthy_profile { "On" } else { "Off" },
        preferences.preferred_cuisine.label(),
        preferences.difficulty.label()
    )
}

pub fn settings_keyboard(preferences: &UserPreferences) -> Keyboard {
    let healthy_mark = if preferences.healthy_profile { "✅" } else { "❌" };
    Keyboard::Inline(vec![
        vec![InlineButton::new(
            format!("🥗 Healthy eating: {}", healthy_mark),
            CallbackAction::ToggleHealthyProfile.data(),
        )],
        vec![InlineButton::new(
            format!("🍱 Cuisine: {}", preferences.preferred_cuisine.label()),
            CallbackAction::ChooseCuisine.data(),
        )],
        vec![InlineButton::new(
            format!("🎚️ Difficulty: {}", preferences.difficulty.label()),
            CallbackAction::ChooseDifficulty.data(),
        )],
    ])
}

pub fn cuisine_options_keyboard() -> Keyboard {
    Keyboard::Inline(
        Cuisine::OPTIONS
            .chunks(2)
            .map(|row| {
                row.iter()
                    .map(|c| InlineButton::new(c.label(), CallbackAction::SetCuisine(*c).data()))
                    .collect()
            })
            .collect(),
    )
}

pub fn difficulty_options_keyboard() -> Keyboard {
    Keyboard::Inline(vec![
        Difficulty::OPTIONS
            .iter()
            .map(|d| InlineButton::new(d.label(), CallbackAction::SetDifficulty(*d).data()))
            .collect(),
    ])
}
