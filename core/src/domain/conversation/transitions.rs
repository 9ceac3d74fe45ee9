use crate::domain::{
    conversation::{commands::Command, entities::MessageContent, texts},
    preferences::value_objects::{Difficulty, DifficultyShift},
    session::entities::ConversationState,
};

/// Where newly submitted ingredients come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngredientSource {
    Text(String),
    Photo { file_id: String },
}

/// What the engine does with one inbound message. Decided from the current state and the
/// message alone; the executor performs the side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Register the sender and greet them. Stays in MAIN.
    Welcome,
    ShowHelp,
    /// Plain move to `state` with a notice and that state's menu.
    MoveTo {
        state: ConversationState,
        notice: &'static str,
    },
    OpenSettings,
    ListSavedRecipes,
    Extract(IngredientSource),
    AddIngredient(String),
    RemoveIngredient(String),
    /// Back to CONFIRMING with the list unchanged.
    ShowList,
    Compose,
    /// Clears the session and returns to MAIN.
    Reset { notice: &'static str },
    SaveRecipe,
    Recompose,
    ShiftDifficulty(DifficultyShift),
    SetDifficulty(Difficulty),
    ShowDifficultyOptions,
    /// Input not recognised in this state: nothing changes, the menu is shown again.
    Reprompt,
    /// The stored state tag was unreadable.
    Recover,
}

/// Inbound message as seen by the transition table.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input<'a> {
    Command(Command),
    Text(&'a str),
    Photo(&'a str),
    Unsupported,
}

impl<'a> Input<'a> {
    fn classify(content: &'a MessageContent) -> Self {
        match content {
            MessageContent::Text(text) => match Command::parse(text) {
                Some(command) => Input::Command(command),
                None if text.trim().is_empty() => Input::Unsupported,
                None => Input::Text(text.trim()),
            },
            MessageContent::Photo { file_id } => Input::Photo(file_id),
            MessageContent::Unsupported => Input::Unsupported,
        }
    }
}

/// The transition table.
pub fn plan(state: ConversationState, content: &MessageContent) -> Step {
    use ConversationState as S;

    let input = Input::classify(content);

    match (state, input) {
        (S::Unknown, _) => Step::Recover,

        (S::Main, Input::Command(Command::Start)) => Step::Welcome,
        (S::Main, Input::Command(Command::Help)) => Step::ShowHelp,
        (S::Main, Input::Command(Command::StartCooking)) => Step::MoveTo {
            state: S::WaitIngredients,
            notice: texts::ASK_INGREDIENTS,
        },
        (S::Main, Input::Command(Command::Settings)) => Step::OpenSettings,
        (S::Main, Input::Command(Command::SavedRecipes)) => Step::ListSavedRecipes,

        (S::WaitIngredients, Input::Command(Command::Back)) => Step::MoveTo {
            state: S::Main,
            notice: texts::BACK_TO_MENU,
        },
        (S::WaitIngredients, Input::Text(text)) => {
            Step::Extract(IngredientSource::Text(text.to_string()))
        }
        (S::WaitIngredients | S::Adding, Input::Photo(file_id)) => {
            Step::Extract(IngredientSource::Photo {
                file_id: file_id.to_string(),
            })
        }

        (S::Confirming, Input::Command(Command::Confirm)) => Step::Compose,
        (S::Confirming, Input::Command(Command::Add)) => Step::MoveTo {
            state: S::Adding,
            notice: texts::ASK_ADD,
        },
        (S::Confirming, Input::Command(Command::Remove)) => Step::MoveTo {
            state: S::Removing,
            notice: texts::ASK_REMOVE,
        },
        (S::Confirming, Input::Command(Command::Cancel)) => Step::Reset {
            notice: texts::COOKING_CANCELLED,
        },

        (S::Adding | S::Removing, Input::Command(Command::BackToList)) => Step::ShowList,
        (S::Adding, Input::Text(text)) => Step::AddIngredient(text.to_string()),
        (S::Removing, Input::Text(text)) => Step::RemoveIngredient(text.to_string()),

        (S::Settings, Input::Command(Command::Difficulty)) => Step::ShowDifficultyOptions,
        (S::Settings, Input::Command(Command::Back)) => Step::MoveTo {
            state: S::Main,
            notice: texts::BACK_TO_MENU,
        },
        (S::Settings, Input::Text(text)) => match Difficulty::from_label(text) {
            Some(difficulty) => Step::SetDifficulty(difficulty),
            None => Step::Reprompt,
        },

        (S::AfterRecipe, Input::Command(Command::SaveRecipe)) => Step::SaveRecipe,
        (S::AfterRecipe, Input::Command(Command::AnotherRecipe)) => Step::Recompose,
        (S::AfterRecipe, Input::Command(Command::Easier)) => {
            Step::ShiftDifficulty(DifficultyShift::Easier)
        }
        (S::AfterRecipe, Input::Command(Command::Harder)) => {
            Step::ShiftDifficulty(DifficultyShift::Harder)
        }
        (S::AfterRecipe, Input::Command(Command::Finish)) => Step::Reset {
            notice: texts::COOKING_FINISHED,
        },

        _ => Step::Reprompt,
    }
}
