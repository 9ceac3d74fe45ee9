pub mod recipe_history;
pub mod user_preferences;
pub mod users;
