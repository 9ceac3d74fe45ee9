pub mod common;
pub mod conversation;
pub mod history;
pub mod ingredients;
pub mod llm;
pub mod preferences;
pub mod recipe;
pub mod session;
pub mod user;
