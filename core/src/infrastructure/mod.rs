pub mod db;
pub mod history;
pub mod llm;
pub mod preferences;
pub mod session;
pub mod telegram;
pub mod user;
