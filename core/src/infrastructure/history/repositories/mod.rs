pub mod recipe_history_repository;
