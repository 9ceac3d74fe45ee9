use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError, history::entities::RecipeHistoryEntry,
};

#[cfg_attr(test, mockall::automock)]
pub trait RecipeHistoryRepository: Send + Sync {
    fn append(
        &self,
        user_id: i64,
        ingredients: String,
        recipe: String,
    ) -> impl Future<Output = Result<RecipeHistoryEntry, CoreError>> + Send;

    /// Newest first.
    fn list_recent(
        &self,
        user_id: i64,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<RecipeHistoryEntry>, CoreError>> + Send;

    fn get_by_id(
        &self,
        user_id: i64,
        entry_id: i64,
    ) -> impl Future<Output = Result<Option<RecipeHistoryEntry>, CoreError>> + Send;
}
