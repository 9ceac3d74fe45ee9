use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    session::entities::{ConversationState, Session},
};

/// Volatile per-chat conversation store.
///
/// `set` replaces the whole record (last writer wins). `merge_add`, `merge_remove` and
/// `set_state` are atomic read-modify-write operations on a single field, so two
/// concurrent ingredient edits for the same chat never lose each other.
#[cfg_attr(test, mockall::automock)]
pub trait SessionRepository: Send + Sync {
    fn get(
        &self,
        chat_id: i64,
    ) -> impl Future<Output = Result<Option<Session>, CoreError>> + Send;

    fn set(
        &self,
        chat_id: i64,
        session: Session,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn merge_add(
        &self,
        chat_id: i64,
        names: Vec<String>,
    ) -> impl Future<Output = Result<Session, CoreError>> + Send;

    fn merge_remove(
        &self,
        chat_id: i64,
        names: Vec<String>,
    ) -> impl Future<Output = Result<Session, CoreError>> + Send;

    fn set_state(
        &self,
        chat_id: i64,
        state: ConversationState,
    ) -> impl Future<Output = Result<Session, CoreError>> + Send;

    fn delete(&self, chat_id: i64) -> impl Future<Output = Result<(), CoreError>> + Send;
}
