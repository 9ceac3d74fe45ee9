use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    conversation::entities::{CallbackQuery, InboundMessage, Keyboard},
    session::entities::Session,
};

/// Outbound side of the chat platform.
#[cfg_attr(test, mockall::automock)]
pub trait ChatTransport: Send + Sync {
    fn send_message(
        &self,
        chat_id: i64,
        text: String,
        keyboard: Option<Keyboard>,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn edit_message(
        &self,
        chat_id: i64,
        message_id: i64,
        text: String,
        keyboard: Option<Keyboard>,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Fetches the bytes of a photo referenced by an inbound message.
    fn download_photo(
        &self,
        file_id: String,
    ) -> impl Future<Output = Result<Vec<u8>, CoreError>> + Send;

    fn answer_callback(
        &self,
        callback_id: String,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Conversation Engine. Both entry points contain every failure: errors are logged and
/// turned into user-facing notices, never returned.
pub trait ConversationService: Send + Sync {
    /// Runs one message through the state machine and returns the session it left behind.
    fn handle_message(&self, message: InboundMessage) -> impl Future<Output = Session> + Send;

    fn handle_callback(&self, query: CallbackQuery) -> impl Future<Output = ()> + Send;

    /// Clears the client's pending state for a button press without acting on it.
    fn dismiss_callback(&self, callback_id: String) -> impl Future<Output = ()> + Send;
}
