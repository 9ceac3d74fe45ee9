pub mod commands;
pub mod entities;
pub mod ports;
pub mod services;
pub mod texts;
pub mod transitions;


pub use entities::{
    CallbackQuery, ChatEvent, InboundMessage, InlineButton, Keyboard, MessageContent,
};
pub use ports::{ChatTransport, ConversationService};
