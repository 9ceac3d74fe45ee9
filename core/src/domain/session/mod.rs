pub mod entities;
pub mod ports;

pub use entities::{ConversationState, Session};
pub use ports::SessionRepository;
