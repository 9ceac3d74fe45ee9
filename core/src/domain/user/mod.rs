pub mod entities;
pub mod ports;
pub mod services;

pub use entities::User;
pub use ports::UserRepository;
