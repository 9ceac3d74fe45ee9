pub mod client;
pub mod mappers;
