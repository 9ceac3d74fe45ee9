pub mod http;
pub mod session_sweeper;
