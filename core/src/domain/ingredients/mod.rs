pub mod parser;
pub mod ports;
pub mod prompt;
pub mod services;

pub use parser::{is_empty_response, parse_ingredients};
pub use ports::IngredientService;
