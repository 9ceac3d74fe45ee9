pub mod formatter;
pub mod ports;
pub mod prompt;
pub mod services;
pub mod value_objects;

pub use formatter::format_recipe;
pub use ports::RecipeService;
pub use value_objects::{FALLBACK_RECIPE, RecipeOutcome, RecipeRequest};
