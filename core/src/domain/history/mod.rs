pub mod entities;
pub mod ports;

pub use entities::RecipeHistoryEntry;
pub use ports::RecipeHistoryRepository;
