pub mod entities;
pub mod ports;
pub mod value_objects;

pub use entities::UserPreferences;
pub use ports::PreferencesRepository;
pub use value_objects::{Cuisine, Difficulty, DifficultyShift, PreferenceUpdate};
