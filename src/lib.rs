pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod interface;
pub mod models;
pub mod state;

pub use error::{Result, TrackerError};
pub use models::{ActivityLevel, FoodDefinition, NutrientKind, ProfileState, SelectionEntry};
pub use state::{Change, Session, SessionOptions};
