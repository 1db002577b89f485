pub mod activity;
pub mod food;
pub mod profile;
pub mod selection;

pub use activity::{ActivityLevel, ActivityTable};
pub use food::{FoodDefinition, FoodTable, NutrientKind, NutrientMap};
pub use profile::{sanitize_weight, PersistedSnapshot, ProfileState};
pub use selection::{clamp_amount, SelectionEntry};
