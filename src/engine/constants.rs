use std::sync::LazyLock;

use crate::models::ActivityLevel;

/// Body weight (kg) used when none is known or the input is unusable.
pub const DEFAULT_WEIGHT: f64 = 70.0;

/// Multiplier (g protein per kg) used when no activity level resolves.
pub const FALLBACK_MULTIPLIER: f64 = 0.8;

/// Activity key selected in a fresh session.
pub const DEFAULT_ACTIVITY_KEY: &str = "sedentary";

/// Quantity basis for nutrient values when a food does not declare one.
pub const DEFAULT_REFERENCE_AMOUNT: f64 = 100.0;

/// Unit assumed when a food does not declare one.
pub const DEFAULT_UNIT: &str = "g";

/// Serving size used by the fixed default-amount policy.
pub const FIXED_SERVING_AMOUNT: f64 = 100.0;

/// Decimal places shown for every gram value.
pub const DISPLAY_DECIMALS: u32 = 2;

// ─────────────────────────────────────────────────────────────────────────────
// Configuration documents
// ─────────────────────────────────────────────────────────────────────────────

pub const ACTIVITY_CONFIG_FILE: &str = "activity-level-config.json";
pub const FOOD_CONFIG_FILE: &str = "protein-config.json";

// ─────────────────────────────────────────────────────────────────────────────
// Persisted state keys
// ─────────────────────────────────────────────────────────────────────────────

pub const WEIGHT_KEY: &str = "protein_weight";
pub const ACTIVITY_KEY: &str = "protein_activity";
pub const SELECTIONS_KEY: &str = "protein_selectedFoods";

/// Minimum Jaro-Winkler similarity for a fuzzy food suggestion.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Built-in activity table used when the configured one cannot be loaded.
pub static DEFAULT_ACTIVITY_LEVELS: LazyLock<Vec<ActivityLevel>> = LazyLock::new(|| {
    vec![
        ActivityLevel::new("sedentary", "Sedentary", 0.8, ""),
        ActivityLevel::new("active", "Active", 1.2, ""),
        ActivityLevel::new("athlete", "Athlete", 1.6, ""),
    ]
});
