use crate::engine::constants::{DEFAULT_ACTIVITY_KEY, DEFAULT_WEIGHT};
use crate::models::SelectionEntry;

/// Body weight and chosen activity level.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileState {
    pub weight: f64,
    pub activity_key: String,
}

impl Default for ProfileState {
    fn default() -> Self {
        Self {
            weight: DEFAULT_WEIGHT,
            activity_key: DEFAULT_ACTIVITY_KEY.to_string(),
        }
    }
}

/// Usable body weight: non-positive and non-finite values become the default.
#[inline]
pub fn sanitize_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        DEFAULT_WEIGHT
    }
}

/// Everything restored at session start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedSnapshot {
    pub profile: ProfileState,
    pub selections: Vec<SelectionEntry>,
}
