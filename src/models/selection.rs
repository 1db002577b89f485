use serde::{Deserialize, Serialize};

/// A food the user has selected and how much of it they ate.
///
/// Serialized as `{"name": .., "consumed": ..}`. Extra fields in stored
/// records (older sessions kept a derived `protein` string) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionEntry {
    #[serde(rename = "name")]
    pub food_name: String,

    #[serde(rename = "consumed")]
    pub consumed_amount: f64,
}

impl SelectionEntry {
    pub fn new(food_name: impl Into<String>, consumed_amount: f64) -> Self {
        Self {
            food_name: food_name.into(),
            consumed_amount: clamp_amount(consumed_amount),
        }
    }
}

/// Negative and non-finite amounts become 0.
#[inline]
pub fn clamp_amount(amount: f64) -> f64 {
    if amount.is_finite() && amount > 0.0 {
        amount
    } else {
        0.0
    }
}
