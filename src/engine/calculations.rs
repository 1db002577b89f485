use std::collections::BTreeSet;

use crate::engine::constants::{DEFAULT_WEIGHT, DISPLAY_DECIMALS, FALLBACK_MULTIPLIER};
use crate::models::{FoodDefinition, NutrientKind, NutrientMap};

/// Order of rounding and summation when aggregating contributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummationMode {
    /// Round each contribution to display precision, then sum.
    ///
    /// Reproduces the totals shown by earlier versions of the tracker; can
    /// drift from the exact sum by up to 0.005 per selected food.
    #[default]
    RoundThenSum,
    /// Sum full-precision contributions.
    FullPrecision,
}

/// Round to display precision (2 decimals).
#[inline]
pub fn round2(value: f64) -> f64 {
    let factor = 10_f64.powi(DISPLAY_DECIMALS as i32);
    (value * factor).round() / factor
}

/// Daily protein requirement in grams.
///
/// Formula: weight × multiplier. An unusable weight is replaced by
/// `DEFAULT_WEIGHT`, an unusable multiplier by `FALLBACK_MULTIPLIER`.
pub fn required_daily_protein(weight: f64, multiplier: f64) -> f64 {
    let weight = if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        DEFAULT_WEIGHT
    };
    let multiplier = if multiplier.is_finite() && multiplier > 0.0 {
        multiplier
    } else {
        FALLBACK_MULTIPLIER
    };
    weight * multiplier
}

/// Amount of one nutrient in `consumed_amount` of a food.
///
/// A kind the food does not declare contributes 0.
pub fn contribution_of(food: &FoodDefinition, consumed_amount: f64, kind: &NutrientKind) -> f64 {
    food.nutrient(kind)
        .map(|per_reference| per_reference * consumed_amount / food.reference_amount)
        .unwrap_or(0.0)
}

/// Full-precision contribution of every nutrient the food declares.
pub fn contribution(food: &FoodDefinition, consumed_amount: f64) -> NutrientMap {
    food.nutrients
        .keys()
        .map(|kind| (kind.clone(), contribution_of(food, consumed_amount, kind)))
        .collect()
}

/// Sum contributions over `entries`.
///
/// Every kind in `kinds` is present in the result (0 when nothing
/// contributes); kinds found only on the entries are added as well.
pub fn aggregate<'a, I>(
    entries: I,
    kinds: &BTreeSet<NutrientKind>,
    mode: SummationMode,
) -> NutrientMap
where
    I: IntoIterator<Item = (&'a FoodDefinition, f64)>,
{
    let mut totals: NutrientMap = kinds.iter().map(|k| (k.clone(), 0.0)).collect();

    for (food, amount) in entries {
        for (kind, value) in contribution(food, amount) {
            let value = match mode {
                SummationMode::RoundThenSum => round2(value),
                SummationMode::FullPrecision => value,
            };
            *totals.entry(kind).or_insert(0.0) += value;
        }
    }

    totals
}
