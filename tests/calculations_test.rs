use std::collections::BTreeSet;

use assert_float_eq::*;

use protein_tracker_rs::engine::{
    aggregate, contribution, required_daily_protein, status, IntakeStatus, SummationMode,
    DEFAULT_ACTIVITY_LEVELS,
};
use protein_tracker_rs::interface::format_per_day;
use protein_tracker_rs::models::{FoodDefinition, NutrientKind, NutrientMap};

fn make_food(name: &str, protein: f64, carbs: f64, fat: f64) -> FoodDefinition {
    let mut nutrients = NutrientMap::new();
    nutrients.insert(NutrientKind::Protein, protein);
    nutrients.insert(NutrientKind::Carbohydrate, carbs);
    nutrients.insert(NutrientKind::Fat, fat);
    FoodDefinition::new(name, nutrients)
}

#[test]
fn test_requirement_is_weight_times_multiplier() {
    for level in DEFAULT_ACTIVITY_LEVELS.iter() {
        for weight in [45.0, 70.0, 82.5, 120.0] {
            assert_eq!(
                required_daily_protein(weight, level.multiplier),
                weight * level.multiplier
            );
        }
    }
}

#[test]
fn test_requirement_display() {
    assert_eq!(format_per_day(required_daily_protein(70.0, 1.2)), "84.00 g/day");
    assert_eq!(format_per_day(required_daily_protein(70.0, 0.8)), "56.00 g/day");
}

#[test]
fn test_contribution_per_kind() {
    let oats = make_food("Oats", 13.0, 60.0, 7.0);
    let c = contribution(&oats, 50.0);

    assert_float_absolute_eq!(c[&NutrientKind::Protein], 6.5, 1e-9);
    assert_float_absolute_eq!(c[&NutrientKind::Carbohydrate], 30.0, 1e-9);
    assert_float_absolute_eq!(c[&NutrientKind::Fat], 3.5, 1e-9);
}

#[test]
fn test_aggregate_sums_every_kind() {
    let oats = make_food("Oats", 13.0, 60.0, 7.0);
    let milk = make_food("Milk", 3.4, 4.8, 1.5);
    let kinds: BTreeSet<NutrientKind> = oats.nutrients.keys().cloned().collect();

    let totals = aggregate(
        vec![(&oats, 50.0), (&milk, 250.0)],
        &kinds,
        SummationMode::FullPrecision,
    );

    assert_float_absolute_eq!(totals[&NutrientKind::Protein], 15.0, 1e-9);
    assert_float_absolute_eq!(totals[&NutrientKind::Carbohydrate], 42.0, 1e-9);
    assert_float_absolute_eq!(totals[&NutrientKind::Fat], 7.25, 1e-9);
}

#[test]
fn test_aggregate_empty_selection() {
    let kinds: BTreeSet<NutrientKind> = [NutrientKind::Protein, NutrientKind::Fat]
        .into_iter()
        .collect();
    let totals = aggregate(Vec::new(), &kinds, SummationMode::RoundThenSum);

    assert_eq!(totals.len(), 2);
    assert_eq!(format!("{:.2}", totals[&NutrientKind::Protein]), "0.00");
    assert_eq!(format!("{:.2}", totals[&NutrientKind::Fat]), "0.00");
}

#[test]
fn test_rounding_error_bounded_by_entry_count() {
    let foods: Vec<FoodDefinition> = (0..10)
        .map(|i| FoodDefinition::protein_only(format!("Food {}", i), 7.777))
        .collect();
    let entries: Vec<(&FoodDefinition, f64)> = foods.iter().map(|f| (f, 33.0)).collect();
    let kinds = BTreeSet::new();

    let rounded = aggregate(entries.clone(), &kinds, SummationMode::RoundThenSum);
    let exact = aggregate(entries, &kinds, SummationMode::FullPrecision);

    let drift = (rounded[&NutrientKind::Protein] - exact[&NutrientKind::Protein]).abs();
    assert!(drift <= 0.005 * 10.0 + 1e-9, "drift {} too large", drift);
}

#[test]
fn test_status_comparator() {
    assert_eq!(status(0.0, 0.0), IntakeStatus::Below);
    assert_eq!(status(50.0, 50.0), IntakeStatus::Met);
    assert_eq!(status(49.99, 50.0), IntakeStatus::Below);
}
