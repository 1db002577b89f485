use crate::engine::calculations::round2;
use crate::engine::status::IntakeStatus;
use crate::models::{ActivityTable, FoodDefinition, NutrientKind, NutrientMap};
use crate::state::{KeyValueStore, Session};

/// Format a daily gram value, e.g. `84.00 g/day`.
pub fn format_per_day(grams: f64) -> String {
    format!("{:.2} g/day", round2(grams))
}

/// Format a gram value, e.g. `46.50 g`.
pub fn format_grams(grams: f64) -> String {
    format!("{:.2} g", round2(grams))
}

fn status_label(status: IntakeStatus) -> &'static str {
    match status {
        IntakeStatus::Met => "MET",
        IntakeStatus::Below => "BELOW",
    }
}

fn nutrients_inline(nutrients: &NutrientMap) -> String {
    nutrients
        .iter()
        .map(|(kind, value)| format!("{}: {:.2}", kind, value))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Display the activity levels with their multipliers.
pub fn display_activity_levels(activities: &ActivityTable, current_key: &str) {
    println!();
    println!("=== Activity Levels ===");
    for level in activities.iter() {
        let marker = if level.key == current_key { "*" } else { " " };
        let description = if level.description.is_empty() {
            String::new()
        } else {
            format!(": {}", level.description)
        };
        println!(
            " {} {} [{}]{} (x{}g/kg)",
            marker, level.label, level.key, description, level.multiplier
        );
    }
    println!();
}

/// Display foods with their per-reference nutrient values.
pub fn display_food_list(foods: &[(&FoodDefinition, bool)], title: &str) {
    if foods.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, foods.len());
    println!();

    let max_name_len = foods.iter().map(|(f, _)| f.name.len()).max().unwrap_or(10);

    for (food, selected) in foods {
        let marker = if *selected { "[x]" } else { "[ ]" };
        println!(
            "  {} {:<width$} per {}{}: {}",
            marker,
            food.name,
            food.reference_amount,
            food.unit,
            nutrients_inline(&food.nutrients),
            width = max_name_len
        );
    }

    println!();
}

/// Display the profile, selected foods with contributions, totals, and status.
pub fn display_summary<S: KeyValueStore>(session: &Session<S>) {
    let profile = session.profile();
    let summary = session.summary();
    let activity_label = session
        .activity()
        .map(|a| a.label.as_str())
        .unwrap_or("(unset)");

    println!();
    println!("=== Daily Protein ===");
    println!();
    println!("Weight: {} kg", profile.weight);
    println!("Activity: {} (x{})", activity_label, session.multiplier());
    println!("Required: {}", format_per_day(summary.required_protein));
    println!();

    let contributions = session.contributions();
    if contributions.is_empty() {
        println!("No foods selected.");
    } else {
        let max_name_len = contributions
            .iter()
            .map(|(e, _)| e.food_name.len())
            .max()
            .unwrap_or(10);

        for (i, (entry, contribution)) in contributions.iter().enumerate() {
            let unit = session
                .foods()
                .get(&entry.food_name)
                .map(|f| f.unit.as_str())
                .unwrap_or("?");
            let protein = contribution
                .get(&NutrientKind::Protein)
                .copied()
                .unwrap_or(0.0);
            println!(
                "{:>3}. {:<width$} {:>8.1}{:<3} protein {:>8.2}",
                i + 1,
                entry.food_name,
                entry.consumed_amount,
                unit,
                round2(protein),
                width = max_name_len
            );
        }
    }

    println!();
    println!("--- Totals ---");
    for (kind, value) in &summary.totals {
        println!("{}: {}", kind, format_grams(*value));
    }
    println!(
        "Consumed: {} [{}]",
        format_per_day(summary.protein_total),
        status_label(summary.status)
    );
    if !summary.status.is_met() {
        println!("Remaining: {}", format_grams(summary.remaining_protein));
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_per_day() {
        assert_eq!(format_per_day(84.0), "84.00 g/day");
        assert_eq!(format_per_day(98.499), "98.50 g/day");
    }

    #[test]
    fn test_format_grams() {
        assert_eq!(format_grams(46.5), "46.50 g");
        assert_eq!(format_grams(0.0), "0.00 g");
    }
}
