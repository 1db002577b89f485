use dialoguer::{Confirm, Input, Select};

use crate::error::{Result, TrackerError};
use crate::interface::render::{display_food_list, display_summary, format_per_day};
use crate::models::FoodTable;
use crate::state::{Change, KeyValueStore, Session};

/// Resolve a typed food name, offering fuzzy matches when nothing fits exactly.
pub fn prompt_food_name(foods: &FoodTable, input: &str) -> Result<Option<String>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    if let Some(food) = foods.resolve(input) {
        return Ok(Some(food.name.clone()));
    }

    let candidates = foods.suggest(input);
    match candidates.len() {
        0 => {
            println!("No matching food found for '{}'", input);
            Ok(None)
        }
        1 => {
            let food = candidates[0];
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", food.name))
                .default(true)
                .interact()?;
            Ok(confirm.then(|| food.name.clone()))
        }
        _ => {
            let options: Vec<String> = candidates.iter().take(5).map(|f| f.name.clone()).collect();
            let mut selection_options = options.clone();
            selection_options.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt("Which did you mean?")
                .items(&selection_options)
                .default(0)
                .interact()?;

            Ok(options.get(selection).cloned())
        }
    }
}

/// Prompt for body weight.
pub fn prompt_weight<S: KeyValueStore>(session: &mut Session<S>) -> Result<Change> {
    let input: String = Input::new()
        .with_prompt("Body weight (kg)")
        .default(session.profile().weight.to_string())
        .interact_text()?;

    Ok(session.set_weight_input(&input))
}

/// Prompt for an activity level from the loaded table.
pub fn prompt_activity<S: KeyValueStore>(session: &mut Session<S>) -> Result<Change> {
    let keys: Vec<String> = session.activities().iter().map(|l| l.key.clone()).collect();
    let options: Vec<String> = session
        .activities()
        .iter()
        .map(|l| format!("{} (x{}g/kg)", l.label, l.multiplier))
        .collect();
    let current = keys
        .iter()
        .position(|k| *k == session.profile().activity_key)
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Activity level")
        .items(&options)
        .default(current)
        .interact()?;

    let key = keys
        .get(selection)
        .ok_or_else(|| TrackerError::InvalidInput("No activity levels loaded".to_string()))?;
    session.set_activity(key)
}

/// Search the food table and toggle the chosen food.
pub fn prompt_toggle_food<S: KeyValueStore>(session: &mut Session<S>) -> Result<Option<Change>> {
    let query: String = Input::new()
        .with_prompt("Search food (Enter for all)")
        .allow_empty(true)
        .interact_text()?;

    let matches = session.search_foods(&query);
    if matches.is_empty() {
        return match prompt_food_name(session.foods(), &query)? {
            Some(name) => Ok(Some(session.toggle_food(&name)?)),
            None => Ok(None),
        };
    }

    display_food_list(&matches, "Matching foods");
    let options: Vec<String> = matches
        .iter()
        .map(|(f, selected)| format!("{} {}", if *selected { "[x]" } else { "[ ]" }, f.name))
        .collect();
    let names: Vec<String> = matches.iter().map(|(f, _)| f.name.clone()).collect();

    let selection = Select::new()
        .with_prompt("Toggle which food?")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(Some(session.toggle_food(&names[selection])?))
}

/// Edit the consumed amount of a selected food.
pub fn prompt_amount<S: KeyValueStore>(session: &mut Session<S>) -> Result<Option<Change>> {
    let names: Vec<String> = session
        .selections()
        .iter()
        .map(|e| e.food_name.clone())
        .collect();
    if names.is_empty() {
        println!("No foods selected.");
        return Ok(None);
    }

    let selection = Select::new()
        .with_prompt("Edit which food?")
        .items(&names)
        .default(0)
        .interact()?;
    let name = &names[selection];

    let current = session.selections()[selection].consumed_amount;
    let input: String = Input::new()
        .with_prompt(format!("Consumed amount of '{}'", name))
        .default(current.to_string())
        .interact_text()?;

    Ok(Some(session.set_amount_input(name, &input)?))
}

/// Menu loop: each action mutates the session, which persists itself, then
/// the affected part of the screen is redrawn.
pub fn run_interactive<S: KeyValueStore>(session: &mut Session<S>) -> Result<()> {
    const ACTIONS: [&str; 6] = [
        "Set weight",
        "Choose activity level",
        "Select / deselect food",
        "Edit consumed amount",
        "Show summary",
        "Quit",
    ];

    display_summary(session);

    loop {
        let action = Select::new()
            .with_prompt("What next?")
            .items(&ACTIONS)
            .default(2)
            .interact()?;

        let change = match action {
            0 => Some(prompt_weight(session)?),
            1 => Some(prompt_activity(session)?),
            2 => prompt_toggle_food(session)?,
            3 => prompt_amount(session)?,
            4 => {
                display_summary(session);
                None
            }
            _ => break,
        };

        match change {
            Some(Change::ProfileChanged) => {
                println!("Required: {}", format_per_day(session.required_protein()));
            }
            Some(change) if change.changes_membership() => display_summary(session),
            Some(Change::AmountChanged(_)) => {
                println!(
                    "Consumed: {} / {}",
                    format_per_day(session.protein_total()),
                    format_per_day(session.required_protein())
                );
            }
            _ => {}
        }
    }

    Ok(())
}
