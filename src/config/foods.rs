use serde_json::{Map, Value};

use crate::config::parse_number;
use crate::config::source::DocumentSource;
use crate::engine::constants::{DEFAULT_REFERENCE_AMOUNT, DEFAULT_UNIT, FOOD_CONFIG_FILE};
use crate::error::Result;
use crate::models::{FoodDefinition, FoodTable, NutrientKind, NutrientMap};

/// Keys of a detailed food entry that describe the basis, not a nutrient.
const AMOUNT_FIELD: &str = "amount";
const UNIT_FIELD: &str = "unit";

/// Normalize one entry of the food document.
///
/// Accepts a bare number (protein per 100 g) or an object of nutrient
/// values plus optional `amount` and `unit`.
fn parse_food(name: &str, value: &Value) -> Option<FoodDefinition> {
    match value {
        Value::Object(fields) => parse_detailed_food(name, fields),
        other => parse_number(other).map(|protein| FoodDefinition::protein_only(name, protein)),
    }
}

fn parse_detailed_food(name: &str, fields: &Map<String, Value>) -> Option<FoodDefinition> {
    let mut nutrients = NutrientMap::new();
    for (key, value) in fields {
        if key == AMOUNT_FIELD || key == UNIT_FIELD {
            continue;
        }
        match parse_number(value) {
            Some(amount) => {
                nutrients.insert(NutrientKind::from(key.as_str()), amount);
            }
            None if value.is_null() => {}
            None => tracing::debug!("Ignoring non-numeric field '{}' of '{}'", key, name),
        }
    }

    if nutrients.is_empty() {
        return None;
    }

    let reference = fields
        .get(AMOUNT_FIELD)
        .and_then(parse_number)
        .unwrap_or(DEFAULT_REFERENCE_AMOUNT);
    let unit = fields
        .get(UNIT_FIELD)
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_UNIT);

    Some(FoodDefinition::new(name, nutrients).with_reference(reference, unit))
}

/// Parse the food document in either of its shapes, keeping document order.
///
/// Entries without any usable nutrient are skipped.
pub fn parse_food_table(json: &str) -> Result<FoodTable> {
    let document: Map<String, Value> = serde_json::from_str(json)?;
    let foods: Vec<FoodDefinition> = document
        .iter()
        .filter_map(|(name, value)| {
            let food = parse_food(name, value);
            if food.is_none() {
                tracing::warn!("Skipping food '{}' without usable nutrient values", name);
            }
            food
        })
        .collect();

    Ok(FoodTable::new(foods))
}

/// Load the food table, falling back to an empty table on any failure.
pub fn load_food_table<D: DocumentSource + ?Sized>(source: &D) -> FoodTable {
    match source
        .fetch(FOOD_CONFIG_FILE)
        .and_then(|json| parse_food_table(&json))
    {
        Ok(table) => {
            tracing::info!("Loaded {} foods", table.len());
            table
        }
        Err(e) => {
            tracing::warn!("{}; starting with an empty food table", e);
            FoodTable::default()
        }
    }
}
