//! Configuration documents: the activity table and the food table.
//!
//! Both are read once per session. Any failure is recovered here so the
//! rest of the crate always receives a usable, normalized table.

pub mod activity;
pub mod foods;
pub mod source;

use serde_json::Value;

use crate::models::{ActivityTable, FoodTable};

pub use activity::{load_activity_levels, parse_activity_levels};
pub use foods::{load_food_table, parse_food_table};
pub use source::{DirSource, DocumentSource, MemorySource};

/// Both configuration tables.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub activities: ActivityTable,
    pub foods: FoodTable,
}

impl LoadedConfig {
    /// Load both tables from `source`.
    pub fn load<D: DocumentSource + ?Sized>(source: &D) -> Self {
        Self {
            activities: load_activity_levels(source),
            foods: load_food_table(source),
        }
    }
}

/// Read a number that may be written as a JSON number or a string,
/// with either `.` or `,` as the decimal separator.
pub(crate) fn parse_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(&json!(1.2)), Some(1.2));
        assert_eq!(parse_number(&json!(" 0.8 ")), Some(0.8));
        assert_eq!(parse_number(&json!("1,6")), Some(1.6));
        assert_eq!(parse_number(&json!("abc")), None);
        assert_eq!(parse_number(&json!(null)), None);
        assert_eq!(parse_number(&json!("NaN")), None);
    }
}
