use crate::engine::calculations::{self, SummationMode};
use crate::engine::constants::FIXED_SERVING_AMOUNT;
use crate::error::{Result, TrackerError};
use crate::models::{clamp_amount, FoodDefinition, FoodTable, NutrientMap, SelectionEntry};
use crate::state::Change;

/// Amount given to a food when it is first selected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultAmountPolicy {
    /// Always the same serving.
    Fixed(f64),
    /// The food's own reference amount.
    FromFoodDefinition,
}

impl DefaultAmountPolicy {
    pub fn amount_for(&self, food: &FoodDefinition) -> f64 {
        match self {
            DefaultAmountPolicy::Fixed(amount) => clamp_amount(*amount),
            DefaultAmountPolicy::FromFoodDefinition => food.reference_amount,
        }
    }
}

impl Default for DefaultAmountPolicy {
    fn default() -> Self {
        DefaultAmountPolicy::Fixed(FIXED_SERVING_AMOUNT)
    }
}

/// Owns the selected foods and their consumed amounts.
///
/// Entries are kept in selection order with at most one entry per food and
/// no negative amounts. Nutrient values are never stored here; they are
/// derived from the food table on every read.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    entries: Vec<SelectionEntry>,
    policy: DefaultAmountPolicy,
}

impl SelectionManager {
    pub fn new(policy: DefaultAmountPolicy) -> Self {
        Self {
            entries: Vec::new(),
            policy,
        }
    }

    /// Replace the selection with a persisted list.
    ///
    /// Repeated names keep their first occurrence and amounts are clamped.
    /// Foods missing from the current table are kept; see `unknown_foods`.
    pub fn restore(&mut self, entries: Vec<SelectionEntry>) {
        self.entries.clear();
        for entry in entries {
            if self.is_selected(&entry.food_name) {
                tracing::warn!("Dropping duplicate persisted selection '{}'", entry.food_name);
                continue;
            }
            self.entries.push(SelectionEntry::new(entry.food_name, entry.consumed_amount));
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.food_name == name)
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&SelectionEntry> {
        self.position(name).map(|i| &self.entries[i])
    }

    /// Select an unselected food, or deselect a selected one.
    ///
    /// Selecting requires the food to be in `table`; its amount comes from
    /// the default-amount policy. Deselecting discards any edited amount.
    pub fn toggle_select(&mut self, table: &FoodTable, name: &str) -> Result<Change> {
        if let Some(change) = self.deselect(name) {
            return Ok(change);
        }

        let food = table.require(name)?;
        let amount = self.policy.amount_for(food);
        self.entries.push(SelectionEntry::new(food.name.clone(), amount));
        tracing::debug!("Selected '{}' at {}", food.name, amount);
        Ok(Change::Selected(food.name.clone()))
    }

    /// Remove a food from the selection. Returns `None` if it was not selected.
    pub fn deselect(&mut self, name: &str) -> Option<Change> {
        let i = self.position(name)?;
        let entry = self.entries.remove(i);
        tracing::debug!("Deselected '{}'", entry.food_name);
        Some(Change::Deselected(entry.food_name))
    }

    /// Edit the consumed amount of a selected food.
    ///
    /// Negative and non-finite amounts are clamped to 0.
    pub fn set_consumed_amount(&mut self, name: &str, amount: f64) -> Result<Change> {
        let i = self
            .position(name)
            .ok_or_else(|| TrackerError::NotSelected(name.to_string()))?;
        self.entries[i].consumed_amount = clamp_amount(amount);
        Ok(Change::AmountChanged(self.entries[i].food_name.clone()))
    }

    /// Selections in the order they were made.
    pub fn current_selections(&self) -> &[SelectionEntry] {
        &self.entries
    }

    /// Selected foods that the table does not define.
    pub fn unknown_foods<'a>(&'a self, table: &FoodTable) -> Vec<&'a str> {
        self.entries
            .iter()
            .filter(|e| table.get(&e.food_name).is_none())
            .map(|e| e.food_name.as_str())
            .collect()
    }

    /// Each selection with its full-precision contribution.
    ///
    /// Foods missing from the table contribute nothing.
    pub fn contributions<'a>(
        &'a self,
        table: &FoodTable,
    ) -> Vec<(&'a SelectionEntry, NutrientMap)> {
        self.entries
            .iter()
            .map(|entry| {
                let contribution = table
                    .get(&entry.food_name)
                    .map(|food| calculations::contribution(food, entry.consumed_amount))
                    .unwrap_or_default();
                (entry, contribution)
            })
            .collect()
    }

    /// Nutrient totals over every selection, with every kind in the table present.
    pub fn totals(&self, table: &FoodTable, mode: SummationMode) -> NutrientMap {
        let resolved = self
            .entries
            .iter()
            .filter_map(|entry| match table.require(&entry.food_name) {
                Ok(food) => Some((food, entry.consumed_amount)),
                Err(e) => {
                    tracing::warn!("{}; counting it as 0", e);
                    None
                }
            });
        calculations::aggregate(resolved, &table.nutrient_kinds(), mode)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NutrientKind;

    fn sample_table() -> FoodTable {
        FoodTable::new(vec![
            FoodDefinition::protein_only("Chicken Breast", 31.0),
            FoodDefinition::protein_only("Egg", 13.0),
            FoodDefinition::protein_only("Whey", 80.0).with_reference(30.0, "g"),
        ])
    }

    #[test]
    fn test_toggle_select_and_deselect() {
        let table = sample_table();
        let mut manager = SelectionManager::default();

        let change = manager.toggle_select(&table, "Egg").unwrap();
        assert_eq!(change, Change::Selected("Egg".to_string()));
        assert_eq!(manager.get("Egg").unwrap().consumed_amount, 100.0);

        let change = manager.toggle_select(&table, "Egg").unwrap();
        assert_eq!(change, Change::Deselected("Egg".to_string()));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_reselect_restores_default_amount() {
        let table = sample_table();
        let mut manager = SelectionManager::default();

        manager.toggle_select(&table, "Egg").unwrap();
        manager.set_consumed_amount("Egg", 350.0).unwrap();
        manager.toggle_select(&table, "Egg").unwrap();
        manager.toggle_select(&table, "Egg").unwrap();

        assert_eq!(manager.get("Egg").unwrap().consumed_amount, 100.0);
    }

    #[test]
    fn test_policy_from_food_definition() {
        let table = sample_table();
        let mut manager = SelectionManager::new(DefaultAmountPolicy::FromFoodDefinition);
        manager.toggle_select(&table, "Whey").unwrap();
        assert_eq!(manager.get("Whey").unwrap().consumed_amount, 30.0);

        let mut fixed = SelectionManager::new(DefaultAmountPolicy::Fixed(250.0));
        fixed.toggle_select(&table, "Whey").unwrap();
        assert_eq!(fixed.get("Whey").unwrap().consumed_amount, 250.0);
    }

    #[test]
    fn test_select_unknown_food_fails() {
        let table = sample_table();
        let mut manager = SelectionManager::default();
        let err = manager.toggle_select(&table, "Tofu").unwrap_err();
        assert!(matches!(err, TrackerError::UnknownFood(name) if name == "Tofu"));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_set_amount_requires_selection() {
        let mut manager = SelectionManager::default();
        let err = manager.set_consumed_amount("Egg", 50.0).unwrap_err();
        assert!(matches!(err, TrackerError::NotSelected(_)));
    }

    #[test]
    fn test_set_amount_clamps() {
        let table = sample_table();
        let mut manager = SelectionManager::default();
        manager.toggle_select(&table, "Egg").unwrap();

        manager.set_consumed_amount("Egg", -20.0).unwrap();
        assert_eq!(manager.get("Egg").unwrap().consumed_amount, 0.0);

        manager.set_consumed_amount("Egg", f64::NAN).unwrap();
        assert_eq!(manager.get("Egg").unwrap().consumed_amount, 0.0);
    }

    #[test]
    fn test_insertion_order_is_stable() {
        let table = sample_table();
        let mut manager = SelectionManager::default();
        manager.toggle_select(&table, "Whey").unwrap();
        manager.toggle_select(&table, "Chicken Breast").unwrap();
        manager.toggle_select(&table, "Egg").unwrap();
        manager.set_consumed_amount("Chicken Breast", 10.0).unwrap();
        manager.toggle_select(&table, "Whey").unwrap();

        let names: Vec<&str> = manager
            .current_selections()
            .iter()
            .map(|e| e.food_name.as_str())
            .collect();
        assert_eq!(names, vec!["Chicken Breast", "Egg"]);
    }

    #[test]
    fn test_restore_dedupes_and_clamps() {
        let mut manager = SelectionManager::default();
        manager.restore(vec![
            SelectionEntry { food_name: "Egg".into(), consumed_amount: -4.0 },
            SelectionEntry { food_name: "Tofu".into(), consumed_amount: 120.0 },
            SelectionEntry { food_name: "Egg".into(), consumed_amount: 300.0 },
        ]);

        assert_eq!(manager.len(), 2);
        assert_eq!(manager.get("Egg").unwrap().consumed_amount, 0.0);
        assert_eq!(manager.unknown_foods(&sample_table()), vec!["Tofu"]);
    }

    #[test]
    fn test_totals_skip_unknown_foods() {
        let table = sample_table();
        let mut manager = SelectionManager::default();
        manager.restore(vec![
            SelectionEntry::new("Chicken Breast", 150.0),
            SelectionEntry::new("Tofu", 200.0),
        ]);

        let totals = manager.totals(&table, SummationMode::default());
        assert!((totals[&NutrientKind::Protein] - 46.5).abs() < 1e-9);

        let contributions = manager.contributions(&table);
        assert!(contributions[1].1.is_empty());
    }
}
