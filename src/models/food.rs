use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use serde::Serialize;
use strsim::jaro_winkler;

use crate::engine::constants::{DEFAULT_REFERENCE_AMOUNT, DEFAULT_UNIT, FUZZY_MATCH_THRESHOLD};
use crate::error::{Result, TrackerError};

/// A kind of nutrient tracked by a food table.
///
/// The set is open: tables may carry any nutrient, the three macronutrients
/// just get their own variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub enum NutrientKind {
    Protein,
    Carbohydrate,
    Fat,
    Other(String),
}

impl NutrientKind {
    pub fn as_str(&self) -> &str {
        match self {
            NutrientKind::Protein => "protein",
            NutrientKind::Carbohydrate => "carbohydrate",
            NutrientKind::Fat => "fat",
            NutrientKind::Other(name) => name,
        }
    }
}

impl From<&str> for NutrientKind {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "protein" | "proteins" => NutrientKind::Protein,
            "carbohydrate" | "carbohydrates" | "carbs" => NutrientKind::Carbohydrate,
            "fat" | "fats" => NutrientKind::Fat,
            other => NutrientKind::Other(other.to_string()),
        }
    }
}

impl From<NutrientKind> for String {
    fn from(kind: NutrientKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for NutrientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nutrient amounts keyed by kind, in a stable order.
pub type NutrientMap = BTreeMap<NutrientKind, f64>;

/// A food with nutrient values expressed per `reference_amount` units.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodDefinition {
    pub name: String,
    pub nutrients: NutrientMap,
    pub reference_amount: f64,
    pub unit: String,
}

impl FoodDefinition {
    /// Create a food expressed per 100 g.
    pub fn new(name: impl Into<String>, nutrients: NutrientMap) -> Self {
        Self {
            name: name.into(),
            nutrients,
            reference_amount: DEFAULT_REFERENCE_AMOUNT,
            unit: DEFAULT_UNIT.to_string(),
        }
    }

    /// Create a protein-only food, the shape of a flat food table.
    pub fn protein_only(name: impl Into<String>, protein_per_100: f64) -> Self {
        let mut nutrients = NutrientMap::new();
        nutrients.insert(NutrientKind::Protein, protein_per_100);
        Self::new(name, nutrients)
    }

    /// Override the quantity basis. Non-positive or non-finite values fall
    /// back to the default basis.
    pub fn with_reference(mut self, amount: f64, unit: impl Into<String>) -> Self {
        self.reference_amount = if amount.is_finite() && amount > 0.0 {
            amount
        } else {
            DEFAULT_REFERENCE_AMOUNT
        };
        self.unit = unit.into();
        self
    }

    /// Nutrient value per reference amount, if the food declares it.
    pub fn nutrient(&self, kind: &NutrientKind) -> Option<f64> {
        self.nutrients.get(kind).copied()
    }

    /// Protein per reference amount, 0 when undeclared.
    pub fn protein(&self) -> f64 {
        self.nutrient(&NutrientKind::Protein).unwrap_or(0.0)
    }
}

/// The loaded food table: document order plus a name index.
#[derive(Debug, Clone, Default)]
pub struct FoodTable {
    foods: Vec<FoodDefinition>,
    index: HashMap<String, usize>,
}

impl FoodTable {
    /// Build a table. Later duplicates of a name replace earlier ones in place.
    pub fn new(foods: Vec<FoodDefinition>) -> Self {
        let mut table = Self::default();
        for food in foods {
            table.insert(food);
        }
        table
    }

    fn insert(&mut self, food: FoodDefinition) {
        match self.index.get(&food.name) {
            Some(&i) => self.foods[i] = food,
            None => {
                self.index.insert(food.name.clone(), self.foods.len());
                self.foods.push(food);
            }
        }
    }

    /// Exact lookup by name.
    pub fn get(&self, name: &str) -> Option<&FoodDefinition> {
        self.index.get(name).map(|&i| &self.foods[i])
    }

    /// Exact lookup that reports a missing food as an error.
    pub fn require(&self, name: &str) -> Result<&FoodDefinition> {
        self.get(name)
            .ok_or_else(|| TrackerError::UnknownFood(name.to_string()))
    }

    /// Lookup by user-typed name: exact first, then case-insensitive.
    pub fn resolve(&self, name: &str) -> Option<&FoodDefinition> {
        let name = name.trim();
        self.get(name).or_else(|| {
            let lower = name.to_lowercase();
            self.foods.iter().find(|f| f.name.to_lowercase() == lower)
        })
    }

    /// Foods whose name contains `query` (case-insensitive), in table order.
    pub fn search(&self, query: &str) -> Vec<&FoodDefinition> {
        let query = query.trim().to_lowercase();
        self.foods
            .iter()
            .filter(|f| query.is_empty() || f.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Fuzzy suggestions for a query, best match first.
    pub fn suggest(&self, query: &str) -> Vec<&FoodDefinition> {
        let query = query.trim().to_lowercase();
        let mut candidates: Vec<(&FoodDefinition, f64)> = self
            .foods
            .iter()
            .map(|f| (f, jaro_winkler(&f.name.to_lowercase(), &query)))
            .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
            .collect();

        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        candidates.into_iter().map(|(f, _)| f).collect()
    }

    /// Every nutrient kind declared by any food in the table.
    pub fn nutrient_kinds(&self) -> BTreeSet<NutrientKind> {
        self.foods
            .iter()
            .flat_map(|f| f.nutrients.keys().cloned())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FoodDefinition> {
        self.foods.iter()
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> FoodTable {
        let mut egg = NutrientMap::new();
        egg.insert(NutrientKind::Protein, 13.0);
        egg.insert(NutrientKind::Fat, 11.0);

        FoodTable::new(vec![
            FoodDefinition::protein_only("Chicken Breast", 31.0),
            FoodDefinition::new("Egg", egg),
            FoodDefinition::protein_only("Greek Yogurt", 10.0),
        ])
    }

    #[test]
    fn test_nutrient_kind_aliases() {
        assert_eq!(NutrientKind::from("proteins"), NutrientKind::Protein);
        assert_eq!(NutrientKind::from("Carbohydrates"), NutrientKind::Carbohydrate);
        assert_eq!(NutrientKind::from("fats"), NutrientKind::Fat);
        assert_eq!(
            NutrientKind::from("kcal"),
            NutrientKind::Other("kcal".to_string())
        );
    }

    #[test]
    fn test_resolve_case_insensitive() {
        let table = sample_table();
        assert_eq!(table.resolve("egg").unwrap().name, "Egg");
        assert_eq!(table.resolve(" CHICKEN BREAST ").unwrap().name, "Chicken Breast");
        assert!(table.resolve("tofu").is_none());
        assert!(table.get("egg").is_none());
    }

    #[test]
    fn test_search_keeps_table_order() {
        let table = sample_table();
        let names: Vec<&str> = table.search("e").iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Chicken Breast", "Egg", "Greek Yogurt"]);
        assert_eq!(table.search("").len(), 3);
        assert!(table.search("tofu").is_empty());
    }

    #[test]
    fn test_suggest_fuzzy() {
        let table = sample_table();
        let suggestions = table.suggest("chiken brest");
        assert_eq!(suggestions[0].name, "Chicken Breast");
    }

    #[test]
    fn test_nutrient_kinds_union() {
        let table = sample_table();
        let kinds = table.nutrient_kinds();
        assert!(kinds.contains(&NutrientKind::Protein));
        assert!(kinds.contains(&NutrientKind::Fat));
        assert_eq!(kinds.len(), 2);
    }

    #[test]
    fn test_duplicate_name_replaces_in_place() {
        let table = FoodTable::new(vec![
            FoodDefinition::protein_only("Tofu", 8.0),
            FoodDefinition::protein_only("Egg", 13.0),
            FoodDefinition::protein_only("Tofu", 12.0),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.iter().next().unwrap().protein(), 12.0);
    }

    #[test]
    fn test_with_reference_rejects_non_positive() {
        let food = FoodDefinition::protein_only("Milk", 3.4).with_reference(0.0, "ml");
        assert_eq!(food.reference_amount, DEFAULT_REFERENCE_AMOUNT);
        assert_eq!(food.unit, "ml");
    }
}
