use crate::config::LoadedConfig;
use crate::engine::calculations::{self, round2, SummationMode};
use crate::engine::constants::FALLBACK_MULTIPLIER;
use crate::engine::status::{self, IntakeStatus};
use crate::error::{Result, TrackerError};
use crate::models::{
    clamp_amount, sanitize_weight, ActivityLevel, ActivityTable, FoodDefinition, FoodTable,
    NutrientKind, NutrientMap, ProfileState, SelectionEntry,
};
use crate::state::manager::{DefaultAmountPolicy, SelectionManager};
use crate::state::persistence::{load_snapshot, save_snapshot, KeyValueStore};
use crate::state::Change;

/// Policies the caller injects into a session.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub default_amount: DefaultAmountPolicy,
    pub summation: SummationMode,
}

/// Everything the presentation needs to draw the summary.
#[derive(Debug, Clone)]
pub struct IntakeSummary {
    pub required_protein: f64,
    pub totals: NutrientMap,
    pub protein_total: f64,
    pub remaining_protein: f64,
    pub status: IntakeStatus,
}

/// One user's session: configuration tables, profile, selection, and the
/// store the snapshot is written to after every mutation.
pub struct Session<S: KeyValueStore> {
    activities: ActivityTable,
    foods: FoodTable,
    profile: ProfileState,
    selections: SelectionManager,
    summation: SummationMode,
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    /// Start a session, restoring the last snapshot from `store`.
    pub fn start(config: LoadedConfig, store: S, options: SessionOptions) -> Self {
        let snapshot = load_snapshot(&store);
        let mut profile = snapshot.profile;

        match config.activities.resolve(&profile.activity_key) {
            Some(level) => profile.activity_key = level.key.clone(),
            None => tracing::warn!(
                "Stored activity '{}' is not configured; using multiplier {}",
                profile.activity_key,
                FALLBACK_MULTIPLIER
            ),
        }

        let mut selections = SelectionManager::new(options.default_amount);
        selections.restore(snapshot.selections);
        for name in selections.unknown_foods(&config.foods) {
            tracing::warn!("Restored selection '{}' is not in the food table", name);
        }

        Self {
            activities: config.activities,
            foods: config.foods,
            profile,
            selections,
            summation: options.summation,
            store,
        }
    }

    fn persist(&mut self) {
        if let Err(e) = save_snapshot(
            &mut self.store,
            &self.profile,
            self.selections.current_selections(),
        ) {
            tracing::warn!("Failed to save session: {}", e);
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Set body weight; unusable values become the default weight.
    pub fn set_weight(&mut self, weight: f64) -> Change {
        self.profile.weight = sanitize_weight(weight);
        self.persist();
        Change::ProfileChanged
    }

    /// Set body weight from text input.
    pub fn set_weight_input(&mut self, input: &str) -> Change {
        self.set_weight(input.trim().parse().unwrap_or(f64::NAN))
    }

    /// Choose an activity level by key.
    pub fn set_activity(&mut self, key: &str) -> Result<Change> {
        let level = self
            .activities
            .resolve(key)
            .ok_or_else(|| TrackerError::UnknownActivity(key.to_string()))?;
        self.profile.activity_key = level.key.clone();
        self.persist();
        Ok(Change::ProfileChanged)
    }

    /// Select or deselect a food by name.
    pub fn toggle_food(&mut self, name: &str) -> Result<Change> {
        let change = self.selections.toggle_select(&self.foods, name)?;
        self.persist();
        Ok(change)
    }

    /// Deselect a food; `None` when it was not selected.
    pub fn deselect_food(&mut self, name: &str) -> Option<Change> {
        let change = self.selections.deselect(name)?;
        self.persist();
        Some(change)
    }

    /// Edit the consumed amount of a selected food.
    pub fn set_amount(&mut self, name: &str, amount: f64) -> Result<Change> {
        let change = self.selections.set_consumed_amount(name, amount)?;
        self.persist();
        Ok(change)
    }

    /// Edit the consumed amount from text input; non-numeric input is 0.
    pub fn set_amount_input(&mut self, name: &str, input: &str) -> Result<Change> {
        let amount = clamp_amount(input.trim().parse().unwrap_or(0.0));
        self.set_amount(name, amount)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────

    pub fn profile(&self) -> &ProfileState {
        &self.profile
    }

    pub fn activities(&self) -> &ActivityTable {
        &self.activities
    }

    pub fn foods(&self) -> &FoodTable {
        &self.foods
    }

    pub fn selections(&self) -> &[SelectionEntry] {
        self.selections.current_selections()
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selections.is_selected(name)
    }

    pub fn activity(&self) -> Option<&ActivityLevel> {
        self.activities.get(&self.profile.activity_key)
    }

    /// Multiplier of the current activity, or the fallback when unresolved.
    pub fn multiplier(&self) -> f64 {
        self.activities
            .multiplier_for(&self.profile.activity_key)
            .unwrap_or(FALLBACK_MULTIPLIER)
    }

    pub fn required_protein(&self) -> f64 {
        calculations::required_daily_protein(self.profile.weight, self.multiplier())
    }

    pub fn contributions(&self) -> Vec<(&SelectionEntry, NutrientMap)> {
        self.selections.contributions(&self.foods)
    }

    pub fn totals(&self) -> NutrientMap {
        self.selections.totals(&self.foods, self.summation)
    }

    pub fn protein_total(&self) -> f64 {
        self.totals()
            .get(&NutrientKind::Protein)
            .copied()
            .unwrap_or(0.0)
    }

    /// Met/below, judged on the values as displayed (2 decimals), so equal
    /// figures on screen always read as met.
    pub fn status(&self) -> IntakeStatus {
        status::status(round2(self.protein_total()), round2(self.required_protein()))
    }

    pub fn summary(&self) -> IntakeSummary {
        let totals = self.totals();
        let protein_total = totals.get(&NutrientKind::Protein).copied().unwrap_or(0.0);
        let required_protein = self.required_protein();
        let (shown_total, shown_required) = (round2(protein_total), round2(required_protein));
        IntakeSummary {
            required_protein,
            protein_total,
            remaining_protein: status::remaining(shown_total, shown_required),
            status: status::status(shown_total, shown_required),
            totals,
        }
    }

    /// Foods matching a search query, with their selection flag.
    pub fn search_foods(&self, query: &str) -> Vec<(&FoodDefinition, bool)> {
        self.foods
            .search(query)
            .into_iter()
            .map(|food| (food, self.is_selected(&food.name)))
            .collect()
    }

    /// Give back the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::constants::{ACTIVITY_KEY, SELECTIONS_KEY, WEIGHT_KEY};
    use crate::state::persistence::MemoryStore;

    fn sample_config() -> LoadedConfig {
        LoadedConfig {
            activities: ActivityTable::default(),
            foods: FoodTable::new(vec![
                FoodDefinition::protein_only("Chicken Breast", 31.0),
                FoodDefinition::protein_only("Egg", 13.0),
            ]),
        }
    }

    fn new_session() -> Session<MemoryStore> {
        Session::start(sample_config(), MemoryStore::new(), SessionOptions::default())
    }

    #[test]
    fn test_fresh_session_defaults() {
        let session = new_session();
        assert_eq!(session.profile().weight, 70.0);
        assert_eq!(session.profile().activity_key, "sedentary");
        assert!((session.required_protein() - 56.0).abs() < 1e-9);
        assert!(session.selections().is_empty());
        assert_eq!(session.status(), IntakeStatus::Below);
    }

    #[test]
    fn test_mutations_are_persisted() {
        let mut session = new_session();
        session.set_weight(80.0);
        session.set_activity("athlete").unwrap();
        session.toggle_food("Egg").unwrap();

        let store = session.into_store();
        assert_eq!(store.get(WEIGHT_KEY).unwrap().as_deref(), Some("80"));
        assert_eq!(store.get(ACTIVITY_KEY).unwrap().as_deref(), Some("athlete"));
        assert_eq!(
            store.get(SELECTIONS_KEY).unwrap().as_deref(),
            Some(r#"[{"name":"Egg","consumed":100.0}]"#)
        );
    }

    #[test]
    fn test_unknown_activity_rejected() {
        let mut session = new_session();
        let err = session.set_activity("couch").unwrap_err();
        assert!(matches!(err, TrackerError::UnknownActivity(_)));
        assert_eq!(session.profile().activity_key, "sedentary");
    }

    #[test]
    fn test_invalid_text_input_recovers() {
        let mut session = new_session();
        session.set_weight_input("abc");
        assert_eq!(session.profile().weight, 70.0);

        session.toggle_food("Egg").unwrap();
        session.set_amount_input("Egg", "-40").unwrap();
        assert_eq!(session.selections()[0].consumed_amount, 0.0);
        session.set_amount_input("Egg", "lots").unwrap();
        assert_eq!(session.selections()[0].consumed_amount, 0.0);
    }

    #[test]
    fn test_legacy_multiplier_activity_is_mapped() {
        let mut store = MemoryStore::new();
        store.set(ACTIVITY_KEY, "1.2").unwrap();
        let session = Session::start(sample_config(), store, SessionOptions::default());
        assert_eq!(session.profile().activity_key, "active");
    }

    #[test]
    fn test_unconfigured_activity_uses_fallback_multiplier() {
        let mut store = MemoryStore::new();
        store.set(ACTIVITY_KEY, "astronaut").unwrap();
        let session = Session::start(sample_config(), store, SessionOptions::default());
        assert_eq!(session.multiplier(), FALLBACK_MULTIPLIER);
        assert!(session.activity().is_none());
    }

    #[test]
    fn test_status_matches_displayed_values() {
        let config = LoadedConfig {
            activities: ActivityTable::default(),
            foods: FoodTable::new(vec![FoodDefinition::protein_only("Tofu Block", 83.33)]),
        };
        let mut session = Session::start(config, MemoryStore::new(), SessionOptions::default());
        session.set_weight(69.445);
        session.set_activity("active").unwrap();
        session.toggle_food("Tofu Block").unwrap();

        assert!(session.required_protein() > 83.33);
        assert_eq!(format!("{:.2}", session.required_protein()), "83.33");
        assert_eq!(format!("{:.2}", session.protein_total()), "83.33");
        assert_eq!(session.status(), IntakeStatus::Met);

        let summary = session.summary();
        assert_eq!(summary.status, IntakeStatus::Met);
        assert_eq!(summary.remaining_protein, 0.0);
    }

    #[test]
    fn test_search_marks_selected() {
        let mut session = new_session();
        session.toggle_food("Egg").unwrap();
        let results = session.search_foods("");
        assert_eq!(results.len(), 2);
        assert!(!results[0].1);
        assert!(results[1].1);
    }
}
