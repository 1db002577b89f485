use crate::engine::constants::DEFAULT_ACTIVITY_LEVELS;

/// An activity level and its protein multiplier (g per kg body weight).
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityLevel {
    pub key: String,
    pub label: String,
    pub multiplier: f64,
    pub description: String,
}

impl ActivityLevel {
    pub fn new(key: &str, label: &str, multiplier: f64, description: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            multiplier,
            description: description.to_string(),
        }
    }

    /// Key derived from a label: lowercase, ASCII alphanumerics only.
    pub fn key_from_label(label: &str) -> String {
        label
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            .collect()
    }
}

/// The loaded set of activity levels, in configuration order.
#[derive(Debug, Clone)]
pub struct ActivityTable {
    levels: Vec<ActivityLevel>,
}

impl ActivityTable {
    /// Build a table, keeping the first level for any repeated key.
    pub fn new(levels: Vec<ActivityLevel>) -> Self {
        let mut kept: Vec<ActivityLevel> = Vec::with_capacity(levels.len());
        for level in levels {
            if kept.iter().any(|l| l.key == level.key) {
                tracing::warn!("Duplicate activity key '{}' ignored", level.key);
                continue;
            }
            kept.push(level);
        }
        Self { levels: kept }
    }

    pub fn get(&self, key: &str) -> Option<&ActivityLevel> {
        self.levels.iter().find(|l| l.key == key)
    }

    /// Resolve a stored selection: by key, or by a multiplier string as
    /// written by older sessions.
    pub fn resolve(&self, stored: &str) -> Option<&ActivityLevel> {
        let stored = stored.trim();
        self.get(stored).or_else(|| {
            let value: f64 = stored.parse().ok()?;
            self.levels.iter().find(|l| l.multiplier == value)
        })
    }

    /// Multiplier for a key, if the key is loaded.
    pub fn multiplier_for(&self, key: &str) -> Option<f64> {
        self.get(key).map(|l| l.multiplier)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActivityLevel> {
        self.levels.iter()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl Default for ActivityTable {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVITY_LEVELS.clone())
    }
}
