use serde::Deserialize;
use serde_json::Value;

use crate::config::source::DocumentSource;
use crate::config::parse_number;
use crate::engine::constants::ACTIVITY_CONFIG_FILE;
use crate::error::{Result, TrackerError};
use crate::models::{ActivityLevel, ActivityTable};

/// One entry of the activity document as written by hand.
#[derive(Debug, Deserialize)]
struct RawActivityLevel {
    value: Value,
    label: String,
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    desc: Option<String>,
}

impl RawActivityLevel {
    fn into_level(self) -> Option<ActivityLevel> {
        let multiplier = parse_number(&self.value).filter(|m| *m > 0.0)?;
        let key = match self.key {
            Some(key) if !key.trim().is_empty() => key.trim().to_string(),
            _ => ActivityLevel::key_from_label(&self.label),
        };
        let description = self.description.or(self.desc).unwrap_or_default();
        Some(ActivityLevel {
            key,
            label: self.label,
            multiplier,
            description,
        })
    }
}

/// Parse the activity document.
///
/// Entries without a positive multiplier are skipped. A document that
/// yields no usable level is an error.
pub fn parse_activity_levels(json: &str) -> Result<ActivityTable> {
    let raw: Vec<RawActivityLevel> = serde_json::from_str(json)?;
    let levels: Vec<ActivityLevel> = raw
        .into_iter()
        .filter_map(|r| {
            let label = r.label.clone();
            let level = r.into_level();
            if level.is_none() {
                tracing::warn!("Skipping activity level '{}' without a usable multiplier", label);
            }
            level
        })
        .collect();

    if levels.is_empty() {
        return Err(TrackerError::ConfigLoad {
            name: ACTIVITY_CONFIG_FILE.to_string(),
            reason: "no usable activity levels".to_string(),
        });
    }

    Ok(ActivityTable::new(levels))
}

/// Load the activity table, substituting the built-in levels on any failure.
pub fn load_activity_levels<D: DocumentSource + ?Sized>(source: &D) -> ActivityTable {
    match source
        .fetch(ACTIVITY_CONFIG_FILE)
        .and_then(|json| parse_activity_levels(&json))
    {
        Ok(table) => {
            tracing::info!("Loaded {} activity levels", table.len());
            table
        }
        Err(e) => {
            tracing::warn!("{}; using built-in activity levels", e);
            ActivityTable::default()
        }
    }
}
