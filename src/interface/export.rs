use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::engine::calculations::round2;
use crate::engine::status::IntakeStatus;
use crate::error::Result;
use crate::models::{NutrientKind, NutrientMap};
use crate::state::{KeyValueStore, Session};

/// One food line of an intake log.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub food: String,
    pub amount: f64,
    pub protein: f64,
}

/// The latest intake, as written to disk.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeLog {
    pub target: f64,
    pub entries: Vec<LogEntry>,
    pub total_protein: f64,
    pub remaining_protein: f64,
    pub status: IntakeStatus,
    pub totals: NutrientMap,
}

impl IntakeLog {
    /// Capture the session's current intake. Values are rounded to 2 decimals.
    pub fn from_session<S: KeyValueStore>(session: &Session<S>) -> Self {
        let summary = session.summary();
        let entries = session
            .contributions()
            .into_iter()
            .map(|(entry, contribution)| LogEntry {
                food: entry.food_name.clone(),
                amount: entry.consumed_amount,
                protein: round2(
                    contribution
                        .get(&NutrientKind::Protein)
                        .copied()
                        .unwrap_or(0.0),
                ),
            })
            .collect();

        Self {
            target: round2(summary.required_protein),
            entries,
            total_protein: round2(summary.protein_total),
            remaining_protein: round2(summary.remaining_protein),
            status: summary.status,
            totals: summary
                .totals
                .into_iter()
                .map(|(kind, value)| (kind, round2(value)))
                .collect(),
        }
    }
}

/// Write the log as pretty JSON, replacing any previous log.
pub fn write_log_json(log: &IntakeLog, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(log)?.as_bytes())?;
    Ok(())
}

/// Write the log entries as CSV.
pub fn write_log_csv(log: &IntakeLog, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["food", "amount", "protein"])?;
    for entry in &log.entries {
        wtr.write_record([
            entry.food.clone(),
            format!("{:.2}", entry.amount),
            format!("{:.2}", entry.protein),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
