use serde::Serialize;

/// Whether accumulated protein meets the daily requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntakeStatus {
    Below,
    Met,
}

impl IntakeStatus {
    pub fn is_met(self) -> bool {
        self == IntakeStatus::Met
    }
}

/// Classify intake against the requirement.
///
/// A zero or unset requirement is never met.
pub fn status(total_protein: f64, required_protein: f64) -> IntakeStatus {
    if required_protein > 0.0 && total_protein >= required_protein {
        IntakeStatus::Met
    } else {
        IntakeStatus::Below
    }
}

/// Protein still to eat today, never negative.
pub fn remaining(total_protein: f64, required_protein: f64) -> f64 {
    (required_protein - total_protein).max(0.0)
}
