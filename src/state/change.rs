/// What a mutation touched, so the presentation can choose between patching
/// a single row and redrawing everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// A food entered the selection.
    Selected(String),
    /// A food left the selection.
    Deselected(String),
    /// The consumed amount of a selected food was edited.
    AmountChanged(String),
    /// Weight or activity changed; the requirement must be redrawn.
    ProfileChanged,
}

impl Change {
    /// True when the set of selected rows changed.
    pub fn changes_membership(&self) -> bool {
        matches!(self, Change::Selected(_) | Change::Deselected(_))
    }
}
