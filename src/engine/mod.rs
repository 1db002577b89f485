pub mod calculations;
pub mod constants;
pub mod status;

pub use calculations::{
    aggregate, contribution, contribution_of, required_daily_protein, round2, SummationMode,
};
pub use constants::*;
pub use status::{remaining, status, IntakeStatus};
