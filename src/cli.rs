use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::engine::SummationMode;
use crate::state::{DefaultAmountPolicy, SessionOptions};

/// Protein tracker — compare the foods you ate against a weight-based daily requirement.
#[derive(Parser, Debug)]
#[command(name = "protein_tracker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory holding activity-level-config.json and protein-config.json.
    #[arg(short, long, default_value = ".")]
    pub config_dir: PathBuf,

    /// Path to the saved session state.
    #[arg(short, long, default_value = "protein_state.json")]
    pub state: PathBuf,

    /// Fixed amount given to newly selected foods (default 100).
    /// Conflicts with --food-default-amount.
    #[arg(long, conflicts_with = "food_default_amount")]
    pub default_amount: Option<f64>,

    /// Give newly selected foods their own reference amount.
    #[arg(long)]
    pub food_default_amount: bool,

    /// Sum full-precision contributions instead of rounding each first.
    #[arg(long)]
    pub full_precision: bool,
}

impl Cli {
    pub fn session_options(&self) -> SessionOptions {
        let default_amount = match (self.default_amount, self.food_default_amount) {
            (_, true) => DefaultAmountPolicy::FromFoodDefinition,
            (Some(amount), false) => DefaultAmountPolicy::Fixed(amount),
            (None, false) => DefaultAmountPolicy::default(),
        };
        let summation = if self.full_precision {
            SummationMode::FullPrecision
        } else {
            SummationMode::RoundThenSum
        };
        SessionOptions {
            default_amount,
            summation,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the requirement, selected foods, totals, and status.
    Status,

    /// List foods, optionally filtered by name.
    Foods {
        /// Case-insensitive substring to filter by.
        #[arg(long)]
        search: Option<String>,
    },

    /// List activity levels.
    Activities,

    /// Update weight and/or activity level.
    Profile {
        /// Body weight in kg.
        #[arg(long)]
        weight: Option<String>,

        /// Activity level key.
        #[arg(long)]
        activity: Option<String>,
    },

    /// Select a food, or deselect it if already selected.
    Toggle {
        /// Food name.
        food: String,
    },

    /// Deselect a food.
    Remove {
        /// Food name.
        food: String,
    },

    /// Set the consumed amount of a selected food.
    Amount {
        /// Food name.
        food: String,

        /// Consumed amount in the food's unit.
        value: String,
    },

    /// Write the current intake log.
    Export {
        /// JSON output path.
        #[arg(long, default_value = "log.json")]
        json: PathBuf,

        /// Optional CSV output path for the entries.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Menu-driven session.
    Interactive,
}

impl Default for Command {
    fn default() -> Self {
        Command::Status
    }
}
