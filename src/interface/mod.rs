pub mod export;
pub mod prompts;
pub mod render;

pub use export::{write_log_csv, write_log_json, IntakeLog, LogEntry};
pub use prompts::{
    prompt_activity, prompt_amount, prompt_food_name, prompt_toggle_food, prompt_weight,
    run_interactive,
};
pub use render::{
    display_activity_levels, display_food_list, display_summary, format_grams, format_per_day,
};
