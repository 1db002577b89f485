use clap::Parser;
use tracing_subscriber::EnvFilter;

use protein_tracker_rs::cli::{Cli, Command};
use protein_tracker_rs::config::{DirSource, LoadedConfig};
use protein_tracker_rs::error::{Result, TrackerError};
use protein_tracker_rs::interface::{
    display_activity_levels, display_food_list, display_summary, format_per_day,
    prompt_food_name, run_interactive, write_log_csv, write_log_json, IntakeLog,
};
use protein_tracker_rs::state::{Change, JsonFileStore, Session};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("protein_tracker_rs=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let options = cli.session_options();

    let config = LoadedConfig::load(&DirSource::new(&cli.config_dir));
    let store = JsonFileStore::open(&cli.state);
    let mut session = Session::start(config, store, options);

    match cli.command.unwrap_or_default() {
        Command::Status => display_summary(&session),
        Command::Foods { search } => cmd_foods(&session, search.as_deref().unwrap_or("")),
        Command::Activities => {
            display_activity_levels(session.activities(), &session.profile().activity_key)
        }
        Command::Profile { weight, activity } => {
            cmd_profile(&mut session, weight.as_deref(), activity.as_deref())?
        }
        Command::Toggle { food } => cmd_toggle(&mut session, &food)?,
        Command::Remove { food } => cmd_remove(&mut session, &food)?,
        Command::Amount { food, value } => cmd_amount(&mut session, &food, &value)?,
        Command::Export { json, csv } => {
            let log = IntakeLog::from_session(&session);
            write_log_json(&log, &json)?;
            println!("Saved to {}", json.display());
            if let Some(csv) = csv {
                write_log_csv(&log, &csv)?;
                println!("Saved to {}", csv.display());
            }
        }
        Command::Interactive => run_interactive(&mut session)?,
    }

    Ok(())
}

/// List foods matching a query, falling back to fuzzy suggestions.
fn cmd_foods(session: &Session<JsonFileStore>, query: &str) {
    if session.foods().is_empty() {
        println!("No foods loaded. Check protein-config.json in the config directory.");
        return;
    }

    let matches = session.search_foods(query);
    if !matches.is_empty() {
        display_food_list(&matches, "Foods");
        return;
    }

    let suggestions: Vec<_> = session
        .foods()
        .suggest(query)
        .into_iter()
        .map(|f| (f, session.is_selected(&f.name)))
        .collect();
    display_food_list(&suggestions, "Did you mean");
}

/// Update weight and activity; prints the new requirement.
fn cmd_profile(
    session: &mut Session<JsonFileStore>,
    weight: Option<&str>,
    activity: Option<&str>,
) -> Result<()> {
    if weight.is_none() && activity.is_none() {
        println!("Please specify --weight and/or --activity.");
        display_activity_levels(session.activities(), &session.profile().activity_key);
        return Ok(());
    }

    if let Some(weight) = weight {
        session.set_weight_input(weight);
    }
    if let Some(activity) = activity {
        session.set_activity(activity)?;
    }

    println!("Required: {}", format_per_day(session.required_protein()));
    Ok(())
}

/// Resolve a typed name to a food in the table or the current selection.
fn resolve_name(session: &Session<JsonFileStore>, input: &str) -> Result<String> {
    if session.is_selected(input) {
        return Ok(input.to_string());
    }
    prompt_food_name(session.foods(), input)?
        .ok_or_else(|| TrackerError::UnknownFood(input.to_string()))
}

fn cmd_toggle(session: &mut Session<JsonFileStore>, input: &str) -> Result<()> {
    let name = resolve_name(session, input)?;
    match session.toggle_food(&name)? {
        Change::Selected(name) => println!("Selected: {}", name),
        Change::Deselected(name) => println!("Deselected: {}", name),
        _ => {}
    }
    display_summary(session);
    Ok(())
}

fn cmd_remove(session: &mut Session<JsonFileStore>, input: &str) -> Result<()> {
    let name = resolve_name(session, input)?;
    match session.deselect_food(&name) {
        Some(_) => {
            println!("Deselected: {}", name);
            display_summary(session);
            Ok(())
        }
        None => Err(TrackerError::NotSelected(name)),
    }
}

fn cmd_amount(session: &mut Session<JsonFileStore>, input: &str, value: &str) -> Result<()> {
    let name = resolve_name(session, input)?;
    session.set_amount_input(&name, value)?;
    display_summary(session);
    Ok(())
}
