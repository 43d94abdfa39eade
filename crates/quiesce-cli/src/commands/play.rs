use std::path::Path;

use quiesce_core::{play, Event, PlaybackEntry, Scenario};

use crate::commands::config::Profile;

pub fn run(file: &Path, json: bool, config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(file)?;
    let mut scenario = Scenario::from_json(&content)?;

    // A profile only supplies emitter defaults; an explicit emitter section
    // in the scenario wins.
    if scenario.emitter.is_none() {
        if let Some(path) = config {
            scenario.emitter = Some(Profile::load(path)?.emitter);
        }
    }

    let log = play(&scenario)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&log)?);
    } else {
        if !scenario.name.is_empty() {
            println!("# {}", scenario.name);
        }
        for entry in &log {
            println!("{}", describe(entry));
        }
        println!("{} events", log.len());
    }
    Ok(())
}

fn describe(entry: &PlaybackEntry) -> String {
    match &entry.event {
        Event::SearchCommitted { value, .. } => {
            format!("[{:>6}ms] search committed: {value:?}", entry.at_ms)
        }
        Event::SearchCleared { .. } => format!("[{:>6}ms] search cleared", entry.at_ms),
        Event::ItemDismissed { id, .. } => {
            format!("[{:>6}ms] item dismissed: {id}", entry.at_ms)
        }
        Event::EmitterSnapshot { value, .. } => {
            format!("[{:>6}ms] emitter snapshot: {value:?}", entry.at_ms)
        }
        Event::DismissalSnapshot { scheduled, .. } => {
            format!("[{:>6}ms] dismissal snapshot: {scheduled} scheduled", entry.at_ms)
        }
    }
}
