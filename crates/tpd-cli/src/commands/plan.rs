//! Plan command implementation

use colored::Colorize;
use serde_json::json;
use tpd_core::{Category, Reconciler, SilentGate};

use crate::cli::Target;
use crate::commands::{load_intents, resolve_config};
use crate::error::Result;

/// Run the plan command
///
/// Validates and classifies only. Nothing is confirmed or written.
pub fn run_plan(target: &Target, json: bool) -> Result<()> {
    let intents = load_intents(&target.intents)?;
    let config = resolve_config(target)?.with_interactive(false);
    let reconciler = Reconciler::new(config, Box::new(SilentGate))?;

    let planned = reconciler.plan(&intents);

    if json {
        let document = json!({
            "root": reconciler.root(),
            "plan": planned.plan,
            "invalid": planned.invalid,
        });
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    println!(
        "{} Plan for {}",
        "=>".blue().bold(),
        reconciler.root().display().to_string().cyan()
    );

    if planned.plan.is_empty() && planned.invalid.is_empty() {
        println!("{} Nothing to do.", "OK".green().bold());
        return Ok(());
    }

    for (category, entries) in planned.plan.iter() {
        if entries.is_empty() {
            continue;
        }
        println!();
        println!("{} ({})", category.as_str().to_uppercase().bold(), entries.len());
        for entry in entries {
            let destination = entry.destination.display().to_string();
            match &entry.message {
                Some(message) => println!("   {} {}", destination.cyan(), message.dimmed()),
                None => println!("   {}", destination.cyan()),
            }
        }
        if category == Category::Reject {
            println!("   {}", category.summary().red());
        }
    }

    if !planned.invalid.is_empty() {
        println!();
        println!("{} ({})", "INVALID".yellow().bold(), planned.invalid.len());
        for invalid in &planned.invalid {
            println!("   #{}: {}", invalid.index, invalid.describe());
        }
    }

    Ok(())
}
