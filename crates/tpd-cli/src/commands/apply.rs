//! Apply command implementation

use std::path::{Path, PathBuf};

use colored::Colorize;
use tpd_core::{Failure, Outcome, Reconciler, Report};

use crate::cli::Target;
use crate::commands::{load_intents, resolve_config};
use crate::console::ConsoleGate;
use crate::error::{CliError, Result};

/// Run the apply command
///
/// Fails after printing the report when any destination could not be
/// changed, and without applying anything when the operator cancels.
pub fn run_apply(target: &Target, yes: bool, json: bool) -> Result<()> {
    let intents = load_intents(&target.intents)?;
    let mut config = resolve_config(target)?;
    if yes {
        config.interactive = false;
    }

    let mut reconciler = Reconciler::new(config, Box::new(ConsoleGate::new()))?;

    if !json {
        println!(
            "{} Reconciling {}...",
            "=>".blue().bold(),
            reconciler.root().display().to_string().cyan()
        );
    }

    let report = match reconciler.reconcile(&intents)? {
        Outcome::Completed(report) => report,
        Outcome::Cancelled { category } => {
            return Err(CliError::user(format!(
                "Cancelled at {category} confirmation; nothing was changed"
            )));
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::user(format!(
            "{} operation(s) failed",
            report.failure_count()
        )))
    }
}

fn print_paths(marker: colored::ColoredString, label: &str, paths: &[PathBuf]) {
    for path in paths {
        println!("   {} {} {}", marker, label, display(path).cyan());
    }
}

fn print_failures(label: &str, failures: &[Failure]) {
    for failure in failures {
        println!(
            "   {} {} {}: {}",
            "x".red(),
            label,
            display(&failure.destination).cyan(),
            failure.message
        );
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

fn print_report(report: &Report) {
    print_paths("+".green(), "created", &report.created);
    print_paths("~".blue(), "updated", &report.updated);
    print_paths("-".yellow(), "deleted", &report.deleted);
    print_paths("!".red(), "rejected", &report.rejected);
    print_failures("create", &report.failed_to_create);
    print_failures("update", &report.failed_to_update);
    print_failures("delete", &report.failed_to_delete);

    for invalid in &report.invalid {
        println!(
            "   {} invalid intent #{}: {}",
            "?".yellow(),
            invalid.index,
            invalid.describe()
        );
    }

    println!();
    let changed = report.created.len() + report.updated.len() + report.deleted.len();
    if report.is_success() {
        println!("{} {} file(s) changed.", "OK".green().bold(), changed);
    } else {
        println!(
            "{} {} file(s) changed, {} failed.",
            "FAILED".red().bold(),
            changed,
            report.failure_count()
        );
    }
}
