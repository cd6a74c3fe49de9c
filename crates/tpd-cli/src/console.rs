//! Console confirmation gate
//!
//! Lists each category on stderr so stdout stays free for the report, then
//! asks with dialoguer whether to continue.

use colored::Colorize;
use dialoguer::Confirm;
use tpd_core::{Category, ConfirmationGate, Decision, PlanEntry};

/// Colored listing plus a yes/no prompt per category.
#[derive(Debug, Default)]
pub struct ConsoleGate;

impl ConsoleGate {
    pub fn new() -> Self {
        Self
    }
}

fn headline(category: Category) -> colored::ColoredString {
    let label = category.as_str().to_uppercase();
    match category {
        Category::Reject => label.red().bold(),
        Category::Delete => label.yellow().bold(),
        Category::Update => label.cyan().bold(),
        Category::Create => label.green().bold(),
        Category::Ignore => label.dimmed(),
    }
}

impl ConfirmationGate for ConsoleGate {
    fn present(&mut self, category: Category, summary: &str, entries: &[PlanEntry]) {
        eprintln!();
        eprintln!("{}", headline(category));
        for entry in entries {
            let destination = entry.destination.display().to_string();
            match &entry.message {
                Some(message) => eprintln!("   {} {}", destination.bright_blue(), message.dimmed()),
                None => eprintln!("   {}", destination.bright_blue()),
            }
        }
        eprintln!("{}", summary.red());
    }

    fn acknowledge(&mut self, category: Category) -> tpd_core::Result<Decision> {
        let answer = Confirm::new()
            .with_prompt(format!("Continue past {category}?"))
            .default(true)
            .interact_opt()
            .map_err(tpd_core::Error::gate)?;

        Ok(match answer {
            Some(true) => Decision::Proceed,
            Some(false) | None => Decision::Cancel,
        })
    }
}
