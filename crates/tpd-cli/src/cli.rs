//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// tpd - Reconcile a directory tree with rendered file intents
#[derive(Parser, Debug)]
#[command(name = "tpd")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Reconcile the root with an intents document
    ///
    /// Every non-empty category is listed and, unless --yes is given,
    /// confirmed before anything is written or deleted.
    ///
    /// Examples:
    ///   tpd apply intents.json
    ///   tpd apply intents.yaml --root site/ --yes
    Apply {
        #[command(flatten)]
        target: Target,

        /// Apply without asking for confirmation
        #[arg(short, long)]
        yes: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show what apply would do without touching anything
    Plan {
        #[command(flatten)]
        target: Target,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Where intents come from and where they land.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Intents document (.json, .yaml, .yml or .toml)
    pub intents: PathBuf,

    /// Directory intents resolve against
    #[arg(short, long, env = "TPD_ROOT")]
    pub root: Option<PathBuf>,

    /// Reconciler configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_apply_with_flags() {
        let cli = Cli::try_parse_from(["tpd", "-v", "apply", "in.json", "--root", "site", "--yes"]).unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Apply { target, yes, json } => {
                assert_eq!(target.intents, PathBuf::from("in.json"));
                assert_eq!(target.root, Some(PathBuf::from("site")));
                assert!(yes);
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn plan_has_no_yes_flag() {
        assert!(Cli::try_parse_from(["tpd", "plan", "in.json", "--yes"]).is_err());
    }

    #[test]
    fn intents_path_is_required() {
        assert!(Cli::try_parse_from(["tpd", "apply"]).is_err());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
