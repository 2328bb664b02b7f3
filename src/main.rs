mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Environment variable for log filtering
const LOG_ENV: &str = "VAULT_ORGANIZER_LOG";

#[derive(Parser)]
#[command(name = "vault-organizer")]
#[command(about = "File Obsidian notes into folders by tags and frontmatter rules", long_about = None)]
#[command(version)]
struct Cli {
    /// Vault root (default: $VAULT_ORGANIZER_PATH or current directory)
    #[arg(long, global = true)]
    vault: Option<PathBuf>,

    /// Debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match notes against the rules and move them (dry-run by default)
    Organize {
        /// Notes to organize (default: every note in the vault)
        notes: Vec<String>,
        #[arg(long, help = "Actually move notes (default: dry-run)")]
        execute: bool,
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// Show the tags found in a note and the rule it matches
    Tags {
        note: String,
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// Manage filing rules
    Rules {
        #[command(subcommand)]
        action: Option<RulesAction>,
    },
    /// Create the config file
    Init {
        #[arg(long, help = "Enable automatic scan mode")]
        auto: bool,
        #[arg(long, help = "Overwrite an existing config with defaults")]
        force: bool,
    },
    /// Organize notes as they are saved (requires scanMode: auto)
    #[cfg(feature = "watch")]
    Watch,
}

#[derive(Subcommand)]
enum RulesAction {
    /// List rules in priority order (default)
    List {
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// Add a rule
    Add {
        #[arg(long, default_value = "", help = "Path prefix to scan (default: whole vault)")]
        scan: String,
        #[arg(long, help = "Destination folder")]
        dest: String,
        #[arg(long = "attr", help = "Attribute condition name=pattern (repeatable)")]
        attrs: Vec<String>,
        #[arg(long, help = "Insert at this priority index (default: last)")]
        position: Option<usize>,
    },
    /// Remove the rule at an index
    Remove { index: usize },
    /// Check rules for errors
    Validate,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let vault = commands::resolve_vault(cli.vault)?;

    match cli.command {
        Commands::Organize {
            notes,
            execute,
            json,
        } => commands::organize::run(&vault, notes, execute, json),
        Commands::Tags { note, json } => commands::tags::run(&vault, &note, json),
        Commands::Rules { action } => match action {
            None => commands::rules::run_list(&vault, false),
            Some(RulesAction::List { json }) => commands::rules::run_list(&vault, json),
            Some(RulesAction::Add {
                scan,
                dest,
                attrs,
                position,
            }) => commands::rules::run_add(&vault, scan, dest, attrs, position),
            Some(RulesAction::Remove { index }) => commands::rules::run_remove(&vault, index),
            Some(RulesAction::Validate) => commands::rules::run_validate(&vault),
        },
        Commands::Init { auto, force } => commands::init::run(&vault, auto, force),
        #[cfg(feature = "watch")]
        Commands::Watch => commands::watch::run(&vault),
    }
}
