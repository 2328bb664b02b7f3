//! Automatic scan mode: organize the vault on startup, then every note
//! as soon as it is saved.

use std::path::Path;
use std::sync::mpsc;

use anyhow::{bail, Context, Result};
use colored::*;
use notify::{Event, EventKind, RecursiveMode, Watcher};

use vault_organizer::core::vault::{collect_note_paths, is_note_path, relative_to_string};
use vault_organizer::{organize, organize_all, Config, FsStore, ScanMode};

pub fn run(vault: &Path) -> Result<()> {
    let vault = vault
        .canonicalize()
        .with_context(|| format!("Vault not found: {}", vault.display()))?;
    let config_path = Config::path(&vault);
    let mut config = Config::load(&vault).context("Failed to load organizer config")?;

    if config.scan_mode != ScanMode::Auto {
        bail!(
            "Scan mode is manual. Set \"scanMode\": \"auto\" in {} or run `vault-organizer init --auto`.",
            config_path.display()
        );
    }

    let store = FsStore::new(&vault);
    let report = organize_all(collect_note_paths(&vault), &store, &config.rules);
    let summary = report.summary();
    println!(
        "{} Startup scan: {} relocated, {} failed",
        "✓".green(),
        summary.relocated,
        summary.failed
    );
    for failure in &report.failures {
        println!("  {} {}", "[FAILED]".red(), failure);
    }

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to start file watcher")?;
    watcher
        .watch(&vault, RecursiveMode::Recursive)
        .context("Failed to watch vault")?;

    println!("{} Watching {} (Ctrl-C to stop)", "→".blue(), vault.display());

    for res in rx {
        let event = match res {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("Watch error: {}", e);
                continue;
            }
        };

        if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
            continue;
        }

        for path in &event.paths {
            if path == &config_path {
                match Config::load(&vault) {
                    Ok(reloaded) => {
                        tracing::info!("Config reloaded: {} rules", reloaded.rules.len());
                        config = reloaded;
                    }
                    Err(e) => tracing::warn!("Keeping previous config: {}", e),
                }
                continue;
            }

            let Ok(relative) = path.strip_prefix(&vault) else {
                continue;
            };
            if !is_note_path(relative) || !path.is_file() {
                continue;
            }

            let note_path = relative_to_string(relative);
            match organize(&note_path, &store, &config.rules) {
                Ok(outcome) => {
                    if let Some(new_path) = outcome.new_path.filter(|p| p != &note_path) {
                        println!("  {} {} → {}", "[MOVED]".green(), note_path, new_path.cyan());
                    }
                }
                Err(e) => println!("  {} {}", "[FAILED]".red(), e),
            }
        }
    }

    Ok(())
}
