//! Config initialization

use std::path::Path;

use anyhow::{Context, Result};
use colored::*;

use vault_organizer::{Config, ScanMode};

pub fn run(vault: &Path, auto: bool, force: bool) -> Result<()> {
    let config_path = Config::path(vault);

    println!("{}", "Vault Organizer Configuration".bold());
    println!("{}", "=".repeat(50));
    println!();

    let existed = config_path.exists();
    let mut config = if existed && !force {
        println!("{} Loading existing config...", "→".blue());
        Config::load(vault).context("Failed to load organizer config")?
    } else {
        Config::default()
    };

    if auto {
        config.scan_mode = ScanMode::Auto;
    }

    config.save(vault).context("Failed to save organizer config")?;

    if existed {
        println!("{} Updated {}", "✓".green(), config_path.display());
    } else {
        println!("{} Created {}", "✓".green(), config_path.display());
    }

    println!();
    println!("{}", "Configuration:".cyan());
    println!("  scanMode: {:?}", config.scan_mode);
    println!("  rules: {}", config.rules.len());
    println!();
    println!(
        "{}",
        "Add rules with `vault-organizer rules add --dest <folder> [--scan <prefix>] [--attr name=pattern]`."
            .dimmed()
    );
    println!();

    Ok(())
}
