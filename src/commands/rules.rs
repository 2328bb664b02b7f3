//! Rule editing commands

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use colored::*;
use unicode_width::UnicodeWidthStr;

use vault_organizer::error::ConfigError;
use vault_organizer::{AttributeRule, Config, Rule};

pub fn run_list(vault: &Path, json: bool) -> Result<()> {
    let config = Config::load(vault).context("Failed to load organizer config")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config.rules)?);
        return Ok(());
    }

    println!("{}", "Organizer Rules".bold());
    println!("{}", "=".repeat(60));
    println!();

    if config.rules.is_empty() {
        println!("{}", "No rules configured.".dimmed());
        return Ok(());
    }

    let scopes: Vec<String> = config
        .rules
        .iter()
        .map(|r| {
            if r.scan_path.is_empty() {
                "(vault root)".to_string()
            } else {
                r.scan_path.clone()
            }
        })
        .collect();
    let width = scopes.iter().map(|s| s.width()).max().unwrap_or(0);

    for (index, (rule, scope)) in config.rules.iter().zip(&scopes).enumerate() {
        let padding = " ".repeat(width - scope.width());
        let conditions = if rule.attribute_rules.is_empty() {
            "all notes".dimmed().to_string()
        } else {
            rule.attribute_rules
                .iter()
                .map(|a| a.to_string())
                .collect::<Vec<_>>()
                .join(" AND ")
        };

        println!(
            "  {:>2}. {}{}  → {}  [{}]",
            index,
            scope,
            padding,
            rule.destination_path.cyan(),
            conditions
        );
    }

    println!();
    println!("{}", "Rules are evaluated top to bottom; the first match wins.".dimmed());

    Ok(())
}

pub fn run_add(
    vault: &Path,
    scan: String,
    dest: String,
    attrs: Vec<String>,
    position: Option<usize>,
) -> Result<()> {
    let mut config = Config::load(vault).context("Failed to load organizer config")?;

    let mut rule = Rule::new(scan, dest);
    for spec in &attrs {
        let attr = AttributeRule::parse(spec)
            .ok_or_else(|| anyhow!("Invalid attribute rule '{}', expected name=pattern", spec))?;
        rule.attribute_rules.push(attr);
    }

    let index = position.unwrap_or(config.rules.len()).min(config.rules.len());
    config.rules.insert(index, rule);
    config.save(vault).context("Failed to save organizer config")?;

    println!("{} Added rule #{}", "✓".green(), index);
    Ok(())
}

pub fn run_remove(vault: &Path, index: usize) -> Result<()> {
    let mut config = Config::load(vault).context("Failed to load organizer config")?;

    let Some(rule) = config.rules.remove(index) else {
        bail!(
            "No rule #{} (there are {} rules)",
            index,
            config.rules.len()
        );
    };
    config.save(vault).context("Failed to save organizer config")?;

    println!(
        "{} Removed rule #{} → {}",
        "✓".green(),
        index,
        rule.destination_path
    );
    Ok(())
}

pub fn run_validate(vault: &Path) -> Result<()> {
    match Config::load(vault) {
        Ok(config) => {
            println!(
                "{} {} rules, all valid",
                "✅".green(),
                config.rules.len()
            );
            Ok(())
        }
        Err(ConfigError::InvalidRules(violations)) => {
            println!("{}", "Invalid rules:".red().bold());
            for violation in &violations {
                println!("  • {}", violation);
            }
            std::process::exit(1);
        }
        Err(e) => Err(e).context("Failed to load organizer config"),
    }
}
