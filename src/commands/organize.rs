use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use colored::*;
use serde::Serialize;

use vault_organizer::core::vault::collect_note_paths;
use vault_organizer::error::OrganizeError;
use vault_organizer::tags::join_tags;
use vault_organizer::{
    organize_all, BatchReport, BatchSummary, Config, DryRunStore, FsStore, OrganizeOutcome,
};

use super::to_vault_relative;

#[derive(Serialize)]
struct OrganizeReport {
    timestamp: String,
    dry_run: bool,
    summary: BatchSummary,
    outcomes: Vec<OrganizeOutcome>,
    failures: Vec<FailureDetail>,
}

#[derive(Serialize)]
struct FailureDetail {
    note: String,
    rule: Option<usize>,
    destination: Option<String>,
    error: String,
}

impl From<&OrganizeError> for FailureDetail {
    fn from(err: &OrganizeError) -> Self {
        match err {
            OrganizeError::Read { note_path, source } => Self {
                note: note_path.clone(),
                rule: None,
                destination: None,
                error: source.to_string(),
            },
            OrganizeError::Relocation {
                note_path,
                rule_index,
                destination,
                source,
                ..
            } => Self {
                note: note_path.clone(),
                rule: Some(*rule_index),
                destination: Some(destination.clone()),
                error: source.to_string(),
            },
        }
    }
}

pub fn run(vault: &Path, notes: Vec<String>, execute: bool, json: bool) -> Result<()> {
    let config = Config::load(vault).context("Failed to load organizer config")?;

    if config.rules.is_empty() {
        if !json {
            println!("{}", "No rules configured.".yellow());
            println!("Add one with {}", "vault-organizer rules add --dest <folder>".cyan());
        }
        return Ok(());
    }

    let paths: Vec<String> = if notes.is_empty() {
        collect_note_paths(vault)
    } else {
        notes.iter().map(|n| to_vault_relative(vault, n)).collect()
    };

    let store = FsStore::new(vault);
    let report = if execute {
        organize_all(&paths, &store, &config.rules)
    } else {
        organize_all(&paths, &DryRunStore::new(&store), &config.rules)
    };

    let output = OrganizeReport {
        timestamp: report.started.to_rfc3339(),
        dry_run: !execute,
        summary: report.summary(),
        outcomes: report.outcomes.clone(),
        failures: report.failures.iter().map(FailureDetail::from).collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_report(&report, &output);
    }

    if !report.is_clean() {
        std::process::exit(1);
    }

    Ok(())
}

fn print_report(report: &BatchReport, output: &OrganizeReport) {
    println!("{}", "Vault Organizer".bold());
    println!("{}", "=".repeat(60));
    println!();

    if output.dry_run {
        println!("{}", "🔍 DRY RUN MODE - No notes moved".yellow().bold());
        println!();
    }

    let moved: Vec<_> = report
        .outcomes
        .iter()
        .filter(|o| o.relocated() && o.new_path.as_deref() != Some(o.note_path.as_str()))
        .collect();

    if moved.is_empty() && report.failures.is_empty() {
        println!("{}", "✅ Every note is already where it belongs.".green());
    }

    for outcome in &moved {
        let status = if output.dry_run {
            "[WOULD MOVE]".yellow()
        } else {
            "[MOVED]".green()
        };
        println!(
            "  {} {} → {}",
            status,
            outcome.note_path,
            outcome.new_path.as_deref().unwrap_or_default().cyan()
        );
        if !outcome.tags.is_empty() {
            println!("      {}", format!("tags: {}", join_tags(&outcome.tags)).dimmed());
        }
    }

    for failure in &output.failures {
        println!("  {} {}: {}", "[FAILED]".red(), failure.note, failure.error);
    }

    println!();
    println!("{}", "-".repeat(60));
    println!(
        "Relocated: {}  Unmatched: {}  Failed: {}",
        output.summary.relocated, output.summary.unmatched, output.summary.failed
    );
    println!("{}", format!("Finished at {}", Local::now().format("%H:%M:%S")).dimmed());

    if output.dry_run {
        println!("Run with {} to move notes.", "--execute".cyan());
    }
}
