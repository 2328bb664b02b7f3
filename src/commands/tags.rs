//! Found-tags report for a single note

use std::path::Path;

use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;

use vault_organizer::core::note::NoteSnapshot;
use vault_organizer::tags::join_tags;
use vault_organizer::{match_note, Config, FsStore, NoteStore, TagSet};

use super::to_vault_relative;

#[derive(Serialize)]
struct TagsReport {
    note: String,
    tags: TagSet,
    matched_rule: Option<usize>,
    destination: Option<String>,
}

pub fn run(vault: &Path, note: &str, json: bool) -> Result<()> {
    let config = Config::load(vault).context("Failed to load organizer config")?;
    let note_path = to_vault_relative(vault, note);

    let content = FsStore::new(vault)
        .read_note(&note_path)
        .with_context(|| format!("Failed to read note: {}", note_path))?;
    let snapshot = NoteSnapshot::new(note_path.as_str(), &content);
    let result = match_note(&snapshot, &config.rules);

    let report = TagsReport {
        note: note_path,
        matched_rule: result.rule_index(),
        destination: result.rule.map(|(_, rule)| rule.destination_path.clone()),
        tags: result.merged_tags,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", report.note.bold());
    if report.tags.is_empty() {
        println!("{}", "No tags found.".dimmed());
    } else {
        println!("Found tags: {}", join_tags(&report.tags).green());
    }

    match (report.matched_rule, &report.destination) {
        (Some(index), Some(destination)) => {
            println!("Matches rule #{} → {}", index, destination.cyan())
        }
        _ => println!("{}", "No rule matches this note.".dimmed()),
    }

    Ok(())
}
