//! `resdeploy check` — settings validation and mapping visibility.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use resdeploy_core::settings::Settings;
use resdeploy_core::types::{QualifiedName, ResourceType};

/// Arguments for `resdeploy check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the settings document (default: ./settings.json).
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl CheckArgs {
    pub fn run(self) -> Result<()> {
        let path = super::settings_path(self.settings)?;
        let settings =
            Settings::load(&path).with_context(|| format!("cannot load {}", path.display()))?;

        let entries = resolve_entries(&settings);
        if self.json {
            print_json(&settings, &entries)?;
            return Ok(());
        }
        print_table(&settings, &entries);
        Ok(())
    }
}

/// How one mapping entry resolves against the working folder.
#[derive(Debug)]
struct EntryStatus {
    file: String,
    qualified_name: QualifiedName,
    resource_type: ResourceType,
    /// `None` when the file is absent (the entry would be skipped).
    size: Option<u64>,
}

fn resolve_entries(settings: &Settings) -> Vec<EntryStatus> {
    settings
        .resources
        .iter()
        .map(|(file, logical)| {
            let source = settings.working_folder.join(file);
            EntryStatus {
                file: file.clone(),
                qualified_name: QualifiedName::new(&settings.prefix, logical),
                resource_type: ResourceType::classify(file),
                size: std::fs::metadata(&source).ok().map(|meta| meta.len()),
            }
        })
        .collect()
}

#[derive(Serialize)]
struct CheckReportJson {
    crm: String,
    working_folder: String,
    prefix: String,
    entries: Vec<EntryJson>,
}

#[derive(Serialize)]
struct EntryJson {
    file: String,
    qualified_name: String,
    resource_type: String,
    status: String,
    size: Option<u64>,
}

#[derive(Tabled)]
struct EntryTableRow {
    #[tabled(rename = "file")]
    file: String,
    #[tabled(rename = "qualified name")]
    qualified_name: String,
    #[tabled(rename = "type")]
    resource_type: String,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "size")]
    size: String,
}

fn status_label(entry: &EntryStatus) -> &'static str {
    if entry.size.is_some() {
        "deploy"
    } else {
        "missing"
    }
}

fn print_json(settings: &Settings, entries: &[EntryStatus]) -> Result<()> {
    let payload = CheckReportJson {
        crm: settings.crm.clone(),
        working_folder: settings.working_folder.display().to_string(),
        prefix: settings.prefix.clone(),
        entries: entries
            .iter()
            .map(|entry| EntryJson {
                file: entry.file.clone(),
                qualified_name: entry.qualified_name.to_string(),
                resource_type: entry.resource_type.to_string(),
                status: status_label(entry).to_string(),
                size: entry.size,
            })
            .collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize check JSON")?
    );
    Ok(())
}

fn print_table(settings: &Settings, entries: &[EntryStatus]) {
    let deployable = entries.iter().filter(|e| e.size.is_some()).count();
    let missing = entries.len() - deployable;

    println!(
        "resdeploy v{} | {} | {} entries | {} | {}",
        env!("CARGO_PKG_VERSION"),
        settings.crm,
        entries.len(),
        format!("{deployable} deployable").green(),
        if missing > 0 {
            format!("{missing} missing").yellow()
        } else {
            "0 missing".normal()
        },
    );

    if entries.is_empty() {
        println!("No resources declared.");
        return;
    }

    let rows: Vec<EntryTableRow> = entries
        .iter()
        .map(|entry| EntryTableRow {
            file: entry.file.clone(),
            qualified_name: entry.qualified_name.to_string(),
            resource_type: entry.resource_type.to_string(),
            status: status_label(entry).to_string(),
            size: entry
                .size
                .map(|bytes| bytes.to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}
