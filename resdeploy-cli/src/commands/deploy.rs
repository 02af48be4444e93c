//! `resdeploy deploy` — reconcile and publish web resources.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use resdeploy_core::{manifest, settings::Settings, types::DeploymentUnit};
use resdeploy_dataverse::DataverseClient;
use resdeploy_engine::deploy::{self, Action, DeployReport, Stage};

/// Arguments for `resdeploy deploy`.
#[derive(Args, Debug)]
pub struct DeployArgs {
    /// Path to the settings document (default: ./settings.json).
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Resolve create/update decisions and show them without writing
    /// anything remotely.
    #[arg(long)]
    pub dry_run: bool,
}

impl DeployArgs {
    pub fn run(self) -> Result<()> {
        let path = super::settings_path(self.settings)?;

        println!("Validating settings");
        let settings =
            Settings::load(&path).with_context(|| format!("cannot load {}", path.display()))?;

        println!("Reading targeted resources");
        let units = manifest::load_units(&settings).context("cannot read resource files")?;

        let mut client =
            DataverseClient::connect(&settings.crm, &settings.client_id, &settings.client_secret)
                .with_context(|| format!("cannot connect to {}", settings.crm))?;

        if self.dry_run {
            return dry_run(&mut client, &units);
        }

        let report =
            deploy::run(&mut client, &units, print_stage).context("deployment failed")?;
        print_report(&report);

        let failed = report.failure_count();
        if failed > 0 {
            bail!("{failed} of {} resources failed to deploy", report.outcomes.len());
        }
        Ok(())
    }
}

fn print_stage(stage: Stage) {
    match stage {
        Stage::Lookup => println!("Retrieving previous records"),
        Stage::Upsert => println!("Deploying web resources"),
        Stage::Publish => println!("Publishing web resources"),
    }
}

fn dry_run(client: &mut DataverseClient, units: &[DeploymentUnit]) -> Result<()> {
    println!("Retrieving previous records");
    let names = manifest::qualified_names(units);
    let index = deploy::lookup(client, &names).context("lookup failed")?;

    if units.is_empty() {
        println!("[dry-run] no local resources matched the mapping");
        return Ok(());
    }
    for unit in units {
        let action = if index.get(&unit.qualified_name).is_some() {
            "update"
        } else {
            "create"
        };
        println!(
            "[dry-run] {action} {} ({})",
            unit.qualified_name, unit.resource_type
        );
    }
    Ok(())
}

fn print_report(report: &DeployReport) {
    let total = report.outcomes.len();
    let failed = report.failure_count();

    if total == 0 {
        println!("{} nothing to deploy", "✓".green().bold());
        return;
    }
    if failed == 0 {
        println!(
            "{} deployed {total} resources, published {}",
            "✓".green().bold(),
            report.published.len()
        );
    } else {
        println!(
            "{} deployed {} of {total} resources, published {}",
            "✗".red().bold(),
            total - failed,
            report.published.len()
        );
    }

    for outcome in &report.outcomes {
        match (&outcome.error, outcome.action) {
            (None, Action::Create) => {
                println!("  {}  {} (new)", "✎".green(), outcome.qualified_name);
            }
            (None, Action::Update) => {
                println!("  {}  {}", "✎".green(), outcome.qualified_name);
            }
            (Some(message), _) => {
                println!("  {}  {}: {message}", "✗".red(), outcome.qualified_name);
            }
        }
    }
}
