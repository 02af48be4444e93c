//! Sequential deploy run — lookup, batch upsert, re-lookup, publish.
//!
//! One pass, fixed order, no retries and no concurrency: a remote fault at
//! any phase aborts the whole run. Per-task failures inside the batch do
//! not abort; they come back in the [`DeployReport`].

use resdeploy_core::manifest;
use resdeploy_core::remote::{BatchOutcome, UpsertTask, WebResourceStore};
use resdeploy_core::types::{DeploymentUnit, QualifiedName, RemoteIndex, ResourceId};

use crate::error::DeployError;
use crate::{plan, publish};

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// Remote phase about to start; emitted once each, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Pre-mutation lookup of existing records.
    Lookup,
    /// Batch upsert of all planned tasks.
    Upsert,
    /// Re-lookup and publication of every record that now exists remotely.
    Publish,
}

/// What a task set out to do, decided by name against the before-index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
}

/// Per-unit outcome of the batch phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    pub qualified_name: QualifiedName,
    pub action: Action,
    /// `None` on success; the transport's message otherwise.
    pub error: Option<String>,
}

impl TaskOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Summary of a full deploy run.
#[derive(Debug)]
pub struct DeployReport {
    /// One entry per planned task, in task order.
    pub outcomes: Vec<TaskOutcome>,
    /// Identifiers included in the publish request; empty when publish was
    /// skipped because nothing resolved remotely.
    pub published: Vec<ResourceId>,
}

impl DeployReport {
    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.succeeded()).count()
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Run the full reconcile-and-publish sequence against `store`.
///
/// `on_stage` fires before each remote phase so callers can surface
/// progress without owning the sequencing.
pub fn run<S, F>(
    store: &mut S,
    units: &[DeploymentUnit],
    mut on_stage: F,
) -> Result<DeployReport, DeployError>
where
    S: WebResourceStore + ?Sized,
    F: FnMut(Stage),
{
    let names = manifest::qualified_names(units);

    on_stage(Stage::Lookup);
    let before = lookup(store, &names)?;
    tracing::debug!("{} of {} names already exist remotely", before.len(), names.len());

    on_stage(Stage::Upsert);
    let tasks = plan::plan(units, &before);
    let outcomes = execute(store, &tasks)?;

    on_stage(Stage::Publish);
    let published = publish::publish_existing(store, &names)?;
    tracing::info!(
        "deployed {} tasks ({} failed), published {} records",
        outcomes.len(),
        outcomes.iter().filter(|o| !o.succeeded()).count(),
        published.len()
    );

    Ok(DeployReport { outcomes, published })
}

/// Resolve `names` against the store into a fresh case-insensitive index.
///
/// An empty name set performs no remote call.
pub fn lookup<S>(store: &mut S, names: &[QualifiedName]) -> Result<RemoteIndex, DeployError>
where
    S: WebResourceStore + ?Sized,
{
    if names.is_empty() {
        return Ok(RemoteIndex::default());
    }
    let records = store.query_by_names(names)?;
    Ok(RemoteIndex::from_records(&records))
}

/// Submit `tasks` as one batch and pair each transport outcome with its
/// task. The batch is issued even when the plan is empty.
pub fn execute<S>(store: &mut S, tasks: &[UpsertTask]) -> Result<Vec<TaskOutcome>, DeployError>
where
    S: WebResourceStore + ?Sized,
{
    let results = store.execute_batch(tasks)?;
    if results.len() != tasks.len() {
        return Err(DeployError::OutcomeMismatch {
            expected: tasks.len(),
            got: results.len(),
        });
    }

    let outcomes = tasks
        .iter()
        .zip(results)
        .map(|(task, result)| {
            let action = if task.target.is_some() {
                Action::Update
            } else {
                Action::Create
            };
            let error = match result {
                BatchOutcome::Applied => None,
                BatchOutcome::Failed { message } => {
                    tracing::warn!("{} failed: {message}", task.qualified_name);
                    Some(message)
                }
            };
            TaskOutcome {
                qualified_name: task.qualified_name.clone(),
                action,
                error,
            }
        })
        .collect();
    Ok(outcomes)
}
