//! Reconcile planning — pure decision of create vs. update per unit.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use resdeploy_core::remote::UpsertTask;
use resdeploy_core::types::{DeploymentUnit, RemoteIndex};

/// Display names sort after stock resources in the platform's maker UI.
const DISPLAY_NAME_PREFIX: &str = "zzzz";

/// Build one upsert task per unit against the pre-mutation index.
///
/// Units whose qualified name is already indexed keep that record's
/// identifier (update in place); all others create. Content is always
/// re-encoded and overwritten — there is no change detection.
pub fn plan(units: &[DeploymentUnit], index: &RemoteIndex) -> Vec<UpsertTask> {
    units.iter().map(|unit| plan_unit(unit, index)).collect()
}

fn plan_unit(unit: &DeploymentUnit, index: &RemoteIndex) -> UpsertTask {
    let target = index.get(&unit.qualified_name).cloned();
    tracing::debug!(
        "{}: {}",
        unit.qualified_name,
        if target.is_some() { "update" } else { "create" }
    );
    UpsertTask {
        target,
        qualified_name: unit.qualified_name.clone(),
        display_name: format!("{DISPLAY_NAME_PREFIX}{}", unit.logical_name),
        resource_type: unit.resource_type,
        content_base64: STANDARD.encode(&unit.content),
    }
}
