//! Post-upsert publication.

use resdeploy_core::remote::WebResourceStore;
use resdeploy_core::types::{QualifiedName, ResourceId};

use crate::error::DeployError;

/// Re-resolve `names` and publish every record that currently exists.
///
/// A fresh lookup, not the before-index: identifiers of records created
/// earlier in the run only become known here. Everything that resolves is
/// published, including records that predate the run — there is no
/// per-record change signal to narrow the set. Zero resolved records elides
/// the publish call entirely.
///
/// Returns the identifiers that were published.
pub fn publish_existing<S>(
    store: &mut S,
    names: &[QualifiedName],
) -> Result<Vec<ResourceId>, DeployError>
where
    S: WebResourceStore + ?Sized,
{
    if names.is_empty() {
        return Ok(Vec::new());
    }
    let records = store.query_by_names(names)?;
    let ids: Vec<ResourceId> = records.into_iter().map(|r| r.id).collect();
    if ids.is_empty() {
        tracing::debug!("no matching remote records; skipping publish");
        return Ok(ids);
    }
    store.publish(&ids)?;
    Ok(ids)
}
