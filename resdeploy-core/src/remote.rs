//! Remote web-resource capability contract.
//!
//! The engine drives deployment entirely through [`WebResourceStore`];
//! transports implement it (one real platform client, in-memory fakes in
//! tests). Session acquisition and release belong to the implementation —
//! the contract sees an already-connected handle.

use crate::error::RemoteError;
use crate::types::{QualifiedName, RemoteRecord, ResourceId, ResourceType};

/// One create-or-update request in a deployment batch.
///
/// An absent `target` means "create"; a present one means "update in
/// place". Identity is name-driven: the target only ever comes from a prior
/// name lookup, never from independent input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertTask {
    pub target: Option<ResourceId>,
    pub qualified_name: QualifiedName,
    pub display_name: String,
    pub resource_type: ResourceType,
    /// File content, base64-encoded for the wire.
    pub content_base64: String,
}

/// Outcome of one task inside a batch, as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The task was applied.
    Applied,
    /// The task failed; sibling tasks were not affected.
    Failed { message: String },
}

/// Connected handle to the remote web-resource platform.
pub trait WebResourceStore {
    /// Fetch existing records whose name matches any of `names`, as one
    /// disjunctive filter in one round trip. An empty set short-circuits
    /// to an empty result without a remote call; callers avoid issuing the
    /// vacuous filter in the first place.
    fn query_by_names(
        &mut self,
        names: &[QualifiedName],
    ) -> Result<Vec<RemoteRecord>, RemoteError>;

    /// Execute all `tasks` as a single batch, continuing past individual
    /// task failures. Returns exactly one outcome per task, in task order.
    /// Invoked even for an empty task list; implementations may answer that
    /// locally.
    fn execute_batch(&mut self, tasks: &[UpsertTask]) -> Result<Vec<BatchOutcome>, RemoteError>;

    /// Mark the given records as published. No-op on an empty identifier
    /// list; callers elide the call when nothing resolved.
    fn publish(&mut self, ids: &[ResourceId]) -> Result<(), RemoteError>;
}
