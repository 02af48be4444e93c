//! Core domain for web-resource deployment — settings, manifest, remote
//! contract, errors.
//!
//! Public API surface:
//! - [`types`] — newtypes and domain structs
//! - [`settings`] — the validated `settings.json` document
//! - [`manifest`] — declared mapping → deployment units
//! - [`remote`] — the [`WebResourceStore`] capability contract
//! - [`error`] — [`SettingsError`], [`ManifestError`], [`RemoteError`]

pub mod error;
pub mod manifest;
pub mod remote;
pub mod settings;
pub mod types;

pub use error::{ManifestError, RemoteError, SettingsError};
pub use remote::{BatchOutcome, UpsertTask, WebResourceStore};
pub use settings::Settings;
pub use types::{
    DeploymentUnit, QualifiedName, RemoteIndex, RemoteRecord, ResourceId, ResourceType,
};
