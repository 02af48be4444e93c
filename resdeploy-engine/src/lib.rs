//! # resdeploy-engine
//!
//! Reconcile-and-publish engine for web-resource deployment.
//!
//! Call [`deploy::run`] with a connected [`WebResourceStore`] and a loaded
//! deployment-unit list to drive the full sequential pass: before-lookup →
//! batch upsert → after-lookup → publish.
//!
//! [`WebResourceStore`]: resdeploy_core::remote::WebResourceStore

pub mod deploy;
pub mod error;
pub mod plan;
pub mod publish;

pub use deploy::{run, Action, DeployReport, Stage, TaskOutcome};
pub use error::DeployError;
