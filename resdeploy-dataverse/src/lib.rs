//! # resdeploy-dataverse
//!
//! Dataverse Web API transport for the deploy engine: authenticated
//! session, web-resource queries, batched upserts, publication.
//!
//! [`DataverseClient`] implements the engine's `WebResourceStore` contract;
//! everything wire-specific (OAuth challenge parsing, OData filters,
//! `$batch` multipart framing) stays inside this crate.

pub mod auth;
pub mod batch;
pub mod client;
pub mod odata;

pub use client::DataverseClient;
