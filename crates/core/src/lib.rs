//! # pc-core
//!
//! Layered plugin configuration for plugconf.
//!
//! This crate provides:
//! - A typed option schema that plugin families declare
//! - A configuration store persisted to a commented `.ini` file and reconciled
//!   against the schema whenever the schema evolves
//! - Discovery of plugin-contributed option manifests
//! - First-run generation of every family's config file
//!
//! ## Modules
//!
//! - [`config`]: Schema declaration, persistence, reconciliation and typed reads
//! - [`plugins`]: Manifest loading, discovery and startup bootstrap
//! - [`init`]: Scaffolding of an example plugin tree

pub mod config;
pub mod init;
pub mod plugins;
