//! Plugin-contributed schemas.
//!
//! Plugins describe their options in manifest files colocated with their
//! implementation. This module finds and loads those manifests, exposes them
//! as a [`SchemaProvider`](crate::config::SchemaProvider), and generates the
//! config files of every plugin family on first run.

pub mod bootstrap;
pub mod discovery;
pub mod manifest;
pub mod provider;

pub use bootstrap::{generate_configs, PLUGINS_DIR};
pub use discovery::defaults_from_plugins;
pub use provider::ManifestProvider;
