//! The configuration store and its building blocks.
//!
//! This module provides the typed option schema, the persisted `.ini` codec,
//! help-text formatting, and the store that reconciles a saved file against
//! the currently declared schema.

pub mod error;
pub mod help;
pub mod ini;
pub mod schema;
pub mod store;
pub mod value;

pub use error::{ConfigError, ConfigResult};
pub use schema::{OptionSpec, Schema, SchemaProvider};
pub use store::{ConfigStore, ResolvedOptions, StoreOptions};
