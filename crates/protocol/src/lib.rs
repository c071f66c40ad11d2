//! # pc-protocol
//!
//! Shared data models for plugconf.
//!
//! This crate defines the structures that cross crate boundaries:
//! - Typed option values and the value types an option may declare
//! - Declarative plugin manifests (TOML, YAML or Markdown front matter)
//!
//! ## Modules
//!
//! - [`value_models`]: `ValueType` and the `ConfigValue` tagged union
//! - [`manifest_models`]: Defaults and family manifests contributed by plugins
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde
//! - Independent compilation: No dependencies on other plugconf crates

pub mod manifest_models;
pub mod value_models;

// Re-export all public types for convenience
pub use manifest_models::*;
pub use value_models::*;
