//! Scaffolding of an example plugin tree.
//!
//! This module writes a `plugins/` directory with ready-made manifests for
//! two plugin families:
//! - `train`: a `_config.toml` family manifest plus model defaults
//! - `extract`: a `_config.yaml` family manifest plus detector and mask defaults
//!
//! # Example
//!
//! ```no_run
//! use pc_core::init::{generate_plugin_tree, InitOptions};
//! use std::path::PathBuf;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = InitOptions {
//!     target_dir: PathBuf::from("."),
//!     force: false,
//!     minimal: false,
//! };
//!
//! let written = generate_plugin_tree(options)?;
//! println!("Wrote {} manifests", written.len());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod generator;
pub mod templates;

// Re-export commonly used types for convenience
pub use error::{InitError, InitResult};
pub use generator::{generate_plugin_tree, InitOptions};
pub use templates::{get_template, list_templates};
