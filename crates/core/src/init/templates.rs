//! Embedded manifest templates for the example plugin tree.
//!
//! This module uses `rust-embed` to embed the project root `templates/`
//! directory into the binary at compile time, so `plugconf init` works without
//! any files next to the executable.

use rust_embed::RustEmbed;

/// Embedded template files from the `templates/` directory.
///
/// The path is calculated relative to the crate root:
/// - `CARGO_MANIFEST_DIR` = `crates/core`
/// - `../../templates` = project root `templates/`
///
/// During development with the `debug-embed` feature, files are read from the
/// filesystem at runtime, allowing for quick iteration without recompilation.
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../templates"]
pub struct TemplateAssets;

/// Get template file content by path.
///
/// # Example
/// ```
/// use pc_core::init::templates::get_template;
///
/// let config = get_template("plugins/train/_config.toml").expect("train manifest should exist");
/// assert!(config.contains("[[sections]]"));
/// ```
pub fn get_template(path: &str) -> Option<String> {
    TemplateAssets::get(path).map(|file| String::from_utf8_lossy(file.data.as_ref()).to_string())
}

/// List all template files under a directory prefix, sorted.
///
/// # Example
/// ```
/// use pc_core::init::templates::list_templates;
///
/// let extract = list_templates("plugins/extract/");
/// assert!(extract.contains(&"plugins/extract/_config.yaml".to_string()));
/// ```
pub fn list_templates(prefix: &str) -> Vec<String> {
    let mut paths: Vec<String> = TemplateAssets::iter()
        .filter(|path| path.starts_with(prefix))
        .map(|path| path.to_string())
        .collect();
    paths.sort();
    paths
}
