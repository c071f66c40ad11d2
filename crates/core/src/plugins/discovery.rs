//! Discovery of `<name>_defaults` manifests inside a plugin tree.

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::schema::{OptionSpec, Schema};
use crate::plugins::manifest::{defaults_module_name, load_defaults_manifest};
use pc_protocol::OptionManifest;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Declares one section and its manifest options on `schema`.
pub fn declare_manifest_section(
    schema: &mut Schema,
    section: &str,
    help: &str,
    options: Vec<OptionManifest>,
) -> ConfigResult<()> {
    schema.add_section(section, help)?;
    for entry in options {
        let (title, spec) = OptionSpec::from_manifest(section, entry)?;
        schema.add_item(section, &title, spec)?;
    }
    Ok(())
}

/// Scans `plugin_folder` recursively for defaults manifests and declares each
/// as a section named `<plugin_type>.<name>`, where `plugin_type` is the name
/// of the directory holding the manifest.
///
/// Files are visited in file-name order. Returns the declared section names.
///
/// # Errors
///
/// Returns `ConfigError` if the directory cannot be walked, a manifest fails
/// to load, or a declaration is invalid.
pub fn defaults_from_plugins(
    schema: &mut Schema,
    plugin_folder: &Path,
) -> ConfigResult<Vec<String>> {
    let mut sections = Vec::new();

    for entry in WalkDir::new(plugin_folder).sort_by_file_name() {
        let entry = entry.map_err(|source| ConfigError::DirectoryWalk {
            path: plugin_folder.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Some(module) = defaults_module_name(path) else {
            continue;
        };
        let Some(plugin_type) = path
            .parent()
            .and_then(|dir| dir.file_name())
            .and_then(|name| name.to_str())
        else {
            continue;
        };

        let section = format!("{plugin_type}.{module}");
        debug!(section = %section, path = %path.display(), "Adding defaults");
        let manifest = load_defaults_manifest(path)?;
        declare_manifest_section(schema, &section, &manifest.help, manifest.options)?;
        sections.push(section);
    }

    Ok(sections)
}
