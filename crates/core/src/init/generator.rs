//! File generation for the example plugin tree.

use super::error::{InitError, InitResult};
use super::templates::{get_template, list_templates};
use crate::plugins::PLUGINS_DIR;
use std::fs;
use std::path::{Path, PathBuf};

/// Options for scaffolding a plugin tree.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Application root where `plugins/` will be created.
    pub target_dir: PathBuf,

    /// Overwrite an existing `plugins/` directory.
    pub force: bool,

    /// Only write the `train` family.
    pub minimal: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            target_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            force: false,
            minimal: false,
        }
    }
}

/// Writes the embedded example plugin tree into `options.target_dir`.
///
/// This function creates the following structure:
/// ```text
/// plugins/
/// ├── train/
/// │   ├── _config.toml
/// │   └── model/
/// │       ├── dfl_h128_defaults.yaml
/// │       └── original_defaults.toml
/// └── extract/ (unless minimal)
///     ├── _config.yaml
///     ├── detect/s3fd_defaults.toml
///     └── mask/vgg_clear_defaults.md
/// ```
///
/// Returns the written file paths.
///
/// # Errors
///
/// Returns `InitError` if:
/// - The plugins directory already exists (without force flag)
/// - A template file cannot be found
/// - File system operations fail
pub fn generate_plugin_tree(options: InitOptions) -> InitResult<Vec<PathBuf>> {
    let plugins_dir = options.target_dir.join(PLUGINS_DIR);

    if plugins_dir.exists() && !options.force {
        return Err(InitError::DirectoryExists(plugins_dir));
    }

    fs::create_dir_all(&plugins_dir).map_err(|source| InitError::DirectoryCreate {
        path: plugins_dir.clone(),
        source,
    })?;

    let prefix = if options.minimal {
        "plugins/train/"
    } else {
        "plugins/"
    };
    let templates = list_templates(prefix);
    if templates.is_empty() {
        return Err(InitError::TemplateNotFound(prefix.to_string()));
    }

    templates
        .iter()
        .map(|template_path| write_template_file(&options.target_dir, template_path))
        .collect()
}

/// Writes one template below `target_dir`, creating parent directories.
fn write_template_file(target_dir: &Path, template_path: &str) -> InitResult<PathBuf> {
    let content = get_template(template_path)
        .ok_or_else(|| InitError::TemplateNotFound(template_path.to_string()))?;

    let target_path = target_dir.join(template_path);

    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|source| InitError::DirectoryCreate {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&target_path, content).map_err(|source| InitError::FileWrite {
        path: target_path.clone(),
        source,
    })?;

    Ok(target_path)
}
