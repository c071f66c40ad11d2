//! First-run generation of plugin config files.
//!
//! This runs before logging is set up, so it reports through its return value
//! only.

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::store::{config_file_path, ConfigStore, StoreOptions};
use crate::plugins::manifest::find_family_manifest;
use crate::plugins::provider::ManifestProvider;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory, relative to the application root, holding plugin families.
pub const PLUGINS_DIR: &str = "plugins";

/// Creates `<root>/config/<family>.ini` for every plugin family under
/// `<root>/plugins` that has a family manifest but no config file yet.
///
/// Returns the paths of the files that were created. A missing `plugins`
/// directory yields an empty list.
///
/// # Example
///
/// ```rust,no_run
/// use pc_core::plugins::generate_configs;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// for created in generate_configs(Path::new("."))? {
///     println!("created {}", created.display());
/// }
/// # Ok(())
/// # }
/// ```
pub fn generate_configs(root: &Path) -> ConfigResult<Vec<PathBuf>> {
    let plugins_path = root.join(PLUGINS_DIR);
    if !plugins_path.is_dir() {
        return Ok(Vec::new());
    }

    let mut created = Vec::new();
    for entry in WalkDir::new(&plugins_path)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = entry.map_err(|source| ConfigError::DirectoryWalk {
            path: plugins_path.clone(),
            source,
        })?;
        if !entry.file_type().is_dir() || find_family_manifest(entry.path()).is_none() {
            continue;
        }
        let Some(family) = entry.file_name().to_str() else {
            continue;
        };

        let config_file = config_file_path(root, family);
        if config_file.exists() {
            continue;
        }
        let provider = ManifestProvider::new(family, entry.path());
        ConfigStore::load(&provider, family, StoreOptions::with_root(root))?;
        created.push(config_file);
    }
    Ok(created)
}
