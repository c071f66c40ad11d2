//! Schema provider backed by manifest files.

use crate::config::error::ConfigResult;
use crate::config::schema::{Schema, SchemaProvider};
use crate::plugins::discovery::{declare_manifest_section, defaults_from_plugins};
use crate::plugins::manifest::{find_family_manifest, load_family_manifest};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Declares a plugin family from its directory.
///
/// The family manifest (`_config.toml`, `.yaml` or `.yml`) contributes its
/// sections first, then every `<name>_defaults` manifest below the directory
/// contributes one section each.
#[derive(Debug, Clone)]
pub struct ManifestProvider {
    family: String,
    dir: PathBuf,
}

impl ManifestProvider {
    pub fn new(family: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            family: family.into(),
            dir: dir.into(),
        }
    }

    /// Provider for `<plugins_root>/<family>`.
    pub fn for_family(plugins_root: &Path, family: &str) -> Self {
        Self::new(family, plugins_root.join(family))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SchemaProvider for ManifestProvider {
    fn family(&self) -> &str {
        &self.family
    }

    fn declare(&self, schema: &mut Schema) -> ConfigResult<()> {
        if let Some(path) = find_family_manifest(&self.dir) {
            debug!(path = %path.display(), "Loading family manifest");
            let manifest = load_family_manifest(&path)?;
            for section in manifest.sections {
                declare_manifest_section(schema, &section.name, &section.help, section.options)?;
            }
        }
        defaults_from_plugins(schema, &self.dir)?;
        Ok(())
    }
}
