//! Manifest file loading.
//!
//! Plugins ship their option schema as data in one of these forms:
//! - `<name>_defaults.toml` / `.yaml` / `.yml`: `help` plus an `options` array
//! - `<name>_defaults.md`: YAML front matter with `options`, body is the help text
//! - `_config.toml` / `.yaml` / `.yml`: a family manifest with a `sections` array

use crate::config::error::{ConfigError, ConfigResult};
use gray_matter::engine::YAML;
use gray_matter::Matter;
use pc_protocol::{DefaultsManifest, FamilyManifest};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// File stem suffix marking a defaults manifest.
pub const DEFAULTS_SUFFIX: &str = "_defaults";

/// File stem of a family manifest.
pub const FAMILY_MANIFEST_STEM: &str = "_config";

/// Extensions tried, in order, when looking for a family manifest.
const FAMILY_MANIFEST_EXTENSIONS: [&str; 3] = ["toml", "yaml", "yml"];

/// Serialization format of a manifest, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Toml,
    Yaml,
    Markdown,
}

impl ManifestFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Some(Self::Toml),
            Some("yaml") | Some("yml") => Some(Self::Yaml),
            Some("md") => Some(Self::Markdown),
            _ => None,
        }
    }
}

/// Returns the `<name>` part of a defaults manifest path, or `None` if the
/// path is not a defaults manifest.
pub fn defaults_module_name(path: &Path) -> Option<&str> {
    ManifestFormat::from_path(path)?;
    path.file_stem()
        .and_then(|s| s.to_str())
        .and_then(|stem| stem.strip_suffix(DEFAULTS_SUFFIX))
        .filter(|name| !name.is_empty())
}

/// Locates the family manifest inside `dir`, if there is one.
pub fn find_family_manifest(dir: &Path) -> Option<PathBuf> {
    FAMILY_MANIFEST_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{FAMILY_MANIFEST_STEM}.{ext}")))
        .find(|path| path.is_file())
}

fn read_manifest(path: &Path) -> ConfigResult<String> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_structured<T: DeserializeOwned>(
    path: &Path,
    content: &str,
    format: ManifestFormat,
) -> ConfigResult<T> {
    match format {
        ManifestFormat::Toml => toml::from_str(content).map_err(|source| ConfigError::TomlParse {
            path: path.to_path_buf(),
            source,
        }),
        ManifestFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|source| ConfigError::YamlParse {
                path: path.to_path_buf(),
                source,
            })
        }
        ManifestFormat::Markdown => Err(ConfigError::MarkdownParse {
            path: path.to_path_buf(),
            reason: "Markdown is only supported for defaults manifests".to_string(),
        }),
    }
}

/// Loads a `<name>_defaults` manifest.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, has an unsupported
/// extension, or fails to parse.
pub fn load_defaults_manifest(path: &Path) -> ConfigResult<DefaultsManifest> {
    let format = ManifestFormat::from_path(path)
        .ok_or_else(|| ConfigError::UnsupportedManifest(path.to_path_buf()))?;
    let content = read_manifest(path)?;

    if format != ManifestFormat::Markdown {
        return parse_structured(path, &content, format);
    }

    // Front matter holds the options, the body is the section help
    let matter = Matter::<YAML>::new();
    let result = matter.parse(&content);
    let mut manifest: DefaultsManifest = result
        .data
        .ok_or_else(|| ConfigError::MarkdownParse {
            path: path.to_path_buf(),
            reason: "Missing YAML front matter".to_string(),
        })?
        .deserialize()
        .map_err(|e| ConfigError::MarkdownParse {
            path: path.to_path_buf(),
            reason: format!("Failed to deserialize front matter: {e}"),
        })?;
    if manifest.help.is_empty() {
        manifest.help = result.content.trim().to_string();
    }
    Ok(manifest)
}

/// Loads a family `_config` manifest.
pub fn load_family_manifest(path: &Path) -> ConfigResult<FamilyManifest> {
    let format = ManifestFormat::from_path(path)
        .ok_or_else(|| ConfigError::UnsupportedManifest(path.to_path_buf()))?;
    let content = read_manifest(path)?;
    parse_structured(path, &content, format)
}
