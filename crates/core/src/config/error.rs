//! Error types for the configuration store.
//!
//! This module defines all errors that can occur while declaring a schema,
//! loading plugin manifests, and reading or writing the persisted config file.

use pc_protocol::ValueType;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the configuration store.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An explicitly supplied config file does not exist.
    #[error("Config file does not exist at: {0}")]
    FileNotFound(PathBuf),

    /// Failed to read a file from disk.
    #[error("Failed to read config file at {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a file to disk.
    #[error("Failed to write config file at {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The persisted config file is not valid INI.
    #[error("Failed to parse config file at {path}, line {line}: {reason}")]
    IniParse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// Failed to parse a TOML manifest.
    #[error("Failed to parse TOML file at {path}: {source}")]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Failed to parse a YAML manifest.
    #[error("Failed to parse YAML file at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// Failed to parse Markdown front matter.
    #[error("Failed to parse Markdown front matter in {path}: {reason}")]
    MarkdownParse { path: PathBuf, reason: String },

    /// Failed to walk directory structure.
    #[error("Failed to traverse directory {path}: {source}")]
    DirectoryWalk {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// A file was handed to the manifest loader that is not a manifest.
    #[error("Unsupported manifest file: {0}")]
    UnsupportedManifest(PathBuf),

    /// A section or option declaration is missing a mandatory field.
    #[error("Default config {kind} must have a {field}")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    /// An option was declared under a section that does not exist.
    #[error("Section does not exist: {0}")]
    SectionNotFound(String),

    /// An option declared a value type outside the recognized set.
    #[error("Invalid datatype for {section} - {title}: {reason}")]
    InvalidDatatype {
        section: String,
        title: String,
        reason: String,
    },

    /// An option's default does not read back as its declared type.
    #[error("Default '{value}' for {section} - {title} is not a valid {datatype}")]
    InvalidDefault {
        section: String,
        title: String,
        value: String,
        datatype: ValueType,
    },

    /// A numeric option was declared without rounding or bounds.
    #[error("'rounding' and 'min_max' must be set for numerical options: {section} - {title}")]
    MissingNumericMetadata { section: String, title: String },

    /// The schema provider declared nothing.
    #[error("Schema for '{0}' must declare at least one section with at least one option")]
    EmptySchema(String),

    /// An option was requested that the schema never declared.
    #[error("Option '{option}' is not declared in section '{section}'")]
    UnknownOption { section: String, option: String },

    /// A stored value could not be parsed as its declared type.
    #[error("Invalid value '{value}' for {section} - {option}: expected {expected}")]
    InvalidValue {
        section: String,
        option: String,
        value: String,
        expected: &'static str,
    },
}

/// Type alias for Result with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;
