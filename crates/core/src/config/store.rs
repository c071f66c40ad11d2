//! The configuration store.
//!
//! [`ConfigStore::load`] runs the full lifecycle for one plugin family:
//! 1. Resolve the backing file (`<root>/config/<family>.ini` or an explicit path)
//! 2. Collect the schema from the [`SchemaProvider`]
//! 3. Generate the file from schema defaults if it is missing
//! 4. Load the file and reconcile it against the schema
//! 5. Reset stored values that are not valid choices
//!
//! After that the store only serves typed reads.

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::help::format_help;
use crate::config::ini::{IniDocument, IniEntry, IniSection};
use crate::config::schema::{is_global, OptionSchema, Schema, SchemaProvider};
use crate::config::value::{is_none_literal, parse_list, parse_value};
use pc_protocol::{ConfigValue, ValueType};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// File extension of persisted config files.
pub const CONFIG_EXTENSION: &str = "ini";

/// Directory, relative to the application root, holding config files.
pub const CONFIG_DIR: &str = "config";

/// Option name to typed value. `None` is an absent (`None`) value.
pub type ResolvedOptions = BTreeMap<String, Option<ConfigValue>>;

/// Where the store looks for its backing file.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Application root; the canonical file lives in `<root>/config/`.
    pub root: PathBuf,

    /// Explicit config file. Must exist when given.
    pub config_file: Option<PathBuf>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            root: default_root(),
            config_file: None,
        }
    }
}

impl StoreOptions {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config_file: None,
        }
    }
}

/// Directory holding the running executable, or `.` when it cannot be found.
pub fn default_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Canonical path of a family's config file under `root`.
pub fn config_file_path(root: &Path, family: &str) -> PathBuf {
    root.join(CONFIG_DIR)
        .join(format!("{family}.{CONFIG_EXTENSION}"))
}

/// Resolves the backing file for `family`.
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if `explicit` is given but is not a file.
pub fn get_config_file(
    root: &Path,
    family: &str,
    explicit: Option<&Path>,
) -> ConfigResult<PathBuf> {
    if let Some(path) = explicit {
        if !path.is_file() {
            error!("Config file does not exist at: {}", path.display());
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        return Ok(path.to_path_buf());
    }
    let path = config_file_path(root, family);
    debug!("Config File location: '{}'", path.display());
    Ok(path)
}

/// A stored value that failed choice validation and was replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceCorrection {
    pub section: String,
    pub option: String,
    pub previous: String,
    pub corrected: String,
}

/// Declared schema plus the materialized option file for one plugin family.
#[derive(Debug)]
pub struct ConfigStore {
    section: String,
    config_file: PathBuf,
    schema: Schema,
    document: IniDocument,
    corrections: Vec<ChoiceCorrection>,
}

impl ConfigStore {
    /// Builds the store for `section`, creating or reconciling the backing file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - An explicit config file was given but does not exist
    /// - The provider's declarations are invalid or empty
    /// - The backing file cannot be read, parsed or written
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use pc_core::config::store::{ConfigStore, StoreOptions};
    /// use pc_core::plugins::ManifestProvider;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let provider = ManifestProvider::new("train", "plugins/train");
    /// let store = ConfigStore::load(&provider, "model.original", StoreOptions::with_root("."))?;
    /// println!("{:?}", store.resolved_options_for_section()?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(
        provider: &dyn SchemaProvider,
        section: impl Into<String>,
        options: StoreOptions,
    ) -> ConfigResult<Self> {
        let section = section.into();
        let family = provider.family();
        debug!(family, section = %section, "Initializing config store");

        let config_file = get_config_file(&options.root, family, options.config_file.as_deref())?;

        let mut schema = Schema::new();
        provider.declare(&mut schema)?;
        if schema.is_empty() {
            return Err(ConfigError::EmptySchema(family.to_string()));
        }

        let mut store = Self {
            section,
            config_file,
            schema,
            document: IniDocument::new(),
            corrections: Vec::new(),
        };
        store.handle_config()?;
        debug!(family, "Initialized config store");
        Ok(store)
    }

    /// Creates the file if needed, loads it, then validates it.
    fn handle_config(&mut self) -> ConfigResult<()> {
        if !self.check_exists() {
            self.create_default()?;
        }
        self.load_config()?;
        self.validate_config()
    }

    fn check_exists(&self) -> bool {
        let exists = self.config_file.is_file();
        debug!(exists, "Config file: '{}'", self.config_file.display());
        exists
    }

    fn create_default(&mut self) -> ConfigResult<()> {
        debug!("Creating default Config");
        self.document = build_document(&self.schema, None);
        self.save_config()
    }

    fn load_config(&mut self) -> ConfigResult<()> {
        debug!("Loading config: '{}'", self.config_file.display());
        let content =
            fs::read_to_string(&self.config_file).map_err(|source| ConfigError::FileRead {
                path: self.config_file.clone(),
                source,
            })?;
        self.document = IniDocument::parse(&content).map_err(|err| ConfigError::IniParse {
            path: self.config_file.clone(),
            line: err.line,
            reason: err.reason,
        })?;
        Ok(())
    }

    /// Writes the in-memory document to the backing file.
    pub fn save_config(&self) -> ConfigResult<()> {
        info!("Updating config at: '{}'", self.config_file.display());
        if let Some(parent) = self.config_file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| ConfigError::FileWrite {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        fs::write(&self.config_file, self.document.to_string()).map_err(|source| {
            ConfigError::FileWrite {
                path: self.config_file.clone(),
                source,
            }
        })
    }

    fn validate_config(&mut self) -> ConfigResult<()> {
        if self.check_config_change() {
            self.add_new_config_items()?;
        }
        self.check_config_choices();
        if !self.corrections.is_empty() {
            self.save_config()?;
        }
        Ok(())
    }

    /// Whether the file's sections or keys differ from the schema.
    fn check_config_change(&self) -> bool {
        let declared: BTreeSet<&str> = self
            .schema
            .sections()
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        let stored: BTreeSet<&str> = self.document.section_names().collect();
        if declared != stored {
            debug!("Default config has new section(s)");
            return true;
        }

        for section in self.schema.sections() {
            let declared: BTreeSet<&str> =
                section.options.iter().map(|o| o.title.as_str()).collect();
            let stored: BTreeSet<&str> = self
                .document
                .section(&section.name)
                .map(|s| s.keys().filter(|key| !key.starts_with('#')).collect())
                .unwrap_or_default();
            if declared != stored {
                debug!(section = %section.name, "Default config has new item(s)");
                return true;
            }
        }
        debug!("Default config has not changed");
        false
    }

    /// Rebuilds the document from the schema, carrying over stored values.
    fn add_new_config_items(&mut self) -> ConfigResult<()> {
        debug!("Updating config");
        self.document = build_document(&self.schema, Some(&self.document));
        self.save_config()
    }

    /// Resets stored values that are not among an option's declared choices.
    fn check_config_choices(&mut self) {
        debug!("Checking config choices");
        let mut corrections = Vec::new();
        for section in self.schema.sections() {
            for option in section.options.iter().filter(|o| !o.choices.is_empty()) {
                let Some(raw) = self.document.get(&section.name, &option.title) else {
                    continue;
                };
                let corrected = match option.datatype {
                    ValueType::List => validate_list_choice(option, raw),
                    _ => validate_single_choice(option, raw),
                };
                if let Some(corrected) = corrected {
                    corrections.push(ChoiceCorrection {
                        section: section.name.clone(),
                        option: option.title.clone(),
                        previous: raw.to_string(),
                        corrected,
                    });
                }
            }
        }

        for correction in &corrections {
            warn!(
                "'{}' is not a valid config choice for '{}': '{}'. Setting to: '{}'",
                correction.previous, correction.section, correction.option, correction.corrected
            );
            if let Some(section) = self.document.section_mut(&correction.section) {
                section.set(&correction.option, correction.corrected.clone());
            }
        }
        self.corrections = corrections;
    }

    /// Reads one option as its declared type.
    ///
    /// A stored `none` (any case) reads as `None`. An option missing from the
    /// file reads as its schema default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownOption` if the option was never declared,
    /// or `ConfigError::InvalidValue` if the stored text does not parse.
    pub fn get(&self, section: &str, option: &str) -> ConfigResult<Option<ConfigValue>> {
        let declared = self
            .schema
            .option(section, option)
            .ok_or_else(|| ConfigError::UnknownOption {
                section: section.to_string(),
                option: option.to_string(),
            })?;
        let stored = self.document.section(section).and_then(|s| s.get(option));
        let value = match stored {
            Some(Some(raw)) => parse_value(section, option, raw, declared.datatype)?,
            Some(None) => None,
            None => {
                let default = declared.default.to_string();
                parse_value(section, option, &default, declared.datatype)?
            }
        };
        debug!(section, option, datatype = %declared.datatype, ?value, "Returning item");
        Ok(value)
    }

    /// Global sections present in the file, followed by the store's own section.
    fn effective_sections(&self) -> Vec<&str> {
        let mut sections: Vec<&str> = self
            .document
            .section_names()
            .filter(|name| is_global(name))
            .collect();
        if !sections.contains(&self.section.as_str()) {
            sections.push(&self.section);
        }
        sections
    }

    /// Every option of the global sections and the store's section, typed.
    pub fn resolved_options_for_section(&self) -> ConfigResult<ResolvedOptions> {
        let mut conf = ResolvedOptions::new();
        for name in self.effective_sections() {
            let Some(section) = self.document.section(name) else {
                continue;
            };
            for key in section.keys().filter(|key| !key.starts_with('#')) {
                conf.insert(key.to_string(), self.get(name, key)?);
            }
        }
        Ok(conf)
    }

    /// Options that may be changed after an artifact has been created.
    ///
    /// Training only: covers the global sections and the store's section,
    /// restricted to options declared with `fixed = false`.
    pub fn mutable_options(&self) -> ConfigResult<ResolvedOptions> {
        let mut retval = ResolvedOptions::new();
        for name in self.effective_sections() {
            let Some(section) = self.schema.section(name) else {
                continue;
            };
            for option in section.options.iter().filter(|o| !o.fixed) {
                retval.insert(option.title.clone(), self.get(name, &option.title)?);
            }
        }
        debug!(?retval, "Alterable for existing models");
        Ok(retval)
    }

    /// The section this store resolves options for.
    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Choice corrections applied while loading.
    pub fn corrections(&self) -> &[ChoiceCorrection] {
        &self.corrections
    }
}

/// Corrected text for a single-choice option, or `None` when `raw` is valid.
fn validate_single_choice(option: &OptionSchema, raw: &str) -> Option<String> {
    if is_none_literal(raw) && option.choices.iter().any(|c| is_none_literal(c)) {
        return None;
    }
    if option.choices.iter().any(|choice| choice == raw) {
        return None;
    }
    Some(option.default.to_string())
}

/// Corrected text for a multi-choice option, or `None` when every item is valid.
fn validate_list_choice(option: &OptionSchema, raw: &str) -> Option<String> {
    let selected = parse_list(raw);
    if selected.is_empty() {
        return None;
    }
    let (valid, invalid): (Vec<String>, Vec<String>) = selected
        .into_iter()
        .partition(|item| option.choices.contains(item));
    if invalid.is_empty() {
        return None;
    }
    debug!(?invalid, option = %option.title, "Dropping invalid selections");
    Some(valid.join(", "))
}

/// Renders the schema as a document with help comments.
///
/// Values come from `existing` where the section and key are already stored;
/// everything else takes its schema default.
fn build_document(schema: &Schema, existing: Option<&IniDocument>) -> IniDocument {
    let mut document = IniDocument::new();
    for section in schema.sections() {
        debug!(section = %section.name, "Inserting section");
        let stored = existing.and_then(|doc| doc.section(&section.name));
        let mut out = IniSection::new(section.name.clone());
        out.entries
            .push(IniEntry::Comment(format_help(&section.helptext, true)));
        for option in &section.options {
            let value = match stored {
                Some(stored) => match stored.get(&option.title) {
                    Some(value) => value.unwrap_or("None").to_string(),
                    None => option.default.to_string(),
                },
                None => option.default.to_string(),
            };
            out.entries
                .push(IniEntry::Comment(format_help(&option.helptext, false)));
            out.entries.push(IniEntry::Value {
                key: option.title.clone(),
                value: Some(value),
            });
        }
        document.push_section(out);
    }
    document
}
