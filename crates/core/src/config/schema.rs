//! In-memory option schema.
//!
//! A [`Schema`] holds the declared sections and their typed options in
//! declaration order. It is populated once, by a [`SchemaProvider`], before
//! the store touches the persisted file.

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::help::expand_helptext;
use crate::config::value::coerce_default;
use pc_protocol::{ConfigValue, OptionManifest, ValueType};
use tracing::debug;

/// Prefix marking sections whose options are merged into every other section.
pub const GLOBAL_PREFIX: &str = "global";

/// Whether `section` is a global section.
pub fn is_global(section: &str) -> bool {
    section.starts_with(GLOBAL_PREFIX)
}

/// Supplies the option schema for one plugin family.
///
/// Implementors declare sections and options on the schema they are handed;
/// the store then loads or creates `<root>/config/<family>.ini` from it.
///
/// # Example
///
/// ```
/// use pc_core::config::error::ConfigResult;
/// use pc_core::config::schema::{OptionSpec, Schema, SchemaProvider};
///
/// struct ConvertConfig;
///
/// impl SchemaProvider for ConvertConfig {
///     fn family(&self) -> &str {
///         "convert"
///     }
///
///     fn declare(&self, schema: &mut Schema) -> ConfigResult<()> {
///         schema.add_section("writer.ffmpeg", "Video writer options")?;
///         schema.add_item(
///             "writer.ffmpeg",
///             "codec",
///             OptionSpec::new("libx264", "Video codec").choices(["libx264", "libx265"]),
///         )?;
///         Ok(())
///     }
/// }
/// ```
pub trait SchemaProvider {
    /// Plugin family name; names the backing config file.
    fn family(&self) -> &str;

    /// Declares every section and option of the family.
    fn declare(&self, schema: &mut Schema) -> ConfigResult<()>;
}

/// Builder for one option declaration.
///
/// The default value and help text are mandatory; the value type is inferred
/// from the default unless overridden.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    datatype: ValueType,
    default: ConfigValue,
    info: String,
    rounding: Option<u32>,
    min_max: Option<(f64, f64)>,
    choices: Vec<String>,
    gui_radio: bool,
    fixed: bool,
    group: Option<String>,
}

impl OptionSpec {
    pub fn new(default: impl Into<ConfigValue>, info: impl Into<String>) -> Self {
        let default = default.into();
        Self {
            datatype: default.value_type(),
            default,
            info: info.into(),
            rounding: None,
            min_max: None,
            choices: Vec::new(),
            gui_radio: false,
            fixed: true,
            group: None,
        }
    }

    pub fn datatype(mut self, datatype: ValueType) -> Self {
        self.datatype = datatype;
        self
    }

    /// Decimal places for floats, step interval for integers.
    pub fn rounding(mut self, rounding: u32) -> Self {
        self.rounding = Some(rounding);
        self
    }

    pub fn min_max(mut self, min: f64, max: f64) -> Self {
        self.min_max = Some((min, max));
        self
    }

    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn gui_radio(mut self, gui_radio: bool) -> Self {
        self.gui_radio = gui_radio;
        self
    }

    /// `false` lets the value change after an artifact has been created.
    pub fn fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Builds a spec from a manifest entry, returning it with its title.
    pub fn from_manifest(section: &str, entry: OptionManifest) -> ConfigResult<(String, Self)> {
        let mut spec = Self::new(entry.default, entry.info);
        if let Some(name) = entry.datatype {
            let datatype = name
                .parse::<ValueType>()
                .map_err(|err| ConfigError::InvalidDatatype {
                    section: section.to_string(),
                    title: entry.title.clone(),
                    reason: err.to_string(),
                })?;
            spec = spec.datatype(datatype);
        }
        spec.rounding = entry.rounding;
        spec.min_max = entry.min_max;
        spec.choices = entry.choices;
        spec.gui_radio = entry.gui_radio;
        spec.fixed = entry.fixed;
        spec.group = entry.group;
        Ok((entry.title, spec))
    }
}

/// A fully assembled option entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSchema {
    pub title: String,
    pub datatype: ValueType,
    pub default: ConfigValue,
    /// Help text with the generated notes appended.
    pub helptext: String,
    pub rounding: Option<u32>,
    pub min_max: Option<(f64, f64)>,
    pub choices: Vec<String>,
    pub gui_radio: bool,
    pub fixed: bool,
    pub group: Option<String>,
}

/// A declared section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSchema {
    pub name: String,
    pub helptext: String,
    pub options: Vec<OptionSchema>,
}

impl SectionSchema {
    pub fn option(&self, title: &str) -> Option<&OptionSchema> {
        self.options.iter().find(|option| option.title == title)
    }
}

/// Ordered collection of declared sections.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    sections: Vec<SectionSchema>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a section, replacing any earlier declaration of the same name.
    pub fn add_section(&mut self, name: &str, info: &str) -> ConfigResult<()> {
        debug!(section = name, "Add section");
        if name.is_empty() {
            return Err(ConfigError::MissingField {
                kind: "sections",
                field: "title",
            });
        }
        if info.is_empty() {
            return Err(ConfigError::MissingField {
                kind: "sections",
                field: "information text",
            });
        }

        let section = SectionSchema {
            name: name.to_string(),
            helptext: info.to_string(),
            options: Vec::new(),
        };
        match self.sections.iter_mut().find(|s| s.name == name) {
            Some(existing) => *existing = section,
            None => self.sections.push(section),
        }
        Ok(())
    }

    /// Declares an option under an existing section.
    pub fn add_item(&mut self, section: &str, title: &str, spec: OptionSpec) -> ConfigResult<()> {
        debug!(section, title, datatype = %spec.datatype, "Add item");
        if section.is_empty() {
            return Err(ConfigError::MissingField {
                kind: "items",
                field: "section",
            });
        }
        if title.is_empty() {
            return Err(ConfigError::MissingField {
                kind: "items",
                field: "title",
            });
        }
        if spec.info.is_empty() {
            return Err(ConfigError::MissingField {
                kind: "items",
                field: "information text",
            });
        }
        let index = self
            .sections
            .iter()
            .position(|s| s.name == section)
            .ok_or_else(|| ConfigError::SectionNotFound(section.to_string()))?;
        if spec.datatype.is_numeric() && (spec.rounding.is_none() || spec.min_max.is_none()) {
            return Err(ConfigError::MissingNumericMetadata {
                section: section.to_string(),
                title: title.to_string(),
            });
        }

        let default = coerce_default(section, title, spec.default, spec.datatype)?;
        let helptext = expand_helptext(
            &spec.info,
            &spec.choices,
            &default,
            spec.datatype,
            spec.min_max,
            spec.fixed,
        );
        let option = OptionSchema {
            title: title.to_string(),
            datatype: spec.datatype,
            default,
            helptext,
            rounding: spec.rounding,
            min_max: spec.min_max,
            choices: spec.choices,
            gui_radio: spec.gui_radio,
            fixed: spec.fixed,
            group: spec.group,
        };
        let target = &mut self.sections[index];
        match target.options.iter_mut().find(|o| o.title == title) {
            Some(existing) => *existing = option,
            None => target.options.push(option),
        }
        Ok(())
    }

    pub fn sections(&self) -> &[SectionSchema] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&SectionSchema> {
        self.sections.iter().find(|section| section.name == name)
    }

    pub fn option(&self, section: &str, title: &str) -> Option<&OptionSchema> {
        self.section(section).and_then(|s| s.option(title))
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() || self.sections.iter().all(|s| s.options.is_empty())
    }
}
