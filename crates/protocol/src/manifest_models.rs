//! Declarative manifests contributed by plugins.
//!
//! Plugins describe their options as data instead of code. Two manifest
//! shapes exist:
//! - `<name>_defaults.{toml,yaml,yml,md}`: one section per file, discovered by
//!   walking a plugin family directory
//! - `_config.{toml,yaml,yml}`: the family-level manifest, declaring any number
//!   of sections (typically the `global` ones)

use crate::value_models::ConfigValue;
use serde::Deserialize;
use serde::Serialize;

fn default_fixed() -> bool {
    true
}

/// One option declaration as written in a manifest.
///
/// # Example
///
/// ```toml
/// [[options]]
/// title = "batch_size"
/// datatype = "int"
/// default = 16
/// info = "Number of images processed per iteration."
/// rounding = 1
/// min_max = [1, 256]
/// fixed = false
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OptionManifest {
    /// Option key, unique within its section.
    pub title: String,

    /// Declared value type name. Inferred from `default` when omitted.
    #[serde(default)]
    pub datatype: Option<String>,

    /// Default value written to a freshly generated file.
    pub default: ConfigValue,

    /// Help text rendered as a comment block above the option.
    #[serde(alias = "helptext")]
    pub info: String,

    /// Decimal places for floats, step interval for integers.
    #[serde(default)]
    pub rounding: Option<u32>,

    /// Inclusive `(min, max)` bounds for numeric options.
    #[serde(default)]
    pub min_max: Option<(f64, f64)>,

    /// Valid selections. Empty means unconstrained.
    #[serde(default)]
    pub choices: Vec<String>,

    /// UI hint: render choices as radio buttons.
    #[serde(default)]
    pub gui_radio: bool,

    /// Whether the value is locked once an artifact has been created.
    #[serde(default = "default_fixed")]
    pub fixed: bool,

    /// UI grouping label.
    #[serde(default)]
    pub group: Option<String>,
}

/// Contents of a `<name>_defaults` manifest.
///
/// For Markdown manifests the `help` text comes from the document body and the
/// front matter carries only `options`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DefaultsManifest {
    /// Section-level help text.
    #[serde(default, alias = "helptext")]
    pub help: String,

    /// Ordered option declarations.
    #[serde(default)]
    pub options: Vec<OptionManifest>,
}

/// One section of a family manifest.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SectionManifest {
    pub name: String,

    #[serde(alias = "helptext")]
    pub help: String,

    #[serde(default)]
    pub options: Vec<OptionManifest>,
}

/// Contents of a plugin family's `_config` manifest.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct FamilyManifest {
    #[serde(default)]
    pub sections: Vec<SectionManifest>,
}
