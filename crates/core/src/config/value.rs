//! Typed reads of persisted option text.

use crate::config::error::{ConfigError, ConfigResult};
use pc_protocol::{ConfigValue, ValueType};

/// Whether stored text is the `none` sentinel (any case).
pub fn is_none_literal(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("none")
}

/// Parses a multi-select value.
///
/// Items are comma-separated when the text holds a comma, whitespace-separated
/// otherwise. Each item is trimmed and lowercased.
///
/// # Example
///
/// ```
/// use pc_core::config::value::parse_list;
///
/// assert_eq!(parse_list("A,b , C"), vec!["a", "b", "c"]);
/// assert_eq!(parse_list("x y"), vec!["x", "y"]);
/// assert!(parse_list("").is_empty());
/// ```
pub fn parse_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    if raw.contains(',') {
        raw.split(',')
            .map(|item| item.trim().to_lowercase())
            .collect()
    } else {
        raw.split_whitespace().map(str::to_lowercase).collect()
    }
}

/// Parses boolean text: `1/yes/true/on` and `0/no/false/off`, any case.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Converts stored text into a value of the declared type.
///
/// Returns `Ok(None)` for the `none` sentinel, whatever the declared type.
pub fn parse_value(
    section: &str,
    option: &str,
    raw: &str,
    datatype: ValueType,
) -> ConfigResult<Option<ConfigValue>> {
    if is_none_literal(raw) {
        return Ok(None);
    }

    let invalid = |expected: &'static str| ConfigError::InvalidValue {
        section: section.to_string(),
        option: option.to_string(),
        value: raw.to_string(),
        expected,
    };

    let value = match datatype {
        ValueType::Text => ConfigValue::Text(raw.to_string()),
        ValueType::Bool => ConfigValue::Bool(parse_bool(raw).ok_or_else(|| invalid("a boolean"))?),
        ValueType::Int => ConfigValue::Int(
            raw.trim()
                .parse::<i64>()
                .map_err(|_| invalid("an integer"))?,
        ),
        ValueType::Float => ConfigValue::Float(
            raw.trim()
                .parse::<f64>()
                .map_err(|_| invalid("a decimal number"))?,
        ),
        ValueType::List => ConfigValue::List(parse_list(raw)),
    };
    Ok(Some(value))
}

/// Brings a declared default in line with its declared type.
///
/// The default's persisted form is read back as `datatype`, so the result is
/// exactly what a freshly generated file yields on read. Integers widen to
/// floats, anything becomes text, and text defaults for list options are split
/// with [`parse_list`]. A `none` default is kept as declared.
///
/// # Errors
///
/// Returns `ConfigError::InvalidDefault` if the persisted form does not parse
/// as `datatype`, e.g. `1.5` or `True` for an integer option.
pub fn coerce_default(
    section: &str,
    title: &str,
    default: ConfigValue,
    datatype: ValueType,
) -> ConfigResult<ConfigValue> {
    let raw = default.to_string();
    match parse_value(section, title, &raw, datatype) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Ok(default),
        Err(_) => Err(ConfigError::InvalidDefault {
            section: section.to_string(),
            title: title.to_string(),
            value: raw,
            datatype,
        }),
    }
}
