//! Help text assembly and comment-block formatting.

use pc_protocol::{format_float, ConfigValue, ValueType};

/// Column width that comment blocks are wrapped to.
pub const HELP_WIDTH: usize = 100;

/// Leading text of a nested bullet line.
const BULLET_INDENT: &str = "    - ";

/// Hanging indent of a wrapped bullet's continuation lines.
const BULLET_CONTINUATION: &str = "        ";

/// Appends the generated notes (mutability, list syntax, valid values and the
/// default) to an option's help text.
pub fn expand_helptext(
    info: &str,
    choices: &[String],
    default: &ConfigValue,
    datatype: ValueType,
    min_max: Option<(f64, f64)>,
    fixed: bool,
) -> String {
    let mut helptext = format!("{info}\n");
    if !fixed {
        helptext.push_str("\nThis option can be updated for existing models.\n");
    }
    if datatype == ValueType::List {
        helptext.push_str(
            "\nIf selecting multiple options then each option should be separated by a space or \
             a comma (e.g. item1, item2, item3)\n",
        );
    }
    if !choices.is_empty() {
        helptext.push_str(&format!("\nChoose from: {}", choices.join(", ")));
    } else if datatype == ValueType::Bool {
        helptext.push_str("\nChoose from: True, False");
    } else if let Some((min, max)) = min_max {
        match datatype {
            ValueType::Int => helptext.push_str(&format!(
                "\nSelect an integer between {} and {}",
                min.round() as i64,
                max.round() as i64
            )),
            ValueType::Float => helptext.push_str(&format!(
                "\nSelect a decimal number between {} and {}",
                format_float(min),
                format_float(max)
            )),
            _ => {}
        }
    }
    helptext.push_str(&format!("\n[Default: {default}]"));
    helptext
}

/// Renders help text as a `# ` prefixed comment block.
///
/// Each source line is wrapped to [`HELP_WIDTH`]. Lines starting with a tab
/// become nested bullets whose continuation lines hang under the bullet text.
/// Section help is upper-cased; option help gets a leading blank line.
pub fn format_help(helptext: &str, is_section: bool) -> String {
    let mut lines = Vec::new();
    for line in helptext.split('\n') {
        let wrapped = match line.strip_prefix('\t') {
            Some(rest) => {
                let rest = rest.trim();
                if rest.is_empty() {
                    "    -".to_string()
                } else {
                    let options = textwrap::Options::new(HELP_WIDTH)
                        .initial_indent(BULLET_INDENT)
                        .subsequent_indent(BULLET_CONTINUATION);
                    textwrap::fill(rest, options)
                }
            }
            None => textwrap::fill(line, HELP_WIDTH),
        };
        lines.push(wrapped);
    }
    let block = format!("# {}", lines.join("\n").replace('\n', "\n# "));
    if is_section {
        block.to_uppercase()
    } else {
        format!("\n{block}")
    }
}
