//! Locale independent formatting of exported values
//!
//! All exports must be identical no matter on which machine they are
//! created. The wrappers in this module implement [`Display`] and are used
//! directly in `write!` calls:
//!
//! ```
//! use revigo_export::format::{Float, OptionalFloat, Quoted};
//!
//! assert_eq!(Float(0.85).to_string(), "0.85");
//! assert_eq!(Float(85.0).to_string(), "85");
//! assert_eq!(Float(-0.000012).to_string(), "-0.000012");
//! assert_eq!(OptionalFloat(None).to_string(), "null");
//! assert_eq!(Quoted("cell \"cycle\"").to_string(), "\"cell cycle\"");
//! ```
use std::fmt::Display;

/// Literal used for missing values
pub const NULL: &str = "null";

/// Formats a float with the shortest representation that parses back to
/// the same value, using `.` as decimal separator and no exponent
///
/// Integral values are written without decimals (`1`, not `1.0`).
/// Non-finite values are written as `NaN`, `Infinity` and `-Infinity`.
#[derive(Debug, Clone, Copy)]
pub struct Float(pub f64);

impl Display for Float {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = self.0;
        if value.is_nan() {
            f.write_str("NaN")
        } else if value.is_infinite() {
            f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" })
        } else {
            write!(f, "{value}")
        }
    }
}

/// Formats an optional float, missing values are written as `null`
#[derive(Debug, Clone, Copy)]
pub struct OptionalFloat(pub Option<f64>);

impl Display for OptionalFloat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(value) => Float(value).fmt(f),
            None => f.write_str(NULL),
        }
    }
}

/// Wraps a text field in double quotes
///
/// Double quotes inside the text are removed, there is no other escaping.
#[derive(Debug, Clone, Copy)]
pub struct Quoted<'a>(pub &'a str);

impl Display for Quoted<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("\"")?;
        for part in self.0.split('"') {
            f.write_str(part)?;
        }
        f.write_str("\"")
    }
}

/// Removes single quotes from a word before it is added to a word cloud
pub fn strip_single_quotes(word: &str) -> String {
    word.replace('\'', "")
}
