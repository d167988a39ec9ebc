use serde_derive::{Deserialize, Serialize};

use super::types::MarkerFieldKind;

/// The field format for marker fields of kind [`MarkerFieldKind::String`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerStringFieldFormat {
    /// A URL. Sanitization is up to whoever uploads the profile.
    Url,

    /// A file path.
    FilePath,

    /// A regular string which may be stripped when sharing profiles.
    SanitizedString,

    /// A plain string, never sanitized.
    #[serde(rename = "unique-string", alias = "string")]
    String,
}

/// The field format for marker fields of kind [`MarkerFieldKind::Number`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerNumberFieldFormat {
    /// For time data that represents a duration of time.
    /// The value is given in float milliseconds and will be displayed
    /// in a unit that is picked based on the magnitude of the number.
    /// e.g. "Label: 5s, 5ms, 5μs"
    Duration,

    /// A timestamp, relative to the start of the profile. The value is given in
    /// float milliseconds.
    ///
    ///  e.g. "Label: 15.5s, 20.5ms, 30.5μs"
    Time,

    /// Display a millisecond value as seconds, regardless of the magnitude of the number.
    ///
    /// e.g. "Label: 5s" for a value of 5000.0
    Seconds,

    /// Display a millisecond value as milliseconds, regardless of the magnitude of the number.
    ///
    /// e.g. "Label: 5ms" for a value of 5.0
    Milliseconds,

    /// Display a millisecond value as microseconds, regardless of the magnitude of the number.
    ///
    /// e.g. "Label: 5μs" for a value of 0.005
    Microseconds,

    /// Display a millisecond value as nanoseconds, regardless of the magnitude of the number.
    ///
    /// e.g. "Label: 5ns" for a value of 0.000005
    Nanoseconds,

    /// Display a bytes value in a unit that's appropriate for the number's magnitude.
    ///
    /// e.g. "Label: 5.55MB, 5 bytes, 312.5KB"
    Bytes,

    /// This should be a value between 0 and 1.
    /// e.g. "Label: 50%" for a value of 0.5
    Percentage,

    /// A generic integer number.
    /// Do not use it for time information.
    ///
    /// "Label: 52, 5,323, 1,234,567"
    Integer,

    /// A generic floating point number.
    /// Do not use it for time information.
    ///
    /// "Label: 52.23, 0.01, 123,456.78"
    Decimal,
}

/// A combined enum for the format enums of all field kinds.
///
/// Schemas written by newer producers may use formats which aren't known here
/// (`pid`, `flow-id`, `list`, ...). Those are kept as [`MarkerFieldFormat::Other`]
/// and their values are shown as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkerFieldFormat {
    String(MarkerStringFieldFormat),
    Number(MarkerNumberFieldFormat),
    Other(String),
}

impl MarkerFieldFormat {
    pub fn kind(&self) -> MarkerFieldKind {
        match self {
            Self::String(_) => MarkerFieldKind::String,
            Self::Number(_) => MarkerFieldKind::Number,
            Self::Other(_) => MarkerFieldKind::Other,
        }
    }
}

impl From<MarkerStringFieldFormat> for MarkerFieldFormat {
    fn from(format: MarkerStringFieldFormat) -> Self {
        Self::String(format)
    }
}

impl From<MarkerNumberFieldFormat> for MarkerFieldFormat {
    fn from(format: MarkerNumberFieldFormat) -> Self {
        Self::Number(format)
    }
}
