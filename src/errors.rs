/*!
 * Error types for the substyler conversion core.
 *
 * Every failure the core can produce is a typed value returned to the
 * caller, using the thiserror crate for ergonomic error definitions. The
 * application layer wraps them in `anyhow` with file context.
 */

use thiserror::Error;

use crate::subtitle::SubtitleFormat;

/// Errors that can occur while reading a source subtitle file
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Input bytes are not valid UTF-8
    #[error("{format} input is not valid UTF-8 text: {reason}")]
    Encoding {
        format: SubtitleFormat,
        reason: String,
    },

    /// A timestamp could not be read
    #[error("{format} line {line}: malformed timecode '{value}'")]
    Timecode {
        format: SubtitleFormat,
        /// 1-based line number
        line: usize,
        value: String,
    },

    /// A line does not have the shape its position requires
    #[error("{format} line {line}: {message}")]
    Malformed {
        format: SubtitleFormat,
        line: usize,
        message: String,
    },

    /// A block ends before it carried its timing line
    #[error("{format} block starting at line {line} is unterminated")]
    Unterminated {
        format: SubtitleFormat,
        line: usize,
    },
}

impl ParseError {
    /// Source format the error was raised for
    pub fn format(&self) -> SubtitleFormat {
        match self {
            Self::Encoding { format, .. }
            | Self::Timecode { format, .. }
            | Self::Malformed { format, .. }
            | Self::Unterminated { format, .. } => *format,
        }
    }

    /// Offending 1-based line, when known
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Encoding { .. } => None,
            Self::Timecode { line, .. }
            | Self::Malformed { line, .. }
            | Self::Unterminated { line, .. } => Some(*line),
        }
    }
}

/// Defects in theme catalog data. These never come from user input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// The rule needs a primary style but the theme defines none
    #[error("theme '{theme}' uses rule {rule} but defines no styles")]
    EmptyStyleSet { theme: String, rule: String },

    /// Two themes share an id
    #[error("theme '{0}' is defined more than once")]
    DuplicateTheme(String),

    /// The configured default theme is not in the catalog
    #[error("default theme '{0}' is not defined in the catalog")]
    MissingDefaultTheme(String),

    /// A zero width or height
    #[error("theme '{theme}' has an invalid resolution {width}x{height}")]
    InvalidResolution { theme: String, width: u32, height: u32 },

    /// A style field the ASS writer cannot express
    #[error("theme '{theme}' style '{style}' has a {field} containing a comma or line break")]
    UnwritableStyle { theme: String, style: String, field: &'static str },

    /// Unbalanced override brackets in a card template
    #[error("override template '{template}' is malformed: {reason}")]
    MalformedTemplate { template: String, reason: String },

    /// Catalog data could not be decoded
    #[error("invalid theme catalog: {0}")]
    Invalid(String),
}

/// Errors raised when a document cannot be written as ASS
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SerializeError {
    /// An event starts or ends before zero
    #[error("event {index} has a negative timecode ({millis} ms)")]
    NegativeTimecode { index: usize, millis: i64 },

    /// A style field that would break the record layout
    #[error("style '{style}' field '{field}' cannot be written (contains a comma or line break)")]
    InvalidStyleField { style: String, field: &'static str },

    /// A raw line break inside event text
    #[error("event {index} text contains a raw line break")]
    LineBreakInText { index: usize },

    /// A comma or line break in a non-text event field
    #[error("event {index} field '{field}' cannot be written (contains a comma or line break)")]
    InvalidEventField { index: usize, field: &'static str },
}

/// Top-level error for a single conversion request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// Declared extension is not srt, vtt or ass
    #[error("Unsupported subtitle format '{0}' (expected .srt, .vtt or .ass)")]
    UnsupportedFormat(String),

    /// Source file could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// The resolved theme is misconfigured
    #[error("Theme catalog configuration fault: {0}")]
    Catalog(#[from] CatalogError),

    /// The transformed document cannot be written
    #[error("Serialize error: {0}")]
    Serialize(#[from] SerializeError),
}

impl ConversionError {
    /// True for internal configuration defects, false for bad user input
    pub fn is_configuration_fault(&self) -> bool {
        matches!(self, Self::Catalog(_))
    }
}
