/*!
 * Subtitle format adapters.
 *
 * - `srt`: SubRip (simple-timed-text) reader
 * - `vtt`: WebVTT (web-timed-text) reader
 * - `ass`: SubStation Alpha v4.00+ reader and writer
 */

use std::fmt;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::errors::ParseError;
use crate::subtitle::model::{SubtitleDocument, TimeCode};

pub mod ass;
pub mod srt;
pub mod vtt;

// @const: Clock timestamp with optional hours and optional fraction
static CLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(\d+):)?(\d{1,2}):(\d{1,2})(?:[,.](\d{1,3}))?$").unwrap()
});

// @const: HTML-style markup tag
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(/?)([A-Za-z]*)[^<>]*>").unwrap()
});

/// Source formats the converter accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubtitleFormat {
    Srt,
    Vtt,
    Ass,
}

impl SubtitleFormat {
    /// Resolve a file extension, with or without the leading dot
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.trim().trim_start_matches('.');
        match extension.to_ascii_lowercase().as_str() {
            "srt" => Some(Self::Srt),
            "vtt" => Some(Self::Vtt),
            "ass" => Some(Self::Ass),
            _ => None,
        }
    }

    /// Resolve the format of a file from its extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Vtt => "vtt",
            Self::Ass => "ass",
        }
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Srt => "SRT",
            Self::Vtt => "WebVTT",
            Self::Ass => "ASS",
        };
        f.write_str(name)
    }
}

/// Parse raw file bytes in the given format
pub fn parse(bytes: &[u8], format: SubtitleFormat) -> Result<SubtitleDocument, ParseError> {
    let content = decode(bytes, format)?;
    match format {
        SubtitleFormat::Srt => srt::parse(content),
        SubtitleFormat::Vtt => vtt::parse(content),
        SubtitleFormat::Ass => ass::parse(content),
    }
}

/// Decode UTF-8 input, dropping a byte order mark
fn decode(bytes: &[u8], format: SubtitleFormat) -> Result<&str, ParseError> {
    let content = std::str::from_utf8(bytes).map_err(|e| ParseError::Encoding {
        format,
        reason: e.to_string(),
    })?;
    Ok(content.strip_prefix('\u{feff}').unwrap_or(content))
}

/// Parse a clock timestamp such as `01:02:03,456`, `02:03.456` or `0:00:01.50`.
///
/// The fraction is read as a decimal fraction of a second, so `.5`, `.50`
/// and `.500` all mean 500 ms. Hour values too large to represent in
/// milliseconds are rejected.
pub(crate) fn parse_clock(value: &str) -> Option<TimeCode> {
    let caps = CLOCK_REGEX.captures(value.trim())?;
    let hours: i64 = caps.get(1).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
    let minutes: i64 = caps[2].parse().ok()?;
    let seconds: i64 = caps[3].parse().ok()?;
    if minutes >= 60 || seconds >= 60 {
        return None;
    }
    let millis = match caps.get(4) {
        Some(fraction) => {
            let digits = fraction.as_str();
            let value: i64 = digits.parse().ok()?;
            value * 10_i64.pow(3 - digits.len() as u32)
        }
        None => 0,
    };
    TimeCode::from_hms(hours, minutes, seconds, millis)
}

/// Parse a `start --> end [settings]` line shared by SRT and WebVTT.
///
/// Returns `None` when the line carries no arrow at all, so callers can tell
/// a missing timing line from a malformed one.
pub(crate) fn parse_timing_line(
    line: &str,
    line_number: usize,
    format: SubtitleFormat,
) -> Option<Result<(TimeCode, TimeCode), ParseError>> {
    let (left, right) = line.split_once("-->")?;
    let right = right.split_whitespace().next().unwrap_or("");

    let read = |value: &str| {
        parse_clock(value).ok_or_else(|| ParseError::Timecode {
            format,
            line: line_number,
            value: value.trim().to_string(),
        })
    };

    Some(read(left).and_then(|start| read(right).map(|end| (start, end))))
}

/// Turn SRT/WebVTT cue lines into ASS event text.
///
/// Lines are joined with `\N`; basic `<i> <b> <u> <s>` markup becomes the
/// matching override fragment and every other tag is dropped.
pub(crate) fn markup_to_ass(lines: &[&str]) -> String {
    let joined = lines.join("\\N");
    TAG_REGEX
        .replace_all(&joined, |caps: &Captures| {
            let closing = &caps[1] == "/";
            match caps[2].to_ascii_lowercase().as_str() {
                tag @ ("i" | "b" | "u" | "s") => {
                    format!("{{\\{}{}}}", tag, if closing { 0 } else { 1 })
                }
                _ => String::new(),
            }
        })
        .into_owned()
}
