/*!
 * SubStation Alpha v4.00+ reader and writer.
 *
 * The reader keeps the native style table, per-event style references and
 * override fragments as they appear in the file, trimming only the padding
 * around name-like fields. The writer renders
 * a document as script info, styles and events, in that order.
 */

use std::fmt;
use std::str::FromStr;

use crate::errors::{ParseError, SerializeError};
use crate::subtitle::formats::{parse_clock, SubtitleFormat};
use crate::subtitle::model::{
    Color, EventKind, StyleDefinition, SubtitleDocument, SubtitleEvent, TimeCode,
};

const FORMAT: SubtitleFormat = SubtitleFormat::Ass;

/// Field order of a `[V4+ Styles]` record
pub const STYLE_FIELDS: [&str; 23] = [
    "Name", "Fontname", "Fontsize", "PrimaryColour", "SecondaryColour", "OutlineColour",
    "BackColour", "Bold", "Italic", "Underline", "StrikeOut", "ScaleX", "ScaleY", "Spacing",
    "Angle", "BorderStyle", "Outline", "Shadow", "Alignment", "MarginL", "MarginR", "MarginV",
    "Encoding",
];

/// Field order of an `[Events]` record
pub const EVENT_FIELDS: [&str; 10] = [
    "Layer", "Start", "End", "Style", "Name", "MarginL", "MarginR", "MarginV", "Effect", "Text",
];

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    None,
    ScriptInfo,
    Styles,
    Events,
    Other,
}

/// Parse ASS content into a document
pub fn parse(content: &str) -> Result<SubtitleDocument, ParseError> {
    let mut document = SubtitleDocument::new();
    let mut section = Section::None;
    let mut style_format = normalize_format(&STYLE_FIELDS);
    let mut event_format = normalize_format(&EVENT_FIELDS);

    for (index, raw) in content.lines().enumerate() {
        let line_number = index + 1;
        let line = raw.trim_start();
        if line.trim_end().is_empty() || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line.trim_end(), line_number)?;
            continue;
        }

        let Some((descriptor, body)) = line.split_once(':') else {
            continue;
        };
        let descriptor = descriptor.trim();

        match section {
            Section::ScriptInfo => {
                if !descriptor.starts_with('!') {
                    document.info.set(descriptor, body.trim());
                }
            }
            Section::Styles => match descriptor {
                "Format" => style_format = parse_format_line(body),
                "Style" => {
                    let style = parse_style(body, &style_format, line_number)?;
                    document.insert_style(style);
                }
                _ => {}
            },
            Section::Events => match descriptor {
                "Format" => event_format = parse_format_line(body),
                "Dialogue" | "Comment" => {
                    let kind = if descriptor == "Dialogue" {
                        EventKind::Dialogue
                    } else {
                        EventKind::Comment
                    };
                    let event = parse_event(kind, body, &event_format, line_number)?;
                    document.events.push(event);
                }
                _ => {}
            },
            Section::None | Section::Other => {}
        }
    }

    Ok(document)
}

fn parse_section_header(line: &str, line_number: usize) -> Result<Section, ParseError> {
    let name = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| ParseError::Malformed {
            format: FORMAT,
            line: line_number,
            message: format!("unterminated section header '{}'", line),
        })?;

    Ok(match name.trim().to_ascii_lowercase().as_str() {
        "script info" => Section::ScriptInfo,
        "v4+ styles" | "v4 styles" | "v4 styles+" => Section::Styles,
        "events" => Section::Events,
        _ => Section::Other,
    })
}

fn normalize_format(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.trim().to_ascii_lowercase()).collect()
}

fn parse_format_line(body: &str) -> Vec<String> {
    body.split(',').map(|f| f.trim().to_ascii_lowercase()).collect()
}

/// Split a record body into exactly as many fields as its format names.
/// The last field keeps any remaining commas.
fn split_record<'a>(body: &'a str, format: &[String], line: usize) -> Result<Vec<&'a str>, ParseError> {
    let fields: Vec<&str> = body.splitn(format.len(), ',').collect();
    if fields.len() < format.len() {
        return Err(ParseError::Malformed {
            format: FORMAT,
            line,
            message: format!("expected {} fields, found {}", format.len(), fields.len()),
        });
    }
    Ok(fields)
}

fn parse_style(body: &str, format: &[String], line: usize) -> Result<StyleDefinition, ParseError> {
    let fields = split_record(body, format, line)?;
    let mut style = StyleDefinition::new("");

    for (key, raw) in format.iter().zip(fields) {
        let value = raw.trim();
        match key.as_str() {
            "name" => style.name = value.to_string(),
            "fontname" => style.fontname = value.to_string(),
            "fontsize" => style.fontsize = number(value, key, line)?,
            "primarycolour" => style.primary_color = color(value, key, line)?,
            "secondarycolour" => style.secondary_color = color(value, key, line)?,
            "outlinecolour" | "tertiarycolour" => style.outline_color = color(value, key, line)?,
            "backcolour" => style.back_color = color(value, key, line)?,
            "bold" => style.bold = flag(value, key, line)?,
            "italic" => style.italic = flag(value, key, line)?,
            "underline" => style.underline = flag(value, key, line)?,
            "strikeout" => style.strike_out = flag(value, key, line)?,
            "scalex" => style.scale_x = number(value, key, line)?,
            "scaley" => style.scale_y = number(value, key, line)?,
            "spacing" => style.spacing = number(value, key, line)?,
            "angle" => style.angle = number(value, key, line)?,
            "borderstyle" => style.border_style = integer(value, key, line)?,
            "outline" => style.outline = number(value, key, line)?,
            "shadow" => style.shadow = number(value, key, line)?,
            "alignment" => style.alignment = integer(value, key, line)?,
            "marginl" => style.margin_l = integer(value, key, line)?,
            "marginr" => style.margin_r = integer(value, key, line)?,
            "marginv" => style.margin_v = integer(value, key, line)?,
            "encoding" => style.encoding = integer(value, key, line)?,
            _ => {}
        }
    }

    Ok(style)
}

fn parse_event(
    kind: EventKind,
    body: &str,
    format: &[String],
    line: usize,
) -> Result<SubtitleEvent, ParseError> {
    let fields = split_record(body, format, line)?;
    let mut event = SubtitleEvent::new(TimeCode::ZERO, TimeCode::ZERO, "", "");
    event.kind = kind;

    for (key, raw) in format.iter().zip(fields) {
        match key.as_str() {
            "layer" => event.layer = integer(raw.trim(), key, line)?,
            "start" => event.start = timecode(raw, line)?,
            "end" => event.end = timecode(raw, line)?,
            "style" => event.style = raw.trim().to_string(),
            "name" | "actor" => event.actor = raw.trim().to_string(),
            "marginl" => event.margin_l = integer(raw.trim(), key, line)?,
            "marginr" => event.margin_r = integer(raw.trim(), key, line)?,
            "marginv" => event.margin_v = integer(raw.trim(), key, line)?,
            "effect" => event.effect = raw.trim().to_string(),
            // Opaque: override fragments and spacing are kept byte for byte
            "text" => event.text = raw.to_string(),
            _ => {}
        }
    }

    Ok(event)
}

fn malformed_field(field: &str, value: &str, line: usize) -> ParseError {
    ParseError::Malformed {
        format: FORMAT,
        line,
        message: format!("invalid {} value '{}'", field, value),
    }
}

fn number<T: FromStr>(value: &str, field: &str, line: usize) -> Result<T, ParseError> {
    value.parse().map_err(|_| malformed_field(field, value, line))
}

/// Integer fields sometimes carry a decimal point in the wild.
/// The fraction is dropped (truncated toward zero), so `10.7` reads as `10`.
fn integer(value: &str, field: &str, line: usize) -> Result<i32, ParseError> {
    value
        .parse::<i32>()
        .or_else(|_| value.parse::<f64>().map(|v| v as i32))
        .map_err(|_| malformed_field(field, value, line))
}

fn flag(value: &str, field: &str, line: usize) -> Result<bool, ParseError> {
    match integer(value, field, line)? {
        0 => Ok(false),
        -1 | 1 => Ok(true),
        _ => Err(malformed_field(field, value, line)),
    }
}

fn color(value: &str, field: &str, line: usize) -> Result<Color, ParseError> {
    Color::parse(value).ok_or_else(|| malformed_field(field, value, line))
}

fn timecode(value: &str, line: usize) -> Result<TimeCode, ParseError> {
    parse_clock(value).ok_or_else(|| ParseError::Timecode {
        format: FORMAT,
        line,
        value: value.trim().to_string(),
    })
}

/// Render a document as ASS bytes.
///
/// Fails only when the document holds values the format cannot express.
pub fn write_document(document: &SubtitleDocument) -> Result<Vec<u8>, SerializeError> {
    Ok(to_ass_string(document)?.into_bytes())
}

/// Render a document as ASS text
pub fn to_ass_string(document: &SubtitleDocument) -> Result<String, SerializeError> {
    check_representable(document)?;
    Ok(AssScript(document).to_string())
}

fn has_separator(value: &str) -> bool {
    value.contains([',', '\n', '\r'])
}

/// First free-text field of `style` that cannot sit in a `Style:` record
pub(crate) fn unwritable_style_field(style: &StyleDefinition) -> Option<&'static str> {
    [("Name", &style.name), ("Fontname", &style.fontname)]
        .into_iter()
        .find(|(_, value)| has_separator(value))
        .map(|(field, _)| field)
}

fn check_representable(document: &SubtitleDocument) -> Result<(), SerializeError> {
    for style in document.styles.values() {
        if let Some(field) = unwritable_style_field(style) {
            return Err(SerializeError::InvalidStyleField { style: style.name.clone(), field });
        }
    }

    for (index, event) in document.events.iter().enumerate() {
        for time in [event.start, event.end] {
            if time.is_negative() {
                return Err(SerializeError::NegativeTimecode { index, millis: time.millis() });
            }
        }
        let fields = [("Style", &event.style), ("Name", &event.actor), ("Effect", &event.effect)];
        if let Some((field, _)) = fields.into_iter().find(|(_, value)| has_separator(value)) {
            return Err(SerializeError::InvalidEventField { index, field });
        }
        if event.text.contains(['\n', '\r']) {
            return Err(SerializeError::LineBreakInText { index });
        }
    }

    Ok(())
}

/// Display adapter over a validated document
struct AssScript<'a>(&'a SubtitleDocument);

impl fmt::Display for AssScript<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let document = self.0;

        writeln!(f, "[Script Info]")?;
        writeln!(f, "; Script generated by substyler")?;
        writeln!(f, "ScriptType: v4.00+")?;
        for (key, value) in document.info.iter().filter(|(k, _)| *k != "ScriptType") {
            writeln!(f, "{}: {}", key, value)?;
        }
        writeln!(f)?;

        writeln!(f, "[V4+ Styles]")?;
        writeln!(f, "Format: {}", STYLE_FIELDS.join(", "))?;
        for style in document.styles.values() {
            write_style(f, style)?;
        }
        writeln!(f)?;

        writeln!(f, "[Events]")?;
        writeln!(f, "Format: {}", EVENT_FIELDS.join(", "))?;
        for event in &document.events {
            writeln!(
                f,
                "{}: {},{},{},{},{},{},{},{},{},{}",
                event.kind.descriptor(),
                event.layer,
                format_timecode(event.start),
                format_timecode(event.end),
                event.style,
                event.actor,
                event.margin_l,
                event.margin_r,
                event.margin_v,
                event.effect,
                event.text
            )?;
        }
        Ok(())
    }
}

fn write_style(f: &mut fmt::Formatter<'_>, style: &StyleDefinition) -> fmt::Result {
    writeln!(
        f,
        "Style: {},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
        style.name,
        style.fontname,
        format_number(style.fontsize),
        style.primary_color,
        style.secondary_color,
        style.outline_color,
        style.back_color,
        format_flag(style.bold),
        format_flag(style.italic),
        format_flag(style.underline),
        format_flag(style.strike_out),
        format_number(style.scale_x),
        format_number(style.scale_y),
        format_number(style.spacing),
        format_number(style.angle),
        style.border_style,
        format_number(style.outline),
        format_number(style.shadow),
        style.alignment,
        style.margin_l,
        style.margin_r,
        style.margin_v,
        style.encoding
    )
}

/// `H:MM:SS.cc`, rounded to the nearest centisecond
pub fn format_timecode(time: TimeCode) -> String {
    let centis = (time.millis() + 5) / 10;
    let hours = centis / 360_000;
    let minutes = (centis % 360_000) / 6_000;
    let seconds = (centis % 6_000) / 100;
    format!("{}:{:02}:{:02}.{:02}", hours, minutes, seconds, centis % 100)
}

/// Shortest decimal form: `42`, `31.733`
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

fn format_flag(value: bool) -> &'static str {
    if value { "-1" } else { "0" }
}
