use crate::errors::ParseError;
use crate::subtitle::formats::{markup_to_ass, parse_timing_line, SubtitleFormat};
use crate::subtitle::model::{SubtitleDocument, SubtitleEvent, DEFAULT_STYLE_NAME};

// @module: WebVTT reader

const FORMAT: SubtitleFormat = SubtitleFormat::Vtt;

/// Parse WebVTT content into a document.
///
/// Cue settings, `NOTE`, `STYLE` and `REGION` blocks are dropped. Cue text
/// goes through the same markup conversion as SRT.
pub fn parse(content: &str) -> Result<SubtitleDocument, ParseError> {
    let lines: Vec<&str> = content.lines().collect();
    let mut document = SubtitleDocument::with_default_style();

    let mut index = skip_blank(&lines, 0);
    let header = lines.get(index).map(|l| l.trim()).unwrap_or("");
    if !is_signature(header) {
        return Err(ParseError::Malformed {
            format: FORMAT,
            line: index + 1,
            message: "missing WEBVTT signature".to_string(),
        });
    }
    index = skip_block(&lines, index);

    loop {
        index = skip_blank(&lines, index);
        let Some(first) = lines.get(index).map(|l| l.trim()) else {
            break;
        };

        if is_metadata_block(first) {
            index = skip_block(&lines, index);
            continue;
        }

        let block_start = index;
        let mut line = first;

        // Optional cue identifier
        if !line.contains("-->") {
            index += 1;
            match lines.get(index).map(|l| l.trim()) {
                Some(next) if !next.is_empty() => line = next,
                _ => {
                    return Err(ParseError::Unterminated {
                        format: FORMAT,
                        line: block_start + 1,
                    })
                }
            }
        }

        let (start, end) = match parse_timing_line(line, index + 1, FORMAT) {
            Some(timing) => timing?,
            None => {
                return Err(ParseError::Malformed {
                    format: FORMAT,
                    line: index + 1,
                    message: format!("expected a cue timing line, found '{}'", line),
                })
            }
        };
        index += 1;

        let mut text_lines = Vec::new();
        while let Some(text) = lines.get(index) {
            if text.trim().is_empty() {
                break;
            }
            text_lines.push(text.trim_end());
            index += 1;
        }

        let text = decode_entities(&markup_to_ass(&text_lines));
        document
            .events
            .push(SubtitleEvent::new(start, end, DEFAULT_STYLE_NAME, text));
    }

    Ok(document)
}

fn is_signature(line: &str) -> bool {
    match line.strip_prefix("WEBVTT") {
        Some(rest) => rest.is_empty() || rest.starts_with([' ', '\t']),
        None => false,
    }
}

fn is_metadata_block(line: &str) -> bool {
    ["NOTE", "STYLE", "REGION"].iter().any(|keyword| {
        line.strip_prefix(keyword)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', '\t']))
    })
}

fn skip_blank(lines: &[&str], mut index: usize) -> usize {
    while lines.get(index).is_some_and(|l| l.trim().is_empty()) {
        index += 1;
    }
    index
}

fn skip_block(lines: &[&str], mut index: usize) -> usize {
    while lines.get(index).is_some_and(|l| !l.trim().is_empty()) {
        index += 1;
    }
    index
}

/// Resolve the character references WebVTT cue text may carry
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", "\\h")
        .replace("&lrm;", "\u{200e}")
        .replace("&rlm;", "\u{200f}")
        .replace("&amp;", "&")
}
