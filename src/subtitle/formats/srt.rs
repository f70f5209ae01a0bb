use crate::errors::ParseError;
use crate::subtitle::formats::{markup_to_ass, parse_timing_line, SubtitleFormat};
use crate::subtitle::model::{SubtitleDocument, SubtitleEvent, DEFAULT_STYLE_NAME};

// @module: SubRip reader

const FORMAT: SubtitleFormat = SubtitleFormat::Srt;

/// Parse SRT content into a document.
///
/// Blocks are separated by blank lines. Each block is an optional sequence
/// number, a timing line and zero or more text lines. Source order is kept
/// as-is; sequence numbers are not used for ordering.
pub fn parse(content: &str) -> Result<SubtitleDocument, ParseError> {
    let lines: Vec<&str> = content.lines().collect();
    let mut document = SubtitleDocument::with_default_style();
    let mut index = 0;

    while index < lines.len() {
        // Skip blank separators
        if lines[index].trim().is_empty() {
            index += 1;
            continue;
        }

        let block_start = index;
        let mut line = lines[index].trim();

        // Optional sequence number
        if !line.contains("-->") && line.chars().all(|c| c.is_ascii_digit()) {
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
                    message: format!("expected a timing line, found '{}'", line),
                })
            }
        };
        index += 1;

        // @collects: Text lines up to the next blank line
        let mut text_lines = Vec::new();
        while let Some(text) = lines.get(index) {
            if text.trim().is_empty() {
                break;
            }
            text_lines.push(text.trim_end());
            index += 1;
        }

        document.events.push(SubtitleEvent::new(
            start,
            end,
            DEFAULT_STYLE_NAME,
            markup_to_ass(&text_lines),
        ));
    }

    Ok(document)
}
