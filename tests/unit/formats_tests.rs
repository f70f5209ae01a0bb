/*!
 * Tests for the subtitle format readers and the ASS writer
 */

use substyler::errors::ParseError;
use substyler::subtitle::formats::{self, ass};
use substyler::subtitle::{EventKind, SubtitleFormat, TimeCode, DEFAULT_STYLE_NAME};
use crate::common;

/// Test SRT reading through the format dispatcher
#[test]
fn test_parse_withSampleSrt_shouldProduceThreeDefaultStyledEvents() {
    let doc = formats::parse(common::SAMPLE_SRT.as_bytes(), SubtitleFormat::Srt).unwrap();

    assert_eq!(doc.events.len(), 3);
    assert!(doc.events.iter().all(|e| e.style == DEFAULT_STYLE_NAME));
    assert!(doc.events.iter().all(|e| e.kind == EventKind::Dialogue));
    assert_eq!(doc.events[1].start, TimeCode::from_millis(5_000));
    assert_eq!(doc.events[1].end, TimeCode::from_millis(9_000));
    assert_eq!(doc.events[1].text, "It contains {\\i1}multiple{\\i0} entries.");
    assert!(doc.style(DEFAULT_STYLE_NAME).is_some());
}

/// Test WebVTT reading with identifiers, notes and cue settings
#[test]
fn test_parse_withSampleVtt_shouldSkipNotesAndJoinLines() {
    let doc = formats::parse(common::SAMPLE_VTT.as_bytes(), SubtitleFormat::Vtt).unwrap();

    assert_eq!(doc.events.len(), 2);
    assert_eq!(doc.events[0].end, TimeCode::from_millis(4_000));
    assert_eq!(doc.events[0].text, "This is a test subtitle.");
    assert_eq!(doc.events[1].text, "Two lines\\Nof text");
}

/// Test ASS reading keeps styles, metadata and override fragments
#[test]
fn test_parse_withSampleAss_shouldKeepStylesAndOverrides() {
    let doc = formats::parse(common::SAMPLE_ASS.as_bytes(), SubtitleFormat::Ass).unwrap();

    assert_eq!(doc.info.get("Title"), Some("Fixture"));
    assert_eq!(doc.info.play_resolution(), Some((640, 360)));
    assert_eq!(doc.styles.len(), 2);
    assert!(doc.style("Sign").map(|s| s.bold).unwrap_or(false));
    assert_eq!(doc.events.len(), 5);
    assert_eq!(doc.events[2].text, "{\\pos(320,40)}Shop sign");
}

/// Test that a byte order mark does not disturb the first block
#[test]
fn test_parse_withUtf8Bom_shouldIgnoreIt() {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(common::SAMPLE_SRT.as_bytes());

    let doc = formats::parse(&bytes, SubtitleFormat::Srt).unwrap();
    assert_eq!(doc.events.len(), 3);
}

/// Test that undecodable bytes are an encoding error for the declared format
#[test]
fn test_parse_withInvalidUtf8_shouldReportEncoding() {
    let err = formats::parse(&[0x31, 0x0A, 0xFF, 0xFE], SubtitleFormat::Vtt).unwrap_err();

    assert!(matches!(err, ParseError::Encoding { .. }));
    assert_eq!(err.format(), SubtitleFormat::Vtt);
    assert_eq!(err.line(), None);
}

/// Test malformed timing lines carry a line number
#[test]
fn test_parse_withBadSrtTimecode_shouldPointAtLine() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\nok\n\n2\n00:00:xx,000 --> 00:00:04,000\nbad\n";
    let err = formats::parse(content.as_bytes(), SubtitleFormat::Srt).unwrap_err();

    assert!(matches!(err, ParseError::Timecode { .. }));
    assert_eq!(err.line(), Some(6));
}

/// Test hour fields too large for a millisecond count are rejected in every format
#[test]
fn test_parse_withThirteenDigitHours_shouldReportTimecode() {
    let cases = [
        (SubtitleFormat::Srt, "1\n9999999999999:00:00,000 --> 9999999999999:00:01,000\nx\n", 2),
        (SubtitleFormat::Vtt, "WEBVTT\n\n9999999999999:00:00.000 --> 9999999999999:00:01.000\nx\n", 3),
        (SubtitleFormat::Ass, "[Events]\nDialogue: 0,9999999999999:00:00.00,0:00:01.00,Default,,0,0,0,,x\n", 2),
    ];

    for (format, content, line) in cases {
        let err = formats::parse(content.as_bytes(), format).unwrap_err();
        assert!(matches!(err, ParseError::Timecode { .. }), "{}: {:?}", format, err);
        assert_eq!(err.line(), Some(line), "{}", format);
    }
}

/// Test writing a parsed document emits one record per event in order
#[test]
fn test_writeDocument_withParsedSrt_shouldEmitCentisecondRecords() {
    let doc = formats::parse(common::SAMPLE_SRT.as_bytes(), SubtitleFormat::Srt).unwrap();
    let script = String::from_utf8(ass::write_document(&doc).unwrap()).unwrap();

    let events = common::event_lines(&script);
    assert_eq!(events.len(), 3);
    assert_eq!(events[0], "Dialogue: 0,0:00:01.00,0:00:04.00,Default,,0,0,0,,This is a test subtitle.");
    assert!(script.starts_with("[Script Info]\n"));
    assert!(script.contains("\n[V4+ Styles]\n"));
    assert!(script.contains("\n[Events]\n"));
}

/// Test that an ASS script survives a write and re-read
#[test]
fn test_writeDocument_thenParse_shouldPreserveCountOrderAndStyles() {
    let original = formats::parse(common::SAMPLE_ASS.as_bytes(), SubtitleFormat::Ass).unwrap();
    let bytes = ass::write_document(&original).unwrap();
    let reread = formats::parse(&bytes, SubtitleFormat::Ass).unwrap();

    assert_eq!(reread.events.len(), original.events.len());
    for (a, b) in original.events.iter().zip(&reread.events) {
        assert_eq!(a.style, b.style);
        assert_eq!(a.text, b.text);
        assert_eq!(a.start, b.start);
    }
    let names: Vec<_> = reread.styles.keys().collect();
    assert_eq!(names, vec!["Default", "Sign"]);
}
