/*!
 * End-to-end conversion tests: source bytes through every theme rule to a
 * re-readable ASS script
 */

use substyler::converter::Converter;
use substyler::subtitle::formats;
use substyler::subtitle::{StyleDefinition, SubtitleDocument, SubtitleFormat, TimeCode, DEFAULT_STYLE_NAME};
use substyler::theme::{Resolution, RuleDescriptor, Theme, ThemeCatalog};
use crate::common;

const OVERLAY: &str = "{\\4a&H50&}";

const FOUR_LINE_SRT: &str = "1
00:00:01,000 --> 00:00:02,000
one

2
00:00:03,000 --> 00:00:04,000
two

3
00:00:05,000 --> 00:00:06,000
three

4
00:00:07,000 --> 00:00:08,000
four
";

/// Convert and read the produced script back
fn convert_and_reparse(converter: &Converter, input: &str, file_name: &str, theme: Option<&str>) -> SubtitleDocument {
    let out = converter.convert(input.as_bytes(), file_name, theme).unwrap();
    formats::parse(&out.bytes, SubtitleFormat::Ass).unwrap()
}

/// Catalog with one theme per lead-in rule, all using the single style "X"
fn lead_in_catalog() -> ThemeCatalog {
    let x = || vec![StyleDefinition::new("X")];
    ThemeCatalog::new(
        vec![
            Theme::new("Lead", Resolution::FULL_HD, x(), RuleDescriptor::TelegramLeadIn),
            Theme::new("Trim3", Resolution::FULL_HD, x(), RuleDescriptor::TrimThenLeadIn { n: 3 }),
        ],
        "Lead",
    )
    .unwrap()
}

/// Empty SRT with the default theme keeps zero events and only the default style
#[test]
fn test_convert_withEmptySrtAndDefaultTheme_shouldYieldEmptyFullHdScript() {
    let doc = convert_and_reparse(&Converter::builtin(), "", "empty.srt", None);

    assert!(doc.events.is_empty());
    assert_eq!(doc.info.play_resolution(), Some((1920, 1080)));
    let styles: Vec<_> = doc.styles.keys().map(String::as_str).collect();
    assert_eq!(styles, vec![DEFAULT_STYLE_NAME]);
}

/// Lead-in rule on a five-event ASS input
#[test]
fn test_convert_withTelegramLeadIn_shouldPrependCardUpToFirstLine() {
    let doc = convert_and_reparse(&Converter::new(lead_in_catalog()), common::SAMPLE_ASS, "ep.ass", Some("Lead"));

    assert_eq!(doc.events.len(), 6);
    assert_eq!(doc.events[0].start, TimeCode::ZERO);
    assert_eq!(doc.events[0].end, TimeCode::from_millis(2_000));
    assert!(doc.events.iter().all(|e| e.style == "X"));
    assert_eq!(doc.events[1].text, format!("{}First line", OVERLAY));
}

/// Trim rule drops three lines before adding the lead-in card
#[test]
fn test_convert_withTrimThenLeadIn_shouldDropFirstThreeLines() {
    let doc = convert_and_reparse(&Converter::new(lead_in_catalog()), common::SAMPLE_ASS, "ep.ass", Some("Trim3"));

    assert_eq!(doc.events.len(), 3);
    assert!(doc.events.iter().all(|e| e.style == "X"));
    assert_eq!(doc.events[0].end, TimeCode::from_millis(11_000));
    assert_eq!(doc.events[1].text, format!("{}Fourth line", OVERLAY));
    assert_eq!(doc.events[2].text, format!("{}Fifth line", OVERLAY));
}

/// Branded rule puts mid-roll, credit and site cards ahead of the originals
#[test]
fn test_convert_withBrandedTheme_shouldOrderMidrollCreditSite() {
    let doc = convert_and_reparse(&Converter::builtin(), FOUR_LINE_SRT, "ep.srt", Some("Pika 1080p"));

    assert_eq!(doc.events.len(), 7);

    let midroll = &doc.events[0];
    assert_eq!(midroll.style, "site");
    assert_eq!(midroll.start, TimeCode::from_millis(180_000));
    assert_eq!(midroll.end, TimeCode::from_millis(200_000));
    assert!(midroll.text.contains("@PikaSub"));

    let credit = &doc.events[1];
    assert_eq!(credit.style, DEFAULT_STYLE_NAME);
    assert_eq!(credit.end, TimeCode::from_millis(10_000));
    assert!(credit.text.contains("Hindi Translation by: PikaSub.com"));

    let site = &doc.events[2];
    assert_eq!(site.style, "site");
    assert_eq!(site.end, TimeCode::from_millis(300_000));
    assert!(site.text.ends_with("}PikaSub.com"));

    assert!(doc.events[3..].iter().all(|e| e.style == DEFAULT_STYLE_NAME));
    assert_eq!(doc.events[6].text, format!("{}four", OVERLAY));
}

/// Site-card-only rule moves originals onto the theme-named style
#[test]
fn test_convert_withPika480p_shouldUseThemeStyleAndSmallResolution() {
    let doc = convert_and_reparse(&Converter::builtin(), common::SAMPLE_VTT, "ep.vtt", Some("Pika 480p"));

    assert_eq!(doc.info.play_resolution(), Some((640, 480)));
    assert_eq!(doc.events.len(), 3);
    assert_eq!(doc.events[0].style, "site");
    assert!(doc.events[1..].iter().all(|e| e.style == "Pika 480p"));
}

/// Unknown theme names produce the same bytes as the default theme
#[test]
fn test_convert_withUnknownTheme_shouldMatchDefaultThemeOutput() {
    let converter = Converter::builtin();

    for (input, name) in [(common::SAMPLE_SRT, "a.srt"), (common::SAMPLE_ASS, "a.ass")] {
        let unknown = converter.convert(input.as_bytes(), name, Some("Nonexistent")).unwrap();
        let default = converter.convert(input.as_bytes(), name, Some("Pikasub")).unwrap();
        let omitted = converter.convert(input.as_bytes(), name, None).unwrap();

        assert_eq!(unknown.bytes, default.bytes);
        assert_eq!(omitted.bytes, default.bytes);
    }
}

/// Every built-in theme sets its resolution and tints each event exactly once
#[test]
fn test_convert_withEveryBuiltinTheme_shouldApplyResolutionAndSingleOverlay() {
    let converter = Converter::builtin();

    for theme in converter.catalog().themes() {
        let out = converter.convert(common::SAMPLE_SRT.as_bytes(), "ep.srt", Some(&theme.id)).unwrap();
        let script = String::from_utf8(out.bytes).unwrap();
        let doc = formats::parse(script.as_bytes(), SubtitleFormat::Ass).unwrap();

        assert_eq!(
            doc.info.play_resolution(),
            Some((theme.resolution.width, theme.resolution.height)),
            "{}",
            theme.id
        );
        for line in common::event_lines(&script) {
            assert_eq!(line.matches(OVERLAY).count(), 1, "{}: {}", theme.id, line);
        }
        for style in &theme.styles {
            assert!(doc.style(&style.name).is_some(), "{} missing style {}", theme.id, style.name);
        }
    }
}

/// A converted script read back and written again is unchanged
#[test]
fn test_convert_thenRewrite_shouldBeStable() {
    let converter = Converter::builtin();
    let first = converter.convert(common::SAMPLE_ASS.as_bytes(), "ep.ass", Some("Big Brother")).unwrap();

    let doc = formats::parse(&first.bytes, SubtitleFormat::Ass).unwrap();
    let rewritten = formats::ass::write_document(&doc).unwrap();

    assert_eq!(rewritten, first.bytes);
}

/// Event count formula per rule
#[test]
fn test_convert_eventCounts_shouldFollowRuleFormulas() {
    let converter = Converter::builtin();
    let count = |theme: &str| {
        converter
            .convert(common::SAMPLE_ASS.as_bytes(), "ep.ass", Some(theme))
            .map(|out| out.event_count)
            .unwrap()
    };

    assert_eq!(count("Pikasub"), 5);
    assert_eq!(count("Pika 720p"), 8);
    assert_eq!(count("Pika 480p"), 6);
    assert_eq!(count("Shrouding The Heavens"), 6);
    assert_eq!(count("Tales Of Herding Gods"), 5);
    assert_eq!(count("Immortal Doctor"), 3);
}
