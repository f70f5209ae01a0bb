/*!
 * Theme transformer.
 *
 * Runs four phases over a freshly parsed document:
 *
 * 1. play resolution from the theme
 * 2. theme styles installed by name (last writer wins)
 * 3. the theme's rule descriptor
 * 4. the translucent overlay prefix on every event
 *
 * Phase 4 is not idempotent. Each document must be transformed once.
 */

use crate::errors::CatalogError;
use crate::subtitle::model::{SubtitleDocument, SubtitleEvent, TimeCode, DEFAULT_STYLE_NAME};
use crate::theme::catalog::{Resolution, RuleDescriptor, Theme};
use crate::theme::template::OverrideTemplate;

/// Style the branding cards render with
pub const SITE_STYLE: &str = "site";

const SITE_CARD_END: TimeCode = TimeCode::from_millis(5 * 60 * 1000);
const CREDIT_CARD_END: TimeCode = TimeCode::from_millis(10 * 1000);
const MIDROLL_START: TimeCode = TimeCode::from_millis(180_000);
const MIDROLL_END: TimeCode = TimeCode::from_millis(200_000);

/// Number of cards `BrandedIntroAndMidroll` prepends
const BRANDED_CARD_COUNT: usize = 3;

/// Apply `theme` to `document` in place.
///
/// A theme whose rule needs a primary style but has none is rejected before
/// the document is touched.
pub fn transform(document: &mut SubtitleDocument, theme: &Theme) -> Result<(), CatalogError> {
    let primary = if theme.rule.requires_primary_style() {
        Some(theme.primary_style()?.name.clone())
    } else {
        None
    };

    apply_resolution(document, theme.resolution);
    install_styles(document, theme);
    apply_rule(document, theme, primary.as_deref().unwrap_or(DEFAULT_STYLE_NAME));
    apply_overlay(document);

    Ok(())
}

fn apply_resolution(document: &mut SubtitleDocument, resolution: Resolution) {
    document
        .info
        .set_play_resolution(resolution.width, resolution.height);
}

fn install_styles(document: &mut SubtitleDocument, theme: &Theme) {
    for style in &theme.styles {
        document.insert_style(style.clone());
    }
}

fn apply_rule(document: &mut SubtitleDocument, theme: &Theme, primary: &str) {
    match &theme.rule {
        RuleDescriptor::BrandedIntroAndMidroll { intro_font_size, mid_font_size } => {
            // Each prepend pushes the earlier ones back: final order is
            // mid-roll, credit, site.
            document.prepend_event(site_card(*intro_font_size));
            document.prepend_event(SubtitleEvent::new(
                TimeCode::ZERO,
                CREDIT_CARD_END,
                DEFAULT_STYLE_NAME,
                OverrideTemplate::CREDIT_CARD.render(),
            ));
            document.prepend_event(SubtitleEvent::new(
                MIDROLL_START,
                MIDROLL_END,
                SITE_STYLE,
                OverrideTemplate::MIDROLL_CARD.render_with_size(*mid_font_size),
            ));
            restyle_from(document, BRANDED_CARD_COUNT, DEFAULT_STYLE_NAME);
        }
        RuleDescriptor::SiteCardOnly { font_size } => {
            document.prepend_event(site_card(*font_size));
            restyle_from(document, 1, &theme.id);
        }
        RuleDescriptor::TelegramLeadIn => insert_lead_in(document, primary),
        RuleDescriptor::TrimThenLeadIn { n } => {
            let count = (*n).min(document.events.len());
            document.events.drain(..count);
            insert_lead_in(document, primary);
        }
        RuleDescriptor::FallbackUniformStyle => restyle_from(document, 0, primary),
    }
}

fn site_card(font_size: f64) -> SubtitleEvent {
    SubtitleEvent::new(
        TimeCode::ZERO,
        SITE_CARD_END,
        SITE_STYLE,
        OverrideTemplate::SITE_CARD.render_with_size(font_size),
    )
}

/// Prepend a card spanning from zero to the first event's start, then move
/// every original event onto `style`.
fn insert_lead_in(document: &mut SubtitleDocument, style: &str) {
    let first_start = document
        .events
        .first()
        .map_or(TimeCode::ZERO, |event| event.start);

    document.prepend_event(SubtitleEvent::new(
        TimeCode::ZERO,
        first_start,
        style,
        OverrideTemplate::LEAD_IN_CARD.render(),
    ));
    restyle_from(document, 1, style);
}

fn restyle_from(document: &mut SubtitleDocument, start: usize, style: &str) {
    for event in document.events.iter_mut().skip(start) {
        event.style = style.to_string();
    }
}

fn apply_overlay(document: &mut SubtitleDocument) {
    let overlay = OverrideTemplate::TRANSLUCENT_OVERLAY.source();
    for event in &mut document.events {
        event.text.insert_str(0, overlay);
    }
}
