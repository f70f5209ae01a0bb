/*!
 * Override-fragment templates for the synthetic cards themes insert.
 *
 * A template is opaque text with at most one numeric substitution point,
 * `%size%`. Nothing here interprets the override tags themselves; the only
 * check is that `{` and `}` delimiters pair up.
 */

use crate::errors::CatalogError;
use crate::subtitle::formats::ass::format_number;

/// Numeric substitution point inside a template
pub const SIZE_PLACEHOLDER: &str = "%size%";

/// A card text with an optional font-size slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverrideTemplate {
    source: &'static str,
}

impl OverrideTemplate {
    /// Five-minute faded watermark on the `site` style.
    pub const SITE_CARD: OverrideTemplate = OverrideTemplate::new(
        "{\\fad(4000,3000)\\fn@Arial Unicode MS\\fs%size%\\c&H00FFFFFF&\\alpha&H99&\\b1\\a1\\fscy60}PikaSub.com",
    );

    /// Scrolling promotional banner shown mid-episode.
    pub const MIDROLL_CARD: OverrideTemplate = OverrideTemplate::new(
        "{\\fad(0,2000)\\move(2505.6,52.5,-750.9,53.1)\\fs%size%\\c&H00F0FF&\\1a&H00&\\b1}{\\fscy100\\fnCorbel\\shad2.5}For more Animes in Hindi Sub join our Telegram Channel: @PikaSub",
    );

    /// Top-anchored translation credit.
    pub const CREDIT_CARD: OverrideTemplate = OverrideTemplate::new(
        "{\\an8}Hindi Translation by: PikaSub.com\\NTelegram Channel: @PikaSub",
    );

    /// Text of the lead-in event covering the time before the first line.
    pub const LEAD_IN_CARD: OverrideTemplate =
        OverrideTemplate::new("Telegram :- Facky_Hindi_Donghua");

    /// Semi-transparent shadow prefix applied to every event.
    pub const TRANSLUCENT_OVERLAY: OverrideTemplate = OverrideTemplate::new("{\\4a&H50&}");

    /// Every fixed template, by name, for catalog validation
    pub const BUILTIN: [(&'static str, OverrideTemplate); 5] = [
        ("site card", Self::SITE_CARD),
        ("mid-roll card", Self::MIDROLL_CARD),
        ("credit card", Self::CREDIT_CARD),
        ("lead-in card", Self::LEAD_IN_CARD),
        ("translucent overlay", Self::TRANSLUCENT_OVERLAY),
    ];

    pub const fn new(source: &'static str) -> Self {
        OverrideTemplate { source }
    }

    pub fn source(&self) -> &'static str {
        self.source
    }

    /// Render a template that has no substitution point
    pub fn render(&self) -> String {
        self.source.to_string()
    }

    /// Render with the font size written in its shortest decimal form
    pub fn render_with_size(&self, size: f64) -> String {
        self.source.replace(SIZE_PLACEHOLDER, &format_number(size))
    }

    /// Check that override delimiters are balanced and never nested
    pub fn validate(&self) -> Result<(), CatalogError> {
        let malformed = |reason: &str| CatalogError::MalformedTemplate {
            template: self.source.to_string(),
            reason: reason.to_string(),
        };

        let mut open = false;
        for c in self.source.chars() {
            match c {
                '{' if open => return Err(malformed("nested '{'")),
                '{' => open = true,
                '}' if !open => return Err(malformed("'}' without matching '{'")),
                '}' => open = false,
                _ => {}
            }
        }
        if open {
            return Err(malformed("unclosed '{'"));
        }
        Ok(())
    }
}
