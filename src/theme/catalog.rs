/*!
 * Theme catalog: static data describing every branded theme.
 *
 * A theme is pure data (id, play resolution, style set and rule
 * descriptor). Adding a theme means adding a row here, or to a JSON catalog
 * file, never writing new transformation code.
 */

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CatalogError;
use crate::subtitle::formats::ass;
use crate::subtitle::model::{Color, StyleDefinition, DEFAULT_STYLE_NAME};
use crate::theme::template::OverrideTemplate;

/// Id of the theme used when no theme, or an unknown theme, is requested
pub const DEFAULT_THEME: &str = "Pikasub";

/// Play resolution written into the script metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const FULL_HD: Resolution = Resolution::new(1920, 1080);

    pub const fn new(width: u32, height: u32) -> Self {
        Resolution { width, height }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::FULL_HD
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// The transformation a theme applies after installing its styles.
///
/// This set is closed: themes pick a variant and parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleDescriptor {
    /// Site watermark, translation credit and mid-roll promo cards
    BrandedIntroAndMidroll { intro_font_size: f64, mid_font_size: f64 },

    /// Site watermark only
    SiteCardOnly { font_size: f64 },

    /// Lead-in card up to the first line
    TelegramLeadIn,

    /// Drop the first `n` events, then the lead-in card
    TrimThenLeadIn { n: usize },

    /// Restyle every event with the primary style
    FallbackUniformStyle,
}

impl RuleDescriptor {
    /// Whether the rule reads the theme's first style
    pub fn requires_primary_style(&self) -> bool {
        matches!(
            self,
            Self::TelegramLeadIn | Self::TrimThenLeadIn { .. } | Self::FallbackUniformStyle
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::BrandedIntroAndMidroll { .. } => "branded_intro_and_midroll",
            Self::SiteCardOnly { .. } => "site_card_only",
            Self::TelegramLeadIn => "telegram_lead_in",
            Self::TrimThenLeadIn { .. } => "trim_then_lead_in",
            Self::FallbackUniformStyle => "fallback_uniform_style",
        }
    }
}

impl fmt::Display for RuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BrandedIntroAndMidroll { intro_font_size, mid_font_size } => write!(
                f,
                "{}(intro_font_size={}, mid_font_size={})",
                self.name(),
                intro_font_size,
                mid_font_size
            ),
            Self::SiteCardOnly { font_size } => write!(f, "{}(font_size={})", self.name(), font_size),
            Self::TrimThenLeadIn { n } => write!(f, "{}(n={})", self.name(), n),
            Self::TelegramLeadIn | Self::FallbackUniformStyle => f.write_str(self.name()),
        }
    }
}

/// A named theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub id: String,

    #[serde(default)]
    pub resolution: Resolution,

    /// Ordered style set; entry 0 is the primary style
    #[serde(default)]
    pub styles: Vec<StyleDefinition>,

    pub rule: RuleDescriptor,
}

impl Theme {
    pub fn new(id: &str, resolution: Resolution, styles: Vec<StyleDefinition>, rule: RuleDescriptor) -> Self {
        Theme {
            id: id.to_string(),
            resolution,
            styles,
            rule,
        }
    }

    /// The first style of the set
    pub fn primary_style(&self) -> Result<&StyleDefinition, CatalogError> {
        self.styles.first().ok_or_else(|| CatalogError::EmptyStyleSet {
            theme: self.id.clone(),
            rule: self.rule.name().to_string(),
        })
    }

    /// Check the theme can run its rule
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.rule.requires_primary_style() {
            self.primary_style()?;
        }
        for style in &self.styles {
            if let Some(field) = ass::unwritable_style_field(style) {
                return Err(CatalogError::UnwritableStyle {
                    theme: self.id.clone(),
                    style: style.name.clone(),
                    field,
                });
            }
        }
        if self.resolution.width == 0 || self.resolution.height == 0 {
            return Err(CatalogError::InvalidResolution {
                theme: self.id.clone(),
                width: self.resolution.width,
                height: self.resolution.height,
            });
        }
        Ok(())
    }
}

/// On-disk shape of a catalog file
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default = "default_theme_id")]
    default_theme: String,
    themes: Vec<Theme>,
}

fn default_theme_id() -> String {
    DEFAULT_THEME.to_string()
}

/// Read-only table of themes with a designated default.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeCatalog {
    themes: Vec<Theme>,
    default_index: usize,
}

impl ThemeCatalog {
    /// Build and validate a catalog
    pub fn new(themes: Vec<Theme>, default_theme: &str) -> Result<Self, CatalogError> {
        let default_index = themes
            .iter()
            .position(|t| t.id == default_theme)
            .ok_or_else(|| CatalogError::MissingDefaultTheme(default_theme.to_string()))?;

        let catalog = ThemeCatalog { themes, default_index };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Decode and validate a JSON catalog
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|e| CatalogError::Invalid(e.to_string()))?;
        Self::new(file.themes, &file.default_theme)
    }

    /// Check every theme and the fixed card templates
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for theme in &self.themes {
            if !seen.insert(theme.id.as_str()) {
                return Err(CatalogError::DuplicateTheme(theme.id.clone()));
            }
            theme.validate()?;
        }
        for (_, template) in OverrideTemplate::BUILTIN {
            template.validate()?;
        }
        Ok(())
    }

    /// Resolve a theme by id, falling back to the default theme
    pub fn lookup(&self, name: Option<&str>) -> &Theme {
        name.and_then(|id| self.get(id))
            .unwrap_or_else(|| self.default_theme())
    }

    pub fn get(&self, id: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn default_theme(&self) -> &Theme {
        &self.themes[self.default_index]
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    /// The catalog shipped with the application.
    pub fn builtin() -> Self {
        let themes = vec![
            Theme::new(
                DEFAULT_THEME,
                Resolution::FULL_HD,
                vec![dialogue_style(DEFAULT_STYLE_NAME, "Trebuchet MS", 68.0)],
                RuleDescriptor::FallbackUniformStyle,
            ),
            Theme::new(
                "Pika 1080p",
                Resolution::FULL_HD,
                vec![
                    dialogue_style(DEFAULT_STYLE_NAME, "Trebuchet MS", 68.0),
                    site_style(31.733, 24),
                ],
                RuleDescriptor::BrandedIntroAndMidroll {
                    intro_font_size: 31.733,
                    mid_font_size: 42.0,
                },
            ),
            Theme::new(
                "Pika 720p",
                Resolution::new(1280, 720),
                vec![
                    dialogue_style(DEFAULT_STYLE_NAME, "Trebuchet MS", 46.0),
                    site_style(25.733, 16),
                ],
                RuleDescriptor::BrandedIntroAndMidroll {
                    intro_font_size: 25.733,
                    mid_font_size: 32.0,
                },
            ),
            Theme::new(
                "Pika 480p",
                Resolution::new(640, 480),
                vec![
                    dialogue_style("Pika 480p", "Trebuchet MS", 30.0),
                    site_style(15.733, 10),
                ],
                RuleDescriptor::SiteCardOnly { font_size: 15.733 },
            ),
            Theme::new(
                "Shrouding The Heavens",
                Resolution::FULL_HD,
                vec![donghua_style("Shrouding The Heavens", Color::rgb(0xFF, 0xF2, 0xCC), Color::rgb(0x3A, 0x1F, 0x00))],
                RuleDescriptor::TelegramLeadIn,
            ),
            Theme::new(
                "Tales Of Herding Gods",
                Resolution::FULL_HD,
                vec![donghua_style("Tales Of Herding Gods", Color::WHITE, Color::rgb(0x00, 0x2B, 0x55))],
                RuleDescriptor::TrimThenLeadIn { n: 1 },
            ),
            Theme::new(
                "Big Brother",
                Resolution::FULL_HD,
                vec![donghua_style("Big Brother", Color::rgb(0xF5, 0xF5, 0xF5), Color::rgb(0x40, 0x00, 0x00))],
                RuleDescriptor::TelegramLeadIn,
            ),
            Theme::new(
                "Immortal Doctor",
                Resolution::new(1920, 800),
                vec![donghua_style("Immortal Doctor", Color::rgb(0xE8, 0xFF, 0xF0), Color::rgb(0x00, 0x33, 0x1A))],
                RuleDescriptor::TrimThenLeadIn { n: 3 },
            ),
        ];

        ThemeCatalog { themes, default_index: 0 }
    }
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Bottom-centered dialogue style with a heavy outline
fn dialogue_style(name: &str, fontname: &str, fontsize: f64) -> StyleDefinition {
    StyleDefinition {
        name: name.to_string(),
        fontname: fontname.to_string(),
        fontsize,
        back_color: Color::rgba(0, 0, 0, 0x64),
        bold: true,
        outline: 3.2,
        shadow: 1.5,
        margin_v: 45,
        ..StyleDefinition::default()
    }
}

/// Top-left watermark style the branding cards render with
fn site_style(fontsize: f64, margin: i32) -> StyleDefinition {
    StyleDefinition {
        name: "site".to_string(),
        fontname: "Arial Unicode MS".to_string(),
        fontsize,
        primary_color: Color::rgba(0xFF, 0xFF, 0xFF, 0x99),
        outline: 0.0,
        shadow: 0.0,
        alignment: 7,
        margin_l: margin,
        margin_r: margin,
        margin_v: margin,
        ..StyleDefinition::default()
    }
}

/// Large framed style used by the donghua themes
fn donghua_style(name: &str, primary: Color, outline: Color) -> StyleDefinition {
    StyleDefinition {
        name: name.to_string(),
        fontname: "Bahnschrift SemiBold".to_string(),
        fontsize: 72.0,
        primary_color: primary,
        outline_color: outline,
        back_color: Color::rgba(0, 0, 0, 0x80),
        outline: 4.0,
        shadow: 2.0,
        margin_l: 60,
        margin_r: 60,
        margin_v: 52,
        ..StyleDefinition::default()
    }
}
