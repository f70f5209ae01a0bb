/*!
 * Canonical subtitle document model.
 *
 * Every parser produces a `SubtitleDocument`, the theme transformer edits it
 * in place and the ASS writer consumes it. The model mirrors the SubStation
 * Alpha v4.00+ layout: script metadata, a named style table and an ordered
 * list of events.
 */

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the implicit style every simple-timed and web-timed event uses.
pub const DEFAULT_STYLE_NAME: &str = "Default";

/// Script metadata key holding the horizontal play resolution.
pub const PLAY_RES_X: &str = "PlayResX";

/// Script metadata key holding the vertical play resolution.
pub const PLAY_RES_Y: &str = "PlayResY";

/// A point in time, in milliseconds.
///
/// Parsers only ever produce non-negative values. The representation is
/// signed so that the writer can reject a document that went negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeCode(i64);

impl TimeCode {
    pub const ZERO: TimeCode = TimeCode(0);

    pub const fn from_millis(ms: i64) -> Self {
        TimeCode(ms)
    }

    /// Build a timecode from clock components, `None` on overflow.
    pub fn from_hms(hours: i64, minutes: i64, seconds: i64, millis: i64) -> Option<Self> {
        let total = hours
            .checked_mul(60)?
            .checked_add(minutes)?
            .checked_mul(60)?
            .checked_add(seconds)?
            .checked_mul(1000)?
            .checked_add(millis)?;
        Some(TimeCode(total))
    }

    pub const fn millis(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// RGBA color using ASS alpha semantics (0 is opaque, 255 is transparent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Parse an ASS color value.
    ///
    /// Accepts `&HAABBGGRR`, `&HBBGGRR`, an optional trailing `&`, and the
    /// plain decimal form older SSA files use.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let packed = if let Some(hex) = value
            .strip_prefix("&H")
            .or_else(|| value.strip_prefix("&h"))
        {
            let hex = hex.trim_end_matches('&');
            if hex.is_empty() || hex.len() > 8 {
                return None;
            }
            u32::from_str_radix(hex, 16).ok()?
        } else {
            let decimal: i64 = value.parse().ok()?;
            u32::try_from(decimal).ok()?
        };

        Some(Color {
            r: (packed & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: ((packed >> 16) & 0xFF) as u8,
            a: ((packed >> 24) & 0xFF) as u8,
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "&H{:02X}{:02X}{:02X}{:02X}", self.a, self.b, self.g, self.r)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value).ok_or_else(|| format!("invalid ASS color: {}", value))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// A named bundle of rendering attributes.
///
/// The transformer only ever looks at `name`; everything else is carried
/// through to the writer untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleDefinition {
    pub name: String,
    pub fontname: String,
    pub fontsize: f64,
    pub primary_color: Color,
    pub secondary_color: Color,
    pub outline_color: Color,
    pub back_color: Color,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike_out: bool,
    pub scale_x: f64,
    pub scale_y: f64,
    pub spacing: f64,
    pub angle: f64,
    pub border_style: i32,
    pub outline: f64,
    pub shadow: f64,
    /// Numpad-style anchor, 1 (bottom left) to 9 (top right).
    pub alignment: i32,
    pub margin_l: i32,
    pub margin_r: i32,
    pub margin_v: i32,
    pub encoding: i32,
}

impl StyleDefinition {
    /// A style with the conventional ASS default attributes.
    pub fn new(name: impl Into<String>) -> Self {
        StyleDefinition {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Default for StyleDefinition {
    fn default() -> Self {
        StyleDefinition {
            name: DEFAULT_STYLE_NAME.to_string(),
            fontname: "Arial".to_string(),
            fontsize: 20.0,
            primary_color: Color::WHITE,
            secondary_color: Color::RED,
            outline_color: Color::BLACK,
            back_color: Color::BLACK,
            bold: false,
            italic: false,
            underline: false,
            strike_out: false,
            scale_x: 100.0,
            scale_y: 100.0,
            spacing: 0.0,
            angle: 0.0,
            border_style: 1,
            outline: 2.0,
            shadow: 2.0,
            alignment: 2,
            margin_l: 10,
            margin_r: 10,
            margin_v: 10,
            encoding: 1,
        }
    }
}

/// Record type of an event line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventKind {
    #[default]
    Dialogue,
    Comment,
}

impl EventKind {
    pub fn descriptor(self) -> &'static str {
        match self {
            EventKind::Dialogue => "Dialogue",
            EventKind::Comment => "Comment",
        }
    }
}

/// One timed line of the document.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEvent {
    pub start: TimeCode,
    pub end: TimeCode,

    /// Style reference by name. May name a style missing from the table.
    pub style: String,

    /// Event text, possibly carrying `{...}` override fragments and `\N`
    /// hard breaks. Never interpreted here.
    pub text: String,

    pub kind: EventKind,
    pub layer: i32,
    pub actor: String,
    pub margin_l: i32,
    pub margin_r: i32,
    pub margin_v: i32,
    pub effect: String,
}

impl SubtitleEvent {
    pub fn new(start: TimeCode, end: TimeCode, style: impl Into<String>, text: impl Into<String>) -> Self {
        SubtitleEvent {
            start,
            end,
            style: style.into(),
            text: text.into(),
            kind: EventKind::Dialogue,
            layer: 0,
            actor: String::new(),
            margin_l: 0,
            margin_r: 0,
            margin_v: 0,
            effect: String::new(),
        }
    }
}

/// Ordered script metadata.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScriptInfo {
    entries: Vec<(String, String)>,
}

impl ScriptInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata every converted simple-timed or web-timed file starts with.
    pub fn with_defaults() -> Self {
        let mut info = Self::new();
        info.set("WrapStyle", "0");
        info.set("ScaledBorderAndShadow", "yes");
        info.set("Collisions", "Normal");
        info
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set a key, replacing an existing value in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn set_play_resolution(&mut self, width: u32, height: u32) {
        self.set(PLAY_RES_X, width.to_string());
        self.set(PLAY_RES_Y, height.to_string());
    }

    /// Both play resolution keys, if present and numeric.
    pub fn play_resolution(&self) -> Option<(u32, u32)> {
        let width = self.get(PLAY_RES_X)?.trim().parse().ok()?;
        let height = self.get(PLAY_RES_Y)?.trim().parse().ok()?;
        Some((width, height))
    }
}

/// A parsed subtitle file.
///
/// Created per conversion, mutated in place by the transformer, written
/// once and dropped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubtitleDocument {
    pub info: ScriptInfo,

    /// Style table keyed by name.
    pub styles: BTreeMap<String, StyleDefinition>,

    /// Events in rendering order.
    pub events: Vec<SubtitleEvent>,
}

impl SubtitleDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty document seeded the way simple-timed and web-timed input is.
    pub fn with_default_style() -> Self {
        let mut document = SubtitleDocument {
            info: ScriptInfo::with_defaults(),
            ..Self::default()
        };
        document.insert_style(StyleDefinition::default());
        document
    }

    /// Insert a style under its own name, returning the one it replaced.
    pub fn insert_style(&mut self, style: StyleDefinition) -> Option<StyleDefinition> {
        self.styles.insert(style.name.clone(), style)
    }

    pub fn style(&self, name: &str) -> Option<&StyleDefinition> {
        self.styles.get(name)
    }

    /// Insert an event at position 0, shifting every other event later.
    pub fn prepend_event(&mut self, event: SubtitleEvent) {
        self.events.insert(0, event);
    }

    /// Event references that name no style in the table.
    pub fn dangling_style_references(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .events
            .iter()
            .map(|e| e.style.as_str())
            .filter(|name| !self.styles.contains_key(*name))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
