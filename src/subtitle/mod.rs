/*!
 * Subtitle document model and format adapters.
 *
 * - `model`: canonical document, events, styles and timecodes
 * - `formats`: SRT and WebVTT readers, ASS reader and writer
 */

pub mod formats;
pub mod model;

pub use self::formats::{parse, SubtitleFormat};
pub use self::model::{
    Color, EventKind, ScriptInfo, StyleDefinition, SubtitleDocument, SubtitleEvent, TimeCode,
    DEFAULT_STYLE_NAME,
};
