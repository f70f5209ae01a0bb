/*!
 * Conversion entry point: source bytes in, themed ASS bytes out.
 *
 * bytes + extension -> parser -> document -> catalog lookup -> transformer
 * -> writer -> bytes + suggested file name
 *
 * The converter is synchronous and keeps no state between calls besides
 * its read-only catalog, so one instance can serve any number of threads.
 */

use std::path::Path;

use crate::errors::ConversionError;
use crate::subtitle::formats::{self, ass, SubtitleFormat};
use crate::theme::catalog::ThemeCatalog;
use crate::theme::transformer;

/// Output of a successful conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedSubtitle {
    /// Serialized ASS script
    pub bytes: Vec<u8>,

    /// Source base name with an `.ass` extension
    pub file_name: String,

    /// Theme that was actually applied, after default fallback
    pub theme_id: String,

    /// Number of events written
    pub event_count: usize,

    /// Style names events refer to that the script does not define
    pub undefined_styles: Vec<String>,
}

/// Converts subtitle files against a theme catalog
#[derive(Debug, Clone, Default)]
pub struct Converter {
    catalog: ThemeCatalog,
}

impl Converter {
    pub fn new(catalog: ThemeCatalog) -> Self {
        Self { catalog }
    }

    /// Converter over the built-in theme catalog
    pub fn builtin() -> Self {
        Self::new(ThemeCatalog::builtin())
    }

    pub fn catalog(&self) -> &ThemeCatalog {
        &self.catalog
    }

    /// Convert a named file's content.
    ///
    /// The format comes from the extension of `file_name`. An unknown or
    /// missing `theme_name` uses the catalog's default theme.
    pub fn convert(
        &self,
        input: &[u8],
        file_name: &str,
        theme_name: Option<&str>,
    ) -> Result<ConvertedSubtitle, ConversionError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");
        let format = resolve_format(extension)?;
        let theme = self.catalog.lookup(theme_name);

        let mut document = formats::parse(input, format)?;
        transformer::transform(&mut document, theme)?;
        let bytes = ass::write_document(&document)?;

        Ok(ConvertedSubtitle {
            bytes,
            file_name: suggested_file_name(file_name),
            theme_id: theme.id.clone(),
            event_count: document.events.len(),
            undefined_styles: document
                .dangling_style_references()
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
    }

    /// Convert raw bytes given their declared extension
    pub fn convert_bytes(
        &self,
        input: &[u8],
        extension: &str,
        theme_name: Option<&str>,
    ) -> Result<Vec<u8>, ConversionError> {
        let format = resolve_format(extension)?;
        let mut document = formats::parse(input, format)?;
        transformer::transform(&mut document, self.catalog.lookup(theme_name))?;
        Ok(ass::write_document(&document)?)
    }
}

fn resolve_format(extension: &str) -> Result<SubtitleFormat, ConversionError> {
    SubtitleFormat::from_extension(extension)
        .ok_or_else(|| ConversionError::UnsupportedFormat(extension.to_string()))
}

/// Base name of `file_name` with its last extension replaced by `.ass`
pub fn suggested_file_name(file_name: &str) -> String {
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "subtitles".to_string());
    format!("{}.ass", stem)
}
