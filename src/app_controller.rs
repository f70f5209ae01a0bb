use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::converter::Converter;
use crate::errors::ConversionError;
use crate::file_utils::FileManager;
use crate::theme::ThemeCatalog;

// @module: Application controller for subtitle conversion

/// What happened to a single input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// Output written to the contained path
    Written(PathBuf),
    /// Output already existed and overwriting was not requested
    Skipped(PathBuf),
}

/// Counts reported after converting a folder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller for subtitle conversion
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Converter over the active catalog
    converter: Converter,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Self::load_catalog(path)?,
            None => ThemeCatalog::builtin(),
        };

        if !catalog.contains(config.theme_name()) {
            warn!(
                "Theme '{}' is not in the catalog, falling back to '{}'",
                config.theme_name(),
                catalog.default_theme().id
            );
        }

        Ok(Self {
            config,
            converter: Converter::new(catalog),
        })
    }

    fn load_catalog(path: &Path) -> Result<ThemeCatalog> {
        let json = FileManager::read_to_string(path)?;
        let catalog = ThemeCatalog::from_json_str(&json)
            .map_err(|e| {
                error!("Theme catalog {:?} is unusable: {}", path, e);
                e
            })
            .with_context(|| format!("Failed to load theme catalog: {:?}", path))?;
        debug!("Loaded {} themes from {:?}", catalog.themes().len(), path);
        Ok(catalog)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn converter(&self) -> &Converter {
        &self.converter
    }

    /// One line per theme, default marked with `*`
    pub fn theme_listing(&self) -> Vec<String> {
        let catalog = self.converter.catalog();
        let default_id = &catalog.default_theme().id;

        catalog
            .themes()
            .iter()
            .map(|theme| {
                let marker = if &theme.id == default_id { '*' } else { ' ' };
                format!(
                    "{} {:<24} {:<10} {}",
                    marker,
                    theme.id,
                    theme.resolution.to_string(),
                    theme.rule
                )
            })
            .collect()
    }

    /// Directory a converted file lands in
    fn output_dir_for(&self, input_file: &Path, output_dir: Option<&Path>) -> PathBuf {
        output_dir
            .map(Path::to_path_buf)
            .or_else(|| self.config.output.output_dir.clone())
            .or_else(|| input_file.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Convert one file
    pub fn run(&self, input_file: PathBuf, output_dir: Option<PathBuf>, force_overwrite: bool) -> Result<ConversionOutcome> {
        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_dir = self.output_dir_for(&input_file, output_dir.as_deref());
        let output_path = FileManager::generate_output_path(&input_file, &output_dir);
        let force_overwrite = force_overwrite || self.config.output.force_overwrite;

        if output_path.exists() && !force_overwrite {
            warn!("Skipping {:?}, output already exists (use -f to force overwrite)", output_path);
            return Ok(ConversionOutcome::Skipped(output_path));
        }

        let input = FileManager::read_bytes(&input_file)?;
        let file_name = input_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let converted = match self.converter.convert(&input, &file_name, Some(self.config.theme_name())) {
            Ok(converted) => converted,
            Err(e) => {
                Self::report_failure(&input_file, &e);
                return Err(e).with_context(|| format!("Failed to convert {:?}", input_file));
            }
        };

        if !converted.undefined_styles.is_empty() {
            warn!(
                "{:?} refers to undefined styles {:?}, written as-is",
                output_path, converted.undefined_styles
            );
        }

        FileManager::write_atomic(&output_path, &converted.bytes)?;
        info!(
            "Success: {:?} ({} events, theme '{}')",
            output_path, converted.event_count, converted.theme_id
        );

        Ok(ConversionOutcome::Written(output_path))
    }

    fn report_failure(input_file: &Path, err: &ConversionError) {
        if err.is_configuration_fault() {
            error!("Theme configuration fault while converting {:?}: {}", input_file, err);
        } else {
            warn!("Cannot convert {:?}: {}", input_file, err);
        }
    }

    /// Convert every subtitle file below a directory
    pub fn run_folder(&self, input_dir: PathBuf, output_dir: Option<PathBuf>, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let inputs = self.collect_inputs(&input_dir, output_dir.as_deref())?;
        if inputs.is_empty() {
            return Err(anyhow!("No subtitle files found in directory: {:?}", input_dir));
        }

        let folder_pb = ProgressBar::new(inputs.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(style.progress_chars("#>-"));

        let mut summary = FolderSummary::default();

        for input_file in inputs {
            let file_name = input_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Converting: {}", file_name));

            match self.run(input_file, output_dir.clone(), force_overwrite) {
                Ok(ConversionOutcome::Written(_)) => summary.converted += 1,
                Ok(ConversionOutcome::Skipped(_)) => summary.skipped += 1,
                Err(e) => {
                    debug!("{:#}", e);
                    summary.failed += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder conversion complete");

        info!(
            "Folder conversion completed in {:.1?}: {} converted, {} skipped, {} errors",
            start_time.elapsed(),
            summary.converted,
            summary.skipped,
            summary.failed
        );

        Ok(summary)
    }

    /// Subtitle files under `input_dir`, minus files that are themselves the
    /// output of another input (previous runs leave those behind)
    fn collect_inputs(&self, input_dir: &Path, output_dir: Option<&Path>) -> Result<Vec<PathBuf>> {
        let candidates = FileManager::find_subtitle_files(input_dir)?;

        let planned: HashSet<PathBuf> = candidates
            .iter()
            .map(|file| {
                let dir = self.output_dir_for(file, output_dir);
                FileManager::generate_output_path(file, &dir)
            })
            .collect();

        let inputs = candidates
            .into_iter()
            .filter(|file| !planned.contains(file))
            .collect();

        Ok(inputs)
    }
}
