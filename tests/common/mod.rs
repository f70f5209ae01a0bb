/*!
 * Common test utilities for the substyler test suite
 */

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SAMPLE_SRT: &str = "1
00:00:01,000 --> 00:00:04,000
This is a test subtitle.

2
00:00:05,000 --> 00:00:09,000
It contains <i>multiple</i> entries.

3
00:00:10,000 --> 00:00:14,000
For testing purposes.
";

pub const SAMPLE_VTT: &str = "WEBVTT

NOTE produced by hand

intro
00:00:01.000 --> 00:00:04.000 align:start
This is a test subtitle.

00:00:05.000 --> 00:00:09.000
Two lines
of text
";

/// Five-event script with a named style and an override fragment
pub const SAMPLE_ASS: &str = "[Script Info]
Title: Fixture
ScriptType: v4.00+
PlayResX: 640
PlayResY: 360

[V4+ Styles]
Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding
Style: Default,Arial,20,&H00FFFFFF,&H000000FF,&H00000000,&H80000000,0,0,0,0,100,100,0,0,1,2,0,2,10,10,10,1
Style: Sign,Arial,16,&H0000FFFF,&H000000FF,&H00000000,&H80000000,-1,0,0,0,100,100,0,0,1,2,0,8,10,10,10,1

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
Dialogue: 0,0:00:02.00,0:00:04.00,Default,,0,0,0,,First line
Dialogue: 0,0:00:05.00,0:00:07.00,Default,,0,0,0,,Second line
Dialogue: 0,0:00:08.00,0:00:10.00,Sign,,0,0,0,,{\\pos(320,40)}Shop sign
Dialogue: 0,0:00:11.00,0:00:13.00,Default,,0,0,0,,Fourth line
Dialogue: 0,0:00:14.00,0:00:16.00,Default,,0,0,0,,Fifth line
";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample SRT file for testing
pub fn create_test_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_SRT)
}

/// Lines of the `[Events]` section that hold events
pub fn event_lines(script: &str) -> Vec<&str> {
    script
        .lines()
        .filter(|line| line.starts_with("Dialogue:") || line.starts_with("Comment:"))
        .collect()
}

/// Names from the `Style:` lines of a script
pub fn style_names(script: &str) -> Vec<&str> {
    script
        .lines()
        .filter_map(|line| line.strip_prefix("Style: "))
        .filter_map(|record| record.split(',').next())
        .collect()
}
