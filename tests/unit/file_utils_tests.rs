/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::fs;
use std::path::Path;
use substyler::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::dir_exists(&test_file));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that generate_output_path creates the correct path
#[test]
fn test_generate_output_path_withValidInputs_shouldCreateCorrectPath() {
    let output_path = FileManager::generate_output_path("/tmp/input/episode.en.vtt", "/tmp/output");
    assert_eq!(output_path, Path::new("/tmp/output/episode.en.ass"));
}

/// Test that an ASS input converted next to itself gets a distinct name
#[test]
fn test_generate_output_path_withAssInSameDir_shouldNotOverwriteInput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "episode.ass", common::SAMPLE_ASS)?;

    let output_path = FileManager::generate_output_path(&input, temp_dir.path());

    assert_eq!(output_path, temp_dir.path().join("episode.styled.ass"));
    Ok(())
}

/// Test recursive subtitle discovery
#[test]
fn test_find_subtitle_files_withNestedDirs_shouldReturnSortedSubtitlesOnly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "b.srt", common::SAMPLE_SRT)?;
    common::create_test_file(root, "a.VTT", common::SAMPLE_VTT)?;
    common::create_test_file(root, "season2/c.ass", common::SAMPLE_ASS)?;
    common::create_test_file(root, "notes.txt", "not a subtitle")?;
    common::create_test_file(root, "video.mkv", "")?;

    let files = FileManager::find_subtitle_files(root)?;
    let names: Vec<_> = files
        .iter()
        .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();

    assert_eq!(names, vec!["a.VTT", "b.srt", "season2/c.ass"]);
    Ok(())
}

/// Test atomic writes create parents and leave no temporary files
#[test]
fn test_write_atomic_withNewDirectory_shouldCreateFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("out").join("episode.ass");

    FileManager::write_atomic(&target, b"[Script Info]\n")?;

    assert_eq!(fs::read_to_string(&target)?, "[Script Info]\n");
    assert_eq!(fs::read_dir(temp_dir.path().join("out"))?.count(), 1);
    Ok(())
}

/// Test that ensure_dir is idempotent
#[test]
fn test_ensure_dir_calledTwice_shouldSucceed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("x").join("y");

    FileManager::ensure_dir(&nested)?;
    FileManager::ensure_dir(&nested)?;

    assert!(FileManager::dir_exists(&nested));
    Ok(())
}
