use std::fs;

use pretty_assertions::assert_eq;
use tailor_engine::{ArtifactWriter, RESUME_PDF_FILENAME, RESUME_TEX_FILENAME};
use tempfile::TempDir;

#[test]
fn latex_artifact_uses_fixed_name_and_utf8_content() {
    let temp = TempDir::new().unwrap();
    let writer = ArtifactWriter::new(temp.path().to_path_buf());

    let path = writer
        .write_resume_tex("\\documentclass{article} % résumé")
        .unwrap();

    assert_eq!(path.file_name().unwrap(), RESUME_TEX_FILENAME);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "\\documentclass{article} % résumé"
    );
}

#[test]
fn pdf_artifact_round_trips_binary_bytes() {
    let temp = TempDir::new().unwrap();
    let writer = ArtifactWriter::new(temp.path().to_path_buf());
    let payload: Vec<u8> = vec![0x25, 0x50, 0x44, 0x46, 0x00, 0xFE, 0x07];

    let path = writer.write_resume_pdf(&payload).unwrap();

    assert_eq!(path.file_name().unwrap(), RESUME_PDF_FILENAME);
    assert_eq!(fs::read(&path).unwrap(), payload);
}

#[test]
fn rewrite_replaces_existing_artifact() {
    let temp = TempDir::new().unwrap();
    let writer = ArtifactWriter::new(temp.path().to_path_buf());

    let first = writer.write_resume_tex("old").unwrap();
    let second = writer.write_resume_tex("new").unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "new");
}

#[test]
fn missing_output_dir_is_created() {
    let temp = TempDir::new().unwrap();
    let nested = temp.path().join("artifacts").join("out");
    let writer = ArtifactWriter::new(nested.clone());

    let path = writer.write_resume_tex("content").unwrap();

    assert!(nested.is_dir());
    assert!(path.exists());
}
