//! Output names for exported and temporary documents.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use uuid::Uuid;

/// Characters that cannot appear in file names on common platforms, plus the AND operator.
const UNSAFE_FILE_NAME_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|', '&'];
const PLACEHOLDER: char = '_';
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

pub fn sanitize_query_for_file_name(query: &str) -> String {
    query
        .chars()
        .map(|ch| {
            if UNSAFE_FILE_NAME_CHARS.contains(&ch) {
                PLACEHOLDER
            } else {
                ch
            }
        })
        .collect()
}

/// `<base>_<sanitized query>_<YYYYMMDD_HHMMSS>.<extension>`
pub fn export_file_name(
    base_name: &str,
    query: &str,
    timestamp: NaiveDateTime,
    extension: &str,
) -> String {
    format!(
        "{base_name}_{}_{}.{extension}",
        sanitize_query_for_file_name(query),
        timestamp.format(TIMESTAMP_FORMAT)
    )
}

/// Export path for `source` inside `directory` (the source directory when `None`).
///
/// If the name is already taken, `_1`, `_2`, ... is appended before the extension.
pub fn unique_export_path(
    source: &Path,
    directory: Option<&Path>,
    query: &str,
    timestamp: NaiveDateTime,
    extension: &str,
) -> PathBuf {
    let base_name = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let directory = directory
        .map(Path::to_path_buf)
        .unwrap_or_else(|| source_directory(source));

    let file_name = export_file_name(&base_name, query, timestamp, extension);
    let candidate = directory.join(&file_name);
    if !candidate.exists() {
        return candidate;
    }

    let stem = file_name
        .strip_suffix(&format!(".{extension}"))
        .unwrap_or(file_name.as_str())
        .to_string();
    (1u32..)
        .map(|suffix| directory.join(format!("{stem}_{suffix}.{extension}")))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

fn source_directory(source: &Path) -> PathBuf {
    match source.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// A collision-resistant path in the platform temp directory.
pub fn temporary_artifact_path(extension: &str) -> PathBuf {
    std::env::temp_dir().join(format!("pagesift_{}.{extension}", Uuid::new_v4()))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 9)
            .and_then(|date| date.and_hms_opt(14, 5, 7))
            .expect("valid timestamp")
    }

    #[test]
    fn operators_and_path_characters_become_placeholders() {
        assert_eq!(sanitize_query_for_file_name("budget & 2024"), "budget _ 2024");
        assert_eq!(sanitize_query_for_file_name("a|b"), "a_b");
        assert_eq!(
            sanitize_query_for_file_name(r#"x\y/z:*?"<>"#),
            "x_y_z______"
        );
        assert_eq!(sanitize_query_for_file_name("예산"), "예산");
    }

    #[test]
    fn export_name_has_base_query_and_timestamp() {
        assert_eq!(
            export_file_name("report", "export | import", timestamp(), "pdf"),
            "report_export _ import_20250309_140507.pdf"
        );
    }

    #[test]
    fn export_path_lands_next_to_source() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("annual.pdf");
        let path = unique_export_path(&source, None, "tax", timestamp(), "pdf");
        assert_eq!(path, dir.path().join("annual_tax_20250309_140507.pdf"));
    }

    #[test]
    fn output_directory_overrides_source_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("annual.pdf");
        let path = unique_export_path(&source, Some(out.path()), "tax", timestamp(), "pdf");
        assert_eq!(path.parent(), Some(out.path()));
    }

    #[test]
    fn taken_names_get_numeric_suffix() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("annual.pdf");
        std::fs::write(dir.path().join("annual_tax_20250309_140507.pdf"), b"").expect("write");
        std::fs::write(dir.path().join("annual_tax_20250309_140507_1.pdf"), b"").expect("write");

        let path = unique_export_path(&source, None, "tax", timestamp(), "pdf");
        assert_eq!(path, dir.path().join("annual_tax_20250309_140507_2.pdf"));
    }

    #[test]
    fn bare_file_name_uses_current_directory() {
        let path = unique_export_path(Path::new("notes.pdf"), None, "q", timestamp(), "pdf");
        assert_eq!(path.parent(), Some(Path::new(".")));
    }

    #[test]
    fn temporary_paths_are_distinct() {
        let first = temporary_artifact_path("pdf");
        let second = temporary_artifact_path("pdf");
        assert_ne!(first, second);
        assert!(first.starts_with(std::env::temp_dir()));
        assert_eq!(first.extension().and_then(|ext| ext.to_str()), Some("pdf"));
    }
}
