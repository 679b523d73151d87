//! Output naming and artifact delivery.

use std::path::{Path, PathBuf};

use letterpress_core::Record;
use letterpress_render::render_str;

use crate::error::{io_err, BatchError};

// ---------------------------------------------------------------------------
// Output naming
// ---------------------------------------------------------------------------

/// Evaluate the output naming `template` against `record`.
///
/// The rendered name must be usable as a plain file name: non-empty and free
/// of path separators, so a crafted field value cannot place an artifact
/// outside the output directory. The artifact extension is appended by the
/// caller.
pub fn evaluate_name(template: &str, record: &Record) -> Result<String, BatchError> {
    let name = render_str("output name", template, record)?;
    if name.trim().is_empty() || name.contains('/') || name.contains('\\') {
        return Err(BatchError::UnsafeOutputName { name });
    }
    Ok(name)
}

// ---------------------------------------------------------------------------
// Delivery
// ---------------------------------------------------------------------------

/// Copy the compiled `artifact` into `output_dir` under `file_name`.
///
/// The copy lands in a `.letterpress.tmp` sibling first and is renamed into
/// place, so an interrupted delivery never corrupts an artifact already
/// sitting at the final path. Returns the delivered path.
pub fn deliver(artifact: &Path, output_dir: &Path, file_name: &str) -> Result<PathBuf, BatchError> {
    std::fs::create_dir_all(output_dir).map_err(|e| io_err(output_dir, e))?;

    let path = output_dir.join(file_name);
    let tmp = PathBuf::from(format!("{}.letterpress.tmp", path.display()));
    std::fs::copy(artifact, &tmp).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, &path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(&path, e));
    }

    tracing::info!("delivered {}", path.display());
    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    fn bob() -> Record {
        [("Name", "Bob"), ("City", "LA")].into_iter().collect()
    }

    #[rstest]
    #[case("{{ Name }}", "Bob")]
    #[case("{{ Name }}_{{ City }}", "Bob_LA")]
    #[case("invoice-{{ Name }}", "invoice-Bob")]
    fn evaluates_naming_templates(#[case] template: &str, #[case] expected: &str) {
        assert_eq!(evaluate_name(template, &bob()).unwrap(), expected);
    }

    #[test]
    fn unknown_field_in_name_template_fails() {
        let err = evaluate_name("{{ Surname }}", &bob()).unwrap_err();
        assert!(err.to_string().contains("Surname"), "got {err}");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("{{ City }}/{{ Name }}")]
    fn unusable_names_are_rejected(#[case] template: &str) {
        let err = evaluate_name(template, &bob()).unwrap_err();
        assert!(matches!(err, BatchError::UnsafeOutputName { .. }), "got {err}");
    }

    #[test]
    fn separator_smuggled_through_a_field_is_rejected() {
        let evil: Record = [("Name", "../escape")].into_iter().collect();
        let err = evaluate_name("{{ Name }}", &evil).unwrap_err();
        assert!(matches!(err, BatchError::UnsafeOutputName { .. }), "got {err}");
    }

    #[test]
    fn delivers_into_a_fresh_output_dir() {
        let root = TempDir::new().unwrap();
        let artifact = root.path().join("main.pdf");
        fs::write(&artifact, b"%PDF-1.5 fake").unwrap();
        let output_dir = root.path().join("output");

        let path = deliver(&artifact, &output_dir, "Bob.pdf").unwrap();

        assert_eq!(path, output_dir.join("Bob.pdf"));
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.5 fake");
        assert!(
            !output_dir.join("Bob.pdf.letterpress.tmp").exists(),
            "tmp sibling must be cleaned up"
        );
    }

    #[test]
    fn delivery_overwrites_an_existing_artifact() {
        let root = TempDir::new().unwrap();
        let artifact = root.path().join("main.pdf");
        let output_dir = root.path().join("output");

        fs::write(&artifact, b"first").unwrap();
        deliver(&artifact, &output_dir, "Bob.pdf").unwrap();
        fs::write(&artifact, b"second").unwrap();
        deliver(&artifact, &output_dir, "Bob.pdf").unwrap();

        assert_eq!(fs::read(output_dir.join("Bob.pdf")).unwrap(), b"second");
    }

    #[test]
    fn missing_artifact_fails() {
        let root = TempDir::new().unwrap();
        let err = deliver(
            &root.path().join("main.pdf"),
            &root.path().join("output"),
            "Bob.pdf",
        )
        .unwrap_err();
        assert!(matches!(err, BatchError::Io { .. }), "got {err}");
    }

    #[test]
    #[cfg(unix)]
    fn unwritable_output_dir_fails_and_leaves_no_tmp() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let artifact = root.path().join("main.pdf");
        fs::write(&artifact, b"pdf").unwrap();
        let output_dir = root.path().join("output");
        fs::create_dir_all(&output_dir).unwrap();

        let mut perms = fs::metadata(&output_dir).unwrap().permissions();
        perms.set_mode(0o555);
        fs::set_permissions(&output_dir, perms).unwrap();

        let err = deliver(&artifact, &output_dir, "Bob.pdf").unwrap_err();
        assert!(matches!(err, BatchError::Io { .. }), "got {err}");
        assert!(!output_dir.join("Bob.pdf.letterpress.tmp").exists());

        let mut perms = fs::metadata(&output_dir).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&output_dir, perms).unwrap();
    }
}
