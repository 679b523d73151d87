//! In-place field substitution over a staged workspace.

use std::path::Path;

use letterpress_core::Record;
use letterpress_render::render_str;

use crate::error::{io_err, BatchError};
use crate::workspace::sorted_entries;

/// File extensions whose contents go through the template engine. Everything
/// else (images, fonts, class files) is carried into the workspace verbatim.
pub const SUBSTITUTION_EXTENSIONS: &[&str] = &["tex", "lco"];

// ---------------------------------------------------------------------------
// Traversal
// ---------------------------------------------------------------------------

/// Visit every file under `root`, depth-first, sorted by name at each level.
///
/// Pure traversal: all effects live in the visitor. The first visitor error
/// aborts the walk.
pub fn visit_files<F>(root: &Path, visit: &mut F) -> Result<(), BatchError>
where
    F: FnMut(&Path) -> Result<(), BatchError>,
{
    for entry in sorted_entries(root)? {
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            visit_files(&path, visit)?;
        } else if meta.is_file() {
            visit(&path)?;
        }
    }
    Ok(())
}

fn eligible(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| SUBSTITUTION_EXTENSIONS.contains(&ext))
}

// ---------------------------------------------------------------------------
// Substitution
// ---------------------------------------------------------------------------

/// Rewrite every substitution-eligible file under `workspace_dir` in place,
/// rendering its contents against `record`.
///
/// Returns the number of files rewritten. A failure on any file aborts the
/// walk for this record; the half-rewritten workspace is disposable, so no
/// rollback happens.
pub fn substitute_tree(workspace_dir: &Path, record: &Record) -> Result<usize, BatchError> {
    let mut rendered = 0;
    visit_files(workspace_dir, &mut |path| {
        if !eligible(path) {
            return Ok(());
        }
        let name = path
            .strip_prefix(workspace_dir)
            .unwrap_or(path)
            .to_string_lossy();
        tracing::debug!("substituting {name}");
        let template = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        let body = render_str(&name, &template, record)?;
        std::fs::write(path, body).map_err(|e| io_err(path, e))?;
        rendered += 1;
        Ok(())
    })?;
    Ok(rendered)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn record() -> Record {
        [("Name", "Alice"), ("City", "NYC")].into_iter().collect()
    }

    #[test]
    fn substitutes_tex_and_lco_in_nested_dirs() {
        let ws = TempDir::new().unwrap();
        fs::create_dir_all(ws.path().join("letters")).unwrap();
        fs::write(ws.path().join("main.tex"), "Hello {{ Name }}").unwrap();
        fs::write(ws.path().join("letters").join("sender.lco"), "From {{ City }}").unwrap();

        let count = substitute_tree(ws.path(), &record()).unwrap();

        assert_eq!(count, 2);
        assert_eq!(fs::read_to_string(ws.path().join("main.tex")).unwrap(), "Hello Alice");
        assert_eq!(
            fs::read_to_string(ws.path().join("letters").join("sender.lco")).unwrap(),
            "From NYC"
        );
    }

    #[test]
    fn leaves_other_extensions_untouched() {
        let ws = TempDir::new().unwrap();
        // Not valid UTF-8 on purpose: assets must never be read as text.
        let png = [0x89u8, 0x50, 0x4e, 0x47, 0xff, 0x00];
        fs::write(ws.path().join("logo.png"), png).unwrap();
        fs::write(ws.path().join("notes.txt"), "keep {{ Name }} as-is").unwrap();
        fs::write(ws.path().join("main.tex"), "{{ Name }}").unwrap();

        let count = substitute_tree(ws.path(), &record()).unwrap();

        assert_eq!(count, 1);
        assert_eq!(fs::read(ws.path().join("logo.png")).unwrap(), png);
        assert_eq!(
            fs::read_to_string(ws.path().join("notes.txt")).unwrap(),
            "keep {{ Name }} as-is"
        );
    }

    #[test]
    fn missing_field_aborts_the_walk() {
        let ws = TempDir::new().unwrap();
        fs::write(ws.path().join("a.tex"), "{{ Missing }}").unwrap();
        fs::write(ws.path().join("z.tex"), "{{ Name }}").unwrap();

        let err = substitute_tree(ws.path(), &record()).unwrap_err();

        assert!(err.to_string().contains("Missing"), "unexpected error: {err}");
        assert_eq!(
            fs::read_to_string(ws.path().join("z.tex")).unwrap(),
            "{{ Name }}",
            "files after the failing one must be left alone"
        );
    }

    #[test]
    fn error_names_the_workspace_relative_path() {
        let ws = TempDir::new().unwrap();
        fs::create_dir_all(ws.path().join("letters")).unwrap();
        fs::write(ws.path().join("letters").join("main.tex"), "{{ Missing }}").unwrap();

        let err = substitute_tree(ws.path(), &record()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("letters/main.tex"), "unexpected error: {message}");
        assert!(
            !message.contains(&ws.path().display().to_string()),
            "error should not leak the workspace prefix: {message}"
        );
    }

    #[test]
    fn substitution_is_idempotent_once_markers_are_consumed() {
        let ws = TempDir::new().unwrap();
        let path = ws.path().join("main.tex");
        fs::write(&path, "Dear {{ Name }},").unwrap();

        substitute_tree(ws.path(), &record()).unwrap();
        let once = fs::read_to_string(&path).unwrap();
        substitute_tree(ws.path(), &record()).unwrap();
        let twice = fs::read_to_string(&path).unwrap();

        assert_eq!(once, "Dear Alice,");
        assert_eq!(once, twice);
    }

    #[test]
    fn non_utf8_eligible_file_is_an_error() {
        let ws = TempDir::new().unwrap();
        fs::write(ws.path().join("main.tex"), [0xffu8, 0xfe, 0x00]).unwrap();
        let err = substitute_tree(ws.path(), &record()).unwrap_err();
        assert!(matches!(err, BatchError::Io { .. }));
    }

    #[test]
    fn visit_files_walks_depth_first_in_sorted_order() {
        let ws = TempDir::new().unwrap();
        fs::create_dir_all(ws.path().join("b_dir")).unwrap();
        fs::write(ws.path().join("a.txt"), "").unwrap();
        fs::write(ws.path().join("b_dir").join("inner.txt"), "").unwrap();
        fs::write(ws.path().join("c.txt"), "").unwrap();

        let mut seen: Vec<PathBuf> = Vec::new();
        visit_files(ws.path(), &mut |path| {
            seen.push(path.strip_prefix(ws.path()).unwrap().to_path_buf());
            Ok(())
        })
        .unwrap();

        assert_eq!(
            seen,
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("b_dir").join("inner.txt"),
                PathBuf::from("c.txt"),
            ]
        );
    }
}
