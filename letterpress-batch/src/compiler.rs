//! External document compiler invocation.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::BatchError;

// ---------------------------------------------------------------------------
// Compiler trait
// ---------------------------------------------------------------------------

/// Abstraction over the external compiler subprocess, so the pipeline can be
/// driven with a stub in tests.
///
/// A launch failure (binary missing) and a non-success exit are distinct
/// errors; the orchestrator skips the record either way.
pub trait Compiler {
    /// Compile `main_file` with the working directory set to `workdir`.
    ///
    /// With `verbose`, the subprocess's console output streams through to
    /// the caller's terminal; otherwise it is discarded.
    fn compile(&self, workdir: &Path, main_file: &str, verbose: bool) -> Result<(), BatchError>;
}

// ---------------------------------------------------------------------------
// LatexCompiler
// ---------------------------------------------------------------------------

/// Runs a LaTeX engine (`lualatex` unless configured otherwise) as a blocking
/// subprocess in batch mode.
#[derive(Debug, Clone)]
pub struct LatexCompiler {
    program: String,
}

impl LatexCompiler {
    pub fn new(program: impl Into<String>) -> Self {
        LatexCompiler {
            program: program.into(),
        }
    }
}

impl Compiler for LatexCompiler {
    fn compile(&self, workdir: &Path, main_file: &str, verbose: bool) -> Result<(), BatchError> {
        let mut command = Command::new(&self.program);
        command
            .arg("-interaction=nonstopmode")
            .arg(main_file)
            .current_dir(workdir)
            .stdin(Stdio::null());
        if !verbose {
            command.stdout(Stdio::null()).stderr(Stdio::null());
        }

        tracing::debug!("running {} -interaction=nonstopmode {main_file}", self.program);
        let status = command.status().map_err(|e| BatchError::Launch {
            program: self.program.clone(),
            source: e,
        })?;
        if !status.success() {
            return Err(BatchError::Compiler {
                program: self.program.clone(),
                status,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    #[cfg(unix)]
    fn successful_exit_is_ok() {
        let dir = TempDir::new().unwrap();
        // `true` ignores its arguments and exits 0.
        LatexCompiler::new("true")
            .compile(dir.path(), "main.tex", false)
            .unwrap();
    }

    #[test]
    #[cfg(unix)]
    fn failing_exit_reports_the_status() {
        let dir = TempDir::new().unwrap();
        let err = LatexCompiler::new("false")
            .compile(dir.path(), "main.tex", false)
            .unwrap_err();
        match err {
            BatchError::Compiler { program, status } => {
                assert_eq!(program, "false");
                assert!(!status.success());
            }
            other => panic!("expected Compiler error, got {other}"),
        }
    }

    #[test]
    fn missing_binary_is_a_launch_error() {
        let dir = TempDir::new().unwrap();
        let err = LatexCompiler::new("letterpress-no-such-engine")
            .compile(dir.path(), "main.tex", false)
            .unwrap_err();
        assert!(matches!(err, BatchError::Launch { .. }), "got {err}");
    }

    #[test]
    #[cfg(unix)]
    fn verbose_mode_still_succeeds() {
        let dir = TempDir::new().unwrap();
        LatexCompiler::new("true")
            .compile(dir.path(), "main.tex", true)
            .unwrap();
    }
}
