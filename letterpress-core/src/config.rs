//! Run configuration — resolved once at startup, read-only afterwards.

use std::path::{Path, PathBuf};

/// Extension of the artifact the external compiler produces.
pub const ARTIFACT_EXTENSION: &str = "pdf";

/// All options for one batch run.
///
/// Defaults match the conventional project layout (`data.csv`, `template/`,
/// `output/`, `main.tex`); the CLI overrides individual fields from flags.
/// Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Tabular data source with a header row defining column names.
    pub data_file: PathBuf,
    /// Directory copied into the workspace for every record.
    pub template_dir: PathBuf,
    /// Directory receiving one artifact per generated record.
    pub output_dir: PathBuf,
    /// Primary document filename inside the template directory, handed to
    /// the compiler.
    pub tex_file: String,
    /// Naming template for the delivered artifact, rendered per record
    /// (extension appended automatically).
    pub output_template: String,
    /// Disposable staging directory; recreated per record, removed at
    /// end of run.
    pub workspace_dir: PathBuf,
    /// External compiler program.
    pub compiler: String,
    /// Stream compiler output to the console instead of discarding it.
    pub verbose: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            data_file: PathBuf::from("data.csv"),
            template_dir: PathBuf::from("template"),
            output_dir: PathBuf::from("output"),
            tex_file: "main.tex".to_string(),
            output_template: "{{ Name }}".to_string(),
            workspace_dir: PathBuf::from("_workspace"),
            compiler: "lualatex".to_string(),
            verbose: false,
        }
    }
}

impl RunConfig {
    /// Filename of the compiled artifact within the workspace: the primary
    /// document's basename with the [`ARTIFACT_EXTENSION`].
    pub fn artifact_file(&self) -> String {
        Path::new(&self.tex_file)
            .with_extension(ARTIFACT_EXTENSION)
            .display()
            .to_string()
    }
}
