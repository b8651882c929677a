//! Stage an input and resolve the entry document in one call.
use crate::config::PrepareConfig;
use crate::error::PrepareResult;
use crate::resolve::{pick_entry_file_with, ResolveGate};
use crate::staging::{stage_input, StagedInput};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Result of a full preparation run.
#[derive(Debug, Clone, Serialize)]
pub struct PreparedInput {
    /// Path of the entry document inside the staging directory.
    pub entry_path: PathBuf,
    /// `None` when the input named the entry document directly.
    pub gate: Option<ResolveGate>,
    pub staged: StagedInput,
}

/// Stage `input` into `output_dir` and return the entry document's path.
pub fn prepare_rendering_dir(input: &Path, output_dir: &Path) -> PrepareResult<PathBuf> {
    prepare_with(input, output_dir, &PrepareConfig::default()).map(|prepared| prepared.entry_path)
}

/// Like [`prepare_rendering_dir`], with explicit config and a full report.
///
/// Resolver failures propagate unchanged; whatever was staged stays on disk.
pub fn prepare_with(
    input: &Path,
    output_dir: &Path,
    config: &PrepareConfig,
) -> PrepareResult<PreparedInput> {
    let staged = stage_input(input, output_dir, config)?;
    let (file_name, gate) = match &staged.designated {
        Some(name) => (name.clone(), None),
        None => {
            let resolution = pick_entry_file_with(output_dir, &config.resolve_rules())?;
            (PathBuf::from(resolution.file_name), Some(resolution.gate))
        }
    };
    Ok(PreparedInput {
        entry_path: output_dir.join(file_name),
        gate,
        staged,
    })
}
