//! Materialize an input designation into a staging directory.
//!
//! The staging directory is caller-owned: it is created when missing, written
//! to, and never cleaned up here, even when a later step fails.
use crate::archive::unpack_tar_gz;
use crate::config::PrepareConfig;
use crate::error::{IoContext, PrepareError, PrepareResult};
use crate::input::{classify_input, InputKind};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::{DirEntry, WalkDir};

/// What a staging run produced.
#[derive(Debug, Clone, Serialize)]
pub struct StagedInput {
    pub kind: InputKind,
    pub output_dir: PathBuf,
    /// Staged files relative to `output_dir`, sorted.
    pub files: Vec<PathBuf>,
    /// Name of the designated file when the input was a single file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designated: Option<PathBuf>,
}

/// Create `output_dir` (and missing ancestors) and fill it from `input`.
pub fn stage_input(
    input: &Path,
    output_dir: &Path,
    config: &PrepareConfig,
) -> PrepareResult<StagedInput> {
    let start = Instant::now();
    ensure_output_dir(output_dir)?;
    let kind = classify_input(input, config)?;
    let designated = match kind {
        InputKind::Archive => {
            unpack_tar_gz(input, output_dir)?;
            None
        }
        InputKind::Directory => {
            copy_tree(input, output_dir)?;
            None
        }
        InputKind::SingleFile => Some(copy_with_siblings(input, output_dir)?),
    };
    let files = collect_files_recursive(output_dir)?
        .into_iter()
        .filter_map(|path| path.strip_prefix(output_dir).ok().map(Path::to_path_buf))
        .collect::<Vec<_>>();

    tracing::info!(
        input = %input.display(),
        ?kind,
        files = files.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "staged input"
    );

    Ok(StagedInput {
        kind,
        output_dir: output_dir.to_path_buf(),
        files,
        designated,
    })
}

fn ensure_output_dir(output_dir: &Path) -> PrepareResult<()> {
    fs::create_dir_all(output_dir).io_context(|| format!("create {}", output_dir.display()))
}

/// Copy every regular file next to `file` (itself included) into the top
/// level of `output_dir`, returning the designated file's name.
fn copy_with_siblings(file: &Path, output_dir: &Path) -> PrepareResult<PathBuf> {
    let name = file.file_name().ok_or_else(|| PrepareError::Io {
        context: format!("stage {}", file.display()),
        source: io::Error::new(io::ErrorKind::InvalidInput, "input has no file name"),
    })?;
    let source_dir = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if same_dir(source_dir, output_dir) {
        return Ok(PathBuf::from(name));
    }
    let entries =
        fs::read_dir(source_dir).io_context(|| format!("read {}", source_dir.display()))?;
    for entry in entries {
        let entry = entry.io_context(|| format!("read {}", source_dir.display()))?;
        let path = entry.path();
        if path.is_file() {
            copy_file(&path, &output_dir.join(entry.file_name()))?;
        }
    }
    Ok(PathBuf::from(name))
}

/// Recursively copy `source` into `dest`, keeping empty subdirectories.
///
/// Symlinks are followed; a link back to one of its own ancestors is skipped.
/// When `dest` lives inside `source` it is skipped so the copy terminates.
fn copy_tree(source: &Path, dest: &Path) -> PrepareResult<()> {
    if same_dir(source, dest) {
        return Ok(());
    }
    let skip = dest.canonicalize().ok();
    let walker = WalkDir::new(source)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_staging_dir(entry, skip.as_deref()));
    for entry in walker {
        let Some(entry) = walk_entry(entry)? else {
            continue;
        };
        let Ok(rel) = entry.path().strip_prefix(source) else {
            continue;
        };
        let target = dest.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).io_context(|| format!("create {}", target.display()))?;
        } else if entry.file_type().is_file() {
            copy_file(entry.path(), &target)?;
        }
    }
    Ok(())
}

fn is_staging_dir(entry: &DirEntry, skip: Option<&Path>) -> bool {
    entry.file_type().is_dir()
        && skip.is_some_and(|skip| entry.path().canonicalize().is_ok_and(|p| p == skip))
}

/// Unwrap a walk result, dropping symlink loops.
fn walk_entry(entry: walkdir::Result<DirEntry>) -> PrepareResult<Option<DirEntry>> {
    match entry {
        Ok(entry) => Ok(Some(entry)),
        Err(err) if err.loop_ancestor().is_some() => {
            tracing::debug!(path = ?err.path(), "skipping symlink loop");
            Ok(None)
        }
        Err(err) => {
            let context = match err.path() {
                Some(path) => format!("walk {}", path.display()),
                None => "walk directory tree".to_string(),
            };
            Err(PrepareError::Io {
                context,
                source: err.into(),
            })
        }
    }
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn copy_file(source: &Path, dest: &Path) -> PrepareResult<()> {
    fs::copy(source, dest)
        .map(|_| ())
        .io_context(|| format!("copy {} to {}", source.display(), dest.display()))
}

/// Every regular file under `root`, sorted.
pub fn collect_files_recursive(root: &Path) -> PrepareResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    if !root.exists() {
        return Ok(files);
    }
    for entry in WalkDir::new(root).follow_links(true) {
        if let Some(entry) = walk_entry(entry)? {
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
#[path = "staging_tests.rs"]
mod tests;
