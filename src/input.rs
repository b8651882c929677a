//! Classification of an input designation.
use crate::config::{PrepareConfig, TEX_SUFFIX};
use crate::error::{IoContext, PrepareError, PrepareResult};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Shape of the input, decided once before staging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    SingleFile,
    Directory,
    Archive,
}

/// Classify `path` as an archive, a directory, or a single file.
///
/// Archives are recognized by one of the configured suffixes, or by a gzip
/// header on a file that does not look like LaTeX source.
pub fn classify_input(path: &Path, config: &PrepareConfig) -> PrepareResult<InputKind> {
    let metadata = fs::metadata(path).io_context(|| format!("stat {}", path.display()))?;
    if metadata.is_dir() {
        return Ok(InputKind::Directory);
    }
    if !metadata.is_file() {
        return Err(PrepareError::Io {
            context: format!("stage {}", path.display()),
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file or directory",
            ),
        });
    }
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    if has_archive_suffix(&name, &config.archive_suffixes) {
        return Ok(InputKind::Archive);
    }
    if !name.ends_with(TEX_SUFFIX) && has_gzip_header(path)? {
        return Ok(InputKind::Archive);
    }
    Ok(InputKind::SingleFile)
}

fn has_archive_suffix(name: &str, suffixes: &[String]) -> bool {
    suffixes
        .iter()
        .any(|suffix| name.len() > suffix.len() && name.ends_with(suffix.as_str()))
}

fn has_gzip_header(path: &Path) -> PrepareResult<bool> {
    let mut file = File::open(path).io_context(|| format!("open {}", path.display()))?;
    let mut header = [0u8; 2];
    let mut filled = 0;
    while filled < header.len() {
        let read = file
            .read(&mut header[filled..])
            .io_context(|| format!("read {}", path.display()))?;
        if read == 0 {
            return Ok(false);
        }
        filled += read;
    }
    Ok(header == GZIP_MAGIC)
}
