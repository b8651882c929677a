//! Gzip-compressed tarball extraction into an explicit directory.
use crate::error::{IoContext, PrepareResult};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Unpack `archive` into `dest`, keeping the relative paths stored in it.
///
/// `dest` and any missing ancestors are created first. Entries with `..`
/// components are skipped and absolute entries are re-rooted under `dest`.
pub fn unpack_tar_gz(archive: &Path, dest: &Path) -> PrepareResult<()> {
    fs::create_dir_all(dest).io_context(|| format!("create {}", dest.display()))?;
    let file = File::open(archive).io_context(|| format!("open {}", archive.display()))?;
    let mut tarball = tar::Archive::new(GzDecoder::new(BufReader::new(file)));
    tarball.set_preserve_permissions(false);
    tarball.set_overwrite(true);
    tarball
        .unpack(dest)
        .io_context(|| format!("unpack {} into {}", archive.display(), dest.display()))?;
    Ok(())
}
