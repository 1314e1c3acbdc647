//! Filesystem infrastructure: implements `LocalFs` for sandbox staging.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Production filesystem implementation of `LocalFs`.
pub struct LocalFs;

impl crate::application::ports::LocalFs for LocalFs {
    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("creating directory {}", path.display()))
    }

    fn write(&self, path: &Path, content: &[u8]) -> Result<()> {
        std::fs::write(path, content).with_context(|| format!("writing file {}", path.display()))
    }

    fn copy_into(&self, source: &Path, dest_dir: &Path) -> Result<PathBuf> {
        let name = source
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("{} has no file name", source.display()))?;
        let dest = dest_dir.join(name);
        copy_recursive(source, &dest)?;
        Ok(dest)
    }

    fn set_permissions(&self, path: &Path, _mode: u32) -> Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(_mode))
                .with_context(|| format!("setting permissions on {}", path.display()))?;
        }
        Ok(())
    }
}

/// Copy a file, or a directory tree, from `source` to `dest`.
///
/// Existing files at the destination are overwritten; directories are merged.
///
/// # Errors
///
/// Returns an error if `source` is missing or any entry cannot be copied.
pub fn copy_recursive(source: &Path, dest: &Path) -> Result<()> {
    let meta = std::fs::metadata(source)
        .with_context(|| format!("reading metadata of {}", source.display()))?;
    if !meta.is_dir() {
        std::fs::copy(source, dest)
            .with_context(|| format!("copying {} to {}", source.display(), dest.display()))?;
        return Ok(());
    }
    std::fs::create_dir_all(dest)
        .with_context(|| format!("creating directory {}", dest.display()))?;
    for entry in
        std::fs::read_dir(source).with_context(|| format!("reading {}", source.display()))?
    {
        let entry = entry.with_context(|| format!("reading {}", source.display()))?;
        copy_recursive(&entry.path(), &dest.join(entry.file_name()))?;
    }
    Ok(())
}
