//! Infrastructure implementation of the `FileTransfer` port for a target
//! that shares the local filesystem.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::FileTransfer;
use crate::infra::fs::copy_recursive;

/// Syncs a sandbox into a directory on this host.
pub struct LocalTransfer;

impl FileTransfer for LocalTransfer {
    async fn transfer_recursive(&self, local: &Path, remote: &str) -> Result<()> {
        let local = local.to_path_buf();
        let remote = PathBuf::from(remote);
        tokio::task::spawn_blocking(move || sync_dir(&local, &remote))
            .await
            .context("spawn_blocking for transfer_recursive")?
    }
}

/// Copy every entry of `local` into `remote`, creating `remote` if needed.
fn sync_dir(local: &Path, remote: &Path) -> Result<()> {
    std::fs::create_dir_all(remote)
        .with_context(|| format!("creating directory {}", remote.display()))?;
    for entry in std::fs::read_dir(local).with_context(|| format!("reading {}", local.display()))? {
        let entry = entry.with_context(|| format!("reading {}", local.display()))?;
        copy_recursive(&entry.path(), &remote.join(entry.file_name()))?;
    }
    Ok(())
}
