//! Recursive directory mirroring. Every file under a local root is driven
//! through one placement-resolution/transfer cycle; failures are isolated
//! per file and collected into an aggregate report instead of aborting the
//! batch.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::client::{upload_cycle, UploadOutcome};
use crate::placement::ResolvePlacement;
use crate::transfer::{FilePayload, UploadFile};
use crate::{DfsError, Result};

/// What happened to one file during a mirror run.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<UploadOutcome>,
}

/// Per-file outcomes of a mirror run, in enumeration order. A run that hit
/// per-file failures still produces a report; only a bad root aborts.
#[derive(Debug, Default)]
pub struct MirrorReport {
    pub outcomes: Vec<FileOutcome>,
}

impl MirrorReport {
    /// Files newly written to the remote store.
    pub fn stored(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, Ok(UploadOutcome::Stored(_))))
            .count()
    }

    /// Files skipped because the store already had them.
    pub fn already_present(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, Ok(UploadOutcome::AlreadyExists)))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_err())
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }
}

/// Mirrors a local directory tree into the remote namespace, one file at a
/// time, in the order the filesystem enumerates entries.
pub struct DirectoryMirror<'a, R, U> {
    resolver: &'a R,
    transfer: &'a U,
}

impl<'a, R: ResolvePlacement, U: UploadFile> DirectoryMirror<'a, R, U> {
    pub fn new(resolver: &'a R, transfer: &'a U) -> Self {
        Self { resolver, transfer }
    }

    /// Mirror every file under `local_root` into the remote `target_dir`.
    ///
    /// All files land in the same flat `target_dir` regardless of nesting
    /// depth, so same-named files in different subdirectories collide on
    /// the remote side. A file's resolution or transfer failure is logged,
    /// recorded in the report, and the walk continues with the remaining
    /// entries. Fails fast with `InvalidLocalPath` if `local_root` is not
    /// a directory.
    pub async fn mirror(
        &self,
        owner: &str,
        local_root: &Path,
        target_dir: &str,
    ) -> Result<MirrorReport> {
        if !local_root.is_dir() {
            return Err(DfsError::InvalidLocalPath(local_root.to_path_buf()));
        }
        debug!(
            "mirroring {} into {} for {}",
            local_root.display(),
            target_dir,
            owner
        );

        let mut report = MirrorReport::default();
        for entry in WalkDir::new(local_root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| local_root.to_path_buf());
                    warn!("cannot read {}: {}", path.display(), e);
                    report.outcomes.push(FileOutcome {
                        path,
                        result: Err(e.into()),
                    });
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path().to_path_buf();
            let result = self.mirror_one(owner, &path, target_dir).await;
            if let Err(e) = &result {
                warn!("failed to mirror {}: {}", path.display(), e);
            }
            report.outcomes.push(FileOutcome { path, result });
        }
        Ok(report)
    }

    async fn mirror_one(
        &self,
        owner: &str,
        path: &Path,
        target_dir: &str,
    ) -> Result<UploadOutcome> {
        let payload = FilePayload::from_path(path)?;
        upload_cycle(self.resolver, self.transfer, owner, target_dir, payload)
            .await
    }
}
