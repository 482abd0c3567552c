//! Thin orchestration over the components: one shared HTTP client, one
//! placement-then-transfer cycle per file, no retries and no concurrency.

use std::path::{Path, PathBuf};

use anyhow::anyhow;
use log::debug;
use reqwest::Client;

use crate::config::ClientConfig;
use crate::listing::ListingClient;
use crate::mirror::{DirectoryMirror, MirrorReport};
use crate::placement::{HttpPlacementResolver, Placement, ResolvePlacement};
use crate::protocol::RemoteFileEntry;
use crate::transfer::{FilePayload, HttpTransferClient, UploadFile};
use crate::Result;

/// Terminal outcome of one upload attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The storage node accepted the bytes; carries its acknowledgement.
    Stored(String),
    /// The store already had the file at that location; nothing was sent.
    AlreadyExists,
}

/// One placement-resolution/transfer cycle. When the file already exists
/// the transfer step is never invoked.
pub(crate) async fn upload_cycle<R, U>(
    resolver: &R,
    transfer: &U,
    owner: &str,
    target_dir: &str,
    payload: FilePayload,
) -> Result<UploadOutcome>
where
    R: ResolvePlacement,
    U: UploadFile,
{
    match resolver
        .resolve_placement(owner, &payload.name, target_dir)
        .await?
    {
        Placement::AlreadyExists => {
            debug!("{} already present in {}", payload.name, target_dir);
            Ok(UploadOutcome::AlreadyExists)
        }
        Placement::Assigned(node_url) => {
            let ack = transfer
                .upload(&node_url, owner, target_dir, payload)
                .await?;
            Ok(UploadOutcome::Stored(ack))
        }
    }
}

/// Facade wiring placement resolution, transfer, mirroring and listing
/// together over one reused HTTP client.
pub struct DfsClient {
    placement: HttpPlacementResolver,
    transfer: HttpTransferClient,
    listing: ListingClient,
}

impl DfsClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| anyhow!("cannot build HTTP client: {}", e))?;
        Ok(Self {
            placement: HttpPlacementResolver::new(
                http.clone(),
                config.metadata_url.clone(),
            ),
            transfer: HttpTransferClient::new(
                http.clone(),
                config.metadata_url.clone(),
                config.download_root,
            ),
            listing: ListingClient::new(http, config.metadata_url),
        })
    }

    /// Upload one file: resolve where it should live, then move the bytes
    /// there. Returns `AlreadyExists` without transferring when the store
    /// already has the file.
    pub async fn upload_file(
        &self,
        owner: &str,
        target_dir: &str,
        payload: FilePayload,
    ) -> Result<UploadOutcome> {
        upload_cycle(&self.placement, &self.transfer, owner, target_dir, payload)
            .await
    }

    /// Fetch a file by name into the configured download directory.
    pub async fn download_file(&self, filename: &str) -> Result<PathBuf> {
        self.transfer.download(filename).await
    }

    /// Mirror a local directory tree into `target_dir`, one file at a time,
    /// with per-file failure isolation. See [`DirectoryMirror::mirror`].
    pub async fn mirror_directory(
        &self,
        owner: &str,
        local_root: &Path,
        target_dir: &str,
    ) -> Result<MirrorReport> {
        DirectoryMirror::new(&self.placement, &self.transfer)
            .mirror(owner, local_root, target_dir)
            .await
    }

    /// List the files under a remote directory.
    pub async fn list_files(
        &self,
        owner: &str,
        directory: &str,
    ) -> Result<Vec<RemoteFileEntry>> {
        self.listing.list_files(owner, directory).await
    }
}
