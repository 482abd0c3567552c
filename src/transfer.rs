//! Byte transfer to and from storage nodes. Uploads are a single buffered
//! multipart POST to the node chosen at placement resolution; downloads go
//! through the metadata service's retrieval endpoint and land under the
//! configured download root.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use url::Url;

use crate::config::join_endpoint;
use crate::{DfsError, Result};

/// A file about to be transferred: its logical name plus the whole content
/// buffered in memory. Built once per file and consumed by one attempt.
#[derive(Debug, Clone)]
pub struct FilePayload {
    pub name: String,
    pub content: Vec<u8>,
}

impl FilePayload {
    pub fn new<S: Into<String>>(name: S, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }

    /// Read a local file into a payload, keeping its file name.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("unusable file name: {}", path.display()),
                )
            })?
            .to_string();
        let content = fs::read(path)?;
        Ok(Self { name, content })
    }
}

#[allow(async_fn_in_trait)]
pub trait UploadFile {
    async fn upload(
        &self,
        node_url: &Url,
        owner: &str,
        target_dir: &str,
        payload: FilePayload,
    ) -> Result<String>;
}

/// Transfer client backed by the real storage nodes.
pub struct HttpTransferClient {
    http: Client,
    metadata_url: Url,
    download_root: PathBuf,
}

impl HttpTransferClient {
    pub fn new(http: Client, metadata_url: Url, download_root: PathBuf) -> Self {
        Self {
            http,
            metadata_url,
            download_root,
        }
    }

    /// Fetch a file by name and persist it under the download root,
    /// overwriting any previous local copy. The destination file is only
    /// created after the full body has arrived, so a failed download never
    /// leaves a partial or empty file behind.
    pub async fn download(&self, filename: &str) -> Result<PathBuf> {
        let url = join_endpoint(
            &self.metadata_url,
            &format!("dfs/getfile/{}", filename),
        )?;
        debug!("downloading {} from {}", filename, url);

        let response = self.http.get(url).send().await.map_err(|e| {
            DfsError::DownloadNotFound(format!("{}: {}", filename, e))
        })?;
        if !response.status().is_success() {
            return Err(DfsError::DownloadNotFound(filename.to_string()));
        }
        let bytes = response.bytes().await.map_err(|e| {
            DfsError::DownloadNotFound(format!("{}: {}", filename, e))
        })?;
        if bytes.is_empty() {
            return Err(DfsError::DownloadNotFound(filename.to_string()));
        }

        fs::create_dir_all(&self.download_root)?;
        let target = self.download_root.join(filename);
        let mut file = fs::File::create(&target)?;
        file.write_all(&bytes)?;
        info!(
            "saved {} ({} bytes) to {}",
            filename,
            bytes.len(),
            target.display()
        );
        Ok(target)
    }
}

impl UploadFile for HttpTransferClient {
    /// Push one file to `node_url` as multipart form data: the bytes under
    /// the field `file` with the original name, plus `user` and `targetDir`
    /// fields. Single attempt, no retry; the node's acknowledgement body is
    /// returned verbatim.
    async fn upload(
        &self,
        node_url: &Url,
        owner: &str,
        target_dir: &str,
        payload: FilePayload,
    ) -> Result<String> {
        let size = payload.content.len();
        debug!("uploading {} ({} bytes) to {}", payload.name, size, node_url);

        let part = Part::bytes(payload.content).file_name(payload.name.clone());
        let form = Form::new()
            .part("file", part)
            .text("user", owner.to_string())
            .text("targetDir", target_dir.to_string());

        let response = self
            .http
            .post(node_url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                DfsError::Transfer(format!("{}: {}", payload.name, e))
            })?;
        if !response.status().is_success() {
            return Err(DfsError::Transfer(format!(
                "storage node replied {} for {}",
                response.status(),
                payload.name
            )));
        }
        response
            .text()
            .await
            .map_err(|e| DfsError::Transfer(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempdir::TempDir;

    use super::*;

    #[test]
    fn payload_from_path_keeps_the_file_name() {
        let dir = TempDir::new("dfs_client_test").unwrap();
        let path = dir.path().join("report.pdf");
        fs::write(&path, b"content").unwrap();

        let payload = FilePayload::from_path(&path).unwrap();
        assert_eq!(payload.name, "report.pdf");
        assert_eq!(payload.content, b"content");
    }

    #[test]
    fn payload_from_missing_path_is_an_io_error() {
        let dir = TempDir::new("dfs_client_test").unwrap();
        let result = FilePayload::from_path(dir.path().join("absent.txt"));
        assert!(matches!(result, Err(DfsError::Io(_))));
    }
}
