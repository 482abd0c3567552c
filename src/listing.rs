use log::debug;
use reqwest::Client;
use url::Url;

use crate::config::join_endpoint;
use crate::protocol::{ListDirectoryRequest, RemoteFileEntry};
use crate::{DfsError, Result};

/// Queries the metadata service for the files under a remote directory.
pub struct ListingClient {
    http: Client,
    metadata_url: Url,
}

impl ListingClient {
    pub fn new(http: Client, metadata_url: Url) -> Self {
        Self { http, metadata_url }
    }

    /// Fetch the full listing for `directory`, in the order the server
    /// returns it. An empty directory is an empty list, not an error; a
    /// non-success reply never yields a partial list.
    pub async fn list_files(
        &self,
        owner: &str,
        directory: &str,
    ) -> Result<Vec<RemoteFileEntry>> {
        let url = join_endpoint(&self.metadata_url, "metadata/file/list")?;
        let request = ListDirectoryRequest {
            directory: directory.to_string(),
            owner: owner.to_string(),
        };

        let response = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| DfsError::Listing(e.to_string()))?;
        if !response.status().is_success() {
            return Err(DfsError::Listing(format!(
                "metadata service replied {}",
                response.status()
            )));
        }
        let entries: Vec<RemoteFileEntry> =
            response.json().await.map_err(|e| {
                DfsError::Listing(format!("malformed listing: {}", e))
            })?;
        debug!("{} files under {}", entries.len(), directory);
        Ok(entries)
    }
}
