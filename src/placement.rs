//! Placement resolution: asking the metadata service whether a file already
//! exists at a location and, if not, which storage node should receive it.
//! The client runs no placement algorithm of its own.

use log::debug;
use reqwest::Client;
use url::Url;
use uuid::Uuid;

use crate::config::join_endpoint;
use crate::protocol::{UploadUrlRequest, UploadUrlResponse};
use crate::{DfsError, Result};

/// Tagged outcome of placement resolution. "Already exists" is a valid
/// terminal outcome, not a failure; transport and protocol problems surface
/// as `DfsError::PlacementUnavailable` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// The file is already present at the requested location; the caller
    /// must not transfer anything.
    AlreadyExists,
    /// The storage node selected by the metadata service to receive the
    /// bytes.
    Assigned(Url),
}

impl Placement {
    fn from_response(response: UploadUrlResponse) -> Result<Self> {
        if response.exists {
            return Ok(Placement::AlreadyExists);
        }
        if response.node_url.is_empty() {
            return Err(DfsError::PlacementUnavailable(
                "metadata service assigned no storage node".into(),
            ));
        }
        let node = Url::parse(&response.node_url).map_err(|e| {
            DfsError::PlacementUnavailable(format!(
                "bad node url {:?}: {}",
                response.node_url, e
            ))
        })?;
        Ok(Placement::Assigned(node))
    }
}

#[allow(async_fn_in_trait)]
pub trait ResolvePlacement {
    async fn resolve_placement(
        &self,
        owner: &str,
        filename: &str,
        target_dir: &str,
    ) -> Result<Placement>;
}

/// Resolver backed by the real metadata service.
pub struct HttpPlacementResolver {
    http: Client,
    metadata_url: Url,
}

impl HttpPlacementResolver {
    pub fn new(http: Client, metadata_url: Url) -> Self {
        Self { http, metadata_url }
    }
}

impl ResolvePlacement for HttpPlacementResolver {
    async fn resolve_placement(
        &self,
        owner: &str,
        filename: &str,
        target_dir: &str,
    ) -> Result<Placement> {
        let request = UploadUrlRequest {
            uuid: Uuid::new_v4().to_string(),
            filename: filename.to_string(),
            target_dir: target_dir.to_string(),
            owner: owner.to_string(),
        };
        let url = join_endpoint(&self.metadata_url, "metadata/upload-url")?;
        debug!(
            "resolving placement for {} in {} (request {})",
            filename, target_dir, request.uuid
        );

        let response = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| DfsError::PlacementUnavailable(e.to_string()))?;
        if !response.status().is_success() {
            return Err(DfsError::PlacementUnavailable(format!(
                "metadata service replied {}",
                response.status()
            )));
        }
        let body: UploadUrlResponse = response.json().await.map_err(|e| {
            DfsError::PlacementUnavailable(format!("malformed reply: {}", e))
        })?;
        Placement::from_response(body)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn existing_file_is_a_terminal_outcome() {
        let placement = Placement::from_response(UploadUrlResponse {
            exists: true,
            node_url: String::new(),
        })
        .unwrap();
        assert_eq!(placement, Placement::AlreadyExists);
    }

    #[test]
    fn assigned_node_is_parsed_as_a_url() {
        let placement = Placement::from_response(UploadUrlResponse {
            exists: false,
            node_url: "http://node-1:8081/dfs/upload".into(),
        })
        .unwrap();
        assert_eq!(
            placement,
            Placement::Assigned(
                Url::parse("http://node-1:8081/dfs/upload").unwrap()
            )
        );
    }

    #[rstest]
    #[case("")]
    #[case("not a url")]
    fn missing_or_bad_node_url_is_a_resolution_failure(#[case] node_url: &str) {
        let result = Placement::from_response(UploadUrlResponse {
            exists: false,
            node_url: node_url.to_string(),
        });
        assert!(matches!(result, Err(DfsError::PlacementUnavailable(_))));
    }
}
