use std::env;
use std::path::PathBuf;

use anyhow::anyhow;
use url::Url;

use crate::Result;

pub const METADATA_URL_ENV: &str = "DFS_METADATA_URL";
pub const DOWNLOAD_DIR_ENV: &str = "DFS_DOWNLOAD_DIR";

pub const DEFAULT_METADATA_URL: &str = "http://localhost:8080";
pub const DEFAULT_DOWNLOAD_DIR: &str = "./download";

/// Everything the client needs to know about its surroundings: where the
/// metadata service lives and where downloaded files are written. Passed
/// explicitly at construction; no component reads ambient state.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub metadata_url: Url,
    pub download_root: PathBuf,
}

impl ClientConfig {
    pub fn new<P: Into<PathBuf>>(metadata_url: Url, download_root: P) -> Self {
        Self {
            metadata_url,
            download_root: download_root.into(),
        }
    }

    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let raw = env::var(METADATA_URL_ENV)
            .unwrap_or_else(|_| DEFAULT_METADATA_URL.to_string());
        let metadata_url = Url::parse(&raw)
            .map_err(|e| anyhow!("invalid {}: {}", METADATA_URL_ENV, e))?;
        let download_root = env::var(DOWNLOAD_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DOWNLOAD_DIR));
        Ok(Self {
            metadata_url,
            download_root,
        })
    }
}

/// Resolve a service path against a base URL without disturbing any path
/// the base already carries.
pub(crate) fn join_endpoint(base: &Url, path: &str) -> Result<Url> {
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined)
        .map_err(|e| anyhow!("cannot build endpoint {}: {}", joined, e).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_without_doubled_separators() {
        let base = Url::parse("http://localhost:8080").unwrap();
        let url = join_endpoint(&base, "/metadata/upload-url").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/metadata/upload-url");

        let base = Url::parse("http://meta.example/api/").unwrap();
        let url = join_endpoint(&base, "metadata/file/list").unwrap();
        assert_eq!(url.as_str(), "http://meta.example/api/metadata/file/list");
    }
}
