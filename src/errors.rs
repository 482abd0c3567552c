use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DfsError>;

#[derive(Error, Debug)]
pub enum DfsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("placement unavailable: {0}")]
    PlacementUnavailable(String),
    #[error("transfer failed: {0}")]
    Transfer(String),
    #[error("not found in the store: {0}")]
    DownloadNotFound(String),
    #[error("not a directory: {}", .0.display())]
    InvalidLocalPath(PathBuf),
    #[error("listing failed: {0}")]
    Listing(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<walkdir::Error> for DfsError {
    fn from(e: walkdir::Error) -> Self {
        Self::Io(e.into())
    }
}
