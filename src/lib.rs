//! Client-side orchestration for a distributed file store.
//!
//! The crate decides where a file should live (placement resolution against
//! a metadata service), moves the bytes to the chosen storage node, mirrors
//! local directory trees into the remote namespace and retrieves listings
//! and file content back. The metadata service and the storage nodes are
//! external collaborators reached over HTTP; the client runs no placement
//! algorithm and keeps no state beyond files written at download time.

pub mod client;
pub mod config;
pub mod errors;
pub mod listing;
pub mod mirror;
pub mod placement;
pub mod protocol;
pub mod transfer;

pub use client::{DfsClient, UploadOutcome};
pub use config::ClientConfig;
pub use errors::{DfsError, Result};
pub use listing::ListingClient;
pub use mirror::{DirectoryMirror, FileOutcome, MirrorReport};
pub use placement::{HttpPlacementResolver, Placement, ResolvePlacement};
pub use protocol::RemoteFileEntry;
pub use transfer::{FilePayload, HttpTransferClient, UploadFile};
