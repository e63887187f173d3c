//! Publishing of transit files to a remote folder.

pub mod auth;
pub mod drive;
pub mod error;
pub mod publisher;
pub mod store;

pub use auth::{ServiceAccountAuth, ServiceAccountKey};
pub use drive::DriveClient;
pub use error::{PublishError, Result};
pub use publisher::{publish_to_drive, replace_and_upload, PublishReport, PublishTarget};
pub use store::{RemoteFile, RemoteStore};
