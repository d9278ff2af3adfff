//! Port abstraction for the remote image store.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::domain::restaurant::{Image, ImageUpload};

use super::define_port_error;

define_port_error! {
    /// Failures raised by image store adapters.
    pub enum ImageStoreError {
        /// Upload to the remote store failed.
        Upload { message: String } => "image upload failed: {message}",
        /// Remote delete call failed.
        Delete { key: String, message: String } => "image delete for {key} failed: {message}",
    }
}

/// Remote image store port.
///
/// `store` returns the locator/key pair the remote provider assigned;
/// `destroy` deletes by key, optionally invalidating cached copies at the
/// provider's edge.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Upload a file, returning its remote reference.
    async fn store(&self, upload: &ImageUpload) -> Result<Image, ImageStoreError>;

    /// Delete a stored file by key.
    async fn destroy(&self, file_name: &str, invalidate: bool) -> Result<(), ImageStoreError>;
}
