//! In-memory image store adapter.
//!
//! Stands in for the remote object store during development and tests. The
//! adapter records every destroy call so the integration harness can assert
//! on cascade behaviour.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{ImageStore, ImageStoreError};
use crate::domain::{Image, ImageUpload};

/// A recorded `destroy` call: the deleted key and the invalidate flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestroyCall {
    pub key: String,
    pub invalidate: bool,
}

#[derive(Default)]
pub struct InMemoryImageStore {
    destroyed: Mutex<Vec<DestroyCall>>,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every destroy call issued so far, in order.
    pub async fn destroy_calls(&self) -> Vec<DestroyCall> {
        self.destroyed.lock().await.clone()
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn store(&self, upload: &ImageUpload) -> Result<Image, ImageStoreError> {
        // Locator mirrors the shape a CDN-backed store would return.
        let url = format!("https://images.restofind.test/{}", upload.file_name);
        Ok(Image::new(url, upload.file_name.clone()))
    }

    async fn destroy(&self, file_name: &str, invalidate: bool) -> Result<(), ImageStoreError> {
        self.destroyed.lock().await.push(DestroyCall {
            key: file_name.to_owned(),
            invalidate,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_derives_the_locator_from_the_key() {
        let store = InMemoryImageStore::new();
        let image = store
            .store(&ImageUpload {
                file_name: "listings/abc123".to_owned(),
            })
            .await
            .expect("store");
        assert_eq!(image.file_name(), "listings/abc123");
        assert!(image.url().ends_with("/listings/abc123"));
    }

    #[tokio::test]
    async fn destroy_calls_are_recorded_in_order() {
        let store = InMemoryImageStore::new();
        store.destroy("a", true).await.expect("destroy");
        store.destroy("b", false).await.expect("destroy");

        let calls = store.destroy_calls().await;
        assert_eq!(
            calls,
            vec![
                DestroyCall {
                    key: "a".to_owned(),
                    invalidate: true
                },
                DestroyCall {
                    key: "b".to_owned(),
                    invalidate: false
                },
            ]
        );
    }
}
