use upload_logging::upload_debug;
use uploader_core::UploadRecord;

use crate::http::{build_client, files_endpoint, map_reqwest_error, rejection};
use crate::{FailureKind, TransportError, TransportSettings};

/// Reads the authoritative upload listing.
#[async_trait::async_trait]
pub trait StatusSyncClient: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<UploadRecord>, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestStatusClient {
    settings: TransportSettings,
}

impl ReqwestStatusClient {
    pub fn new(settings: TransportSettings) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait]
impl StatusSyncClient for ReqwestStatusClient {
    async fn fetch_all(&self) -> Result<Vec<UploadRecord>, TransportError> {
        let endpoint = files_endpoint(&self.settings.base_url)?;
        // The whole exchange, body included, is bounded by the listing timeout.
        let client = build_client(self.settings.connect_timeout, self.settings.listing_timeout)?;

        let response = client.get(endpoint).send().await.map_err(map_reqwest_error)?;
        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let records: Vec<UploadRecord> = serde_json::from_slice(&body)
            .map_err(|err| TransportError::new(FailureKind::Decode, err.to_string()))?;
        upload_debug!("Listing returned {} records", records.len());
        Ok(records)
    }
}
