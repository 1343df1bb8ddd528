use std::time::Duration;

use uploader_core::CHUNK_SIZE;

/// Path of the upload and listing endpoint, relative to the service root.
pub const FILES_ENDPOINT: [&str; 2] = ["api", "files"];

#[derive(Debug, Clone)]
pub struct TransportSettings {
    pub base_url: String,
    pub chunk_size: u64,
    pub connect_timeout: Duration,
    /// Per chunk request.
    pub request_timeout: Duration,
    pub listing_timeout: Duration,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            chunk_size: CHUNK_SIZE,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            listing_timeout: Duration::from_secs(10),
        }
    }
}

impl TransportSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}
