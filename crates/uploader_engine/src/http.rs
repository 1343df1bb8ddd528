use std::time::Duration;

use url::Url;

use crate::settings::FILES_ENDPOINT;
use crate::{FailureKind, TransportError};

pub(crate) fn build_client(
    connect_timeout: Duration,
    timeout: Duration,
) -> Result<reqwest::Client, TransportError> {
    reqwest::Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(timeout)
        .build()
        .map_err(|err| TransportError::new(FailureKind::Network, err.to_string()))
}

/// `<base_url>/api/files`, keeping any path prefix the service is mounted under.
pub(crate) fn files_endpoint(base_url: &str) -> Result<Url, TransportError> {
    let mut url = Url::parse(base_url)
        .map_err(|err| TransportError::new(FailureKind::InvalidUrl, err.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| TransportError::new(FailureKind::InvalidUrl, "url cannot be a base"))?
        .pop_if_empty()
        .extend(FILES_ENDPOINT);
    Ok(url)
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(FailureKind::Timeout, err.to_string());
    }
    TransportError::new(FailureKind::Network, err.to_string())
}

/// Server-provided detail for a rejected request, falling back to the status line.
pub(crate) async fn rejection(response: reqwest::Response) -> TransportError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let detail = body.trim();
    let message = if detail.is_empty() {
        status.to_string()
    } else {
        detail.to_string()
    };
    TransportError::new(FailureKind::HttpStatus(status.as_u16()), message)
}
