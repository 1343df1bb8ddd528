use std::fmt;

use serde::{Deserialize, Serialize};

/// Processing state reported by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UploadStatus {
    Pending,
    Uploading,
    Completed,
    Failed,
    /// Any label the server sends that this client does not know yet.
    Other(String),
}

impl UploadStatus {
    pub fn label(&self) -> &str {
        match self {
            UploadStatus::Pending => "Pending",
            UploadStatus::Uploading => "Uploading",
            UploadStatus::Completed => "Completed",
            UploadStatus::Failed => "Failed",
            UploadStatus::Other(label) => label,
        }
    }

    pub fn is_downloadable(&self) -> bool {
        matches!(self, UploadStatus::Completed)
    }
}

impl From<String> for UploadStatus {
    fn from(label: String) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "pending" => UploadStatus::Pending,
            "uploading" => UploadStatus::Uploading,
            "completed" => UploadStatus::Completed,
            "failed" => UploadStatus::Failed,
            _ => UploadStatus::Other(label),
        }
    }
}

impl From<UploadStatus> for String {
    fn from(status: UploadStatus) -> Self {
        status.label().to_string()
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Hypermedia link attached to each listed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
    pub href: String,
}

/// One row of the server's authoritative upload listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub user_id: String,
    pub filename: String,
    pub status: UploadStatus,
    #[serde(default)]
    pub uploaded_time_in_milliseconds: Option<u64>,
    #[serde(default)]
    pub chunks: Option<u32>,
    #[serde(default)]
    pub links: Option<RecordLink>,
}

impl UploadRecord {
    /// The download href, only once the server reports the file as completed.
    pub fn download_link(&self) -> Option<&str> {
        if !self.status.is_downloadable() {
            return None;
        }
        self.links.as_ref().map(|link| link.href.as_str())
    }
}
