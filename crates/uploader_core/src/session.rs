use std::path::PathBuf;

use crate::record::UploadStatus;

pub type SessionId = u64;

/// Bytes per upload request; the ingestion service rejects larger chunks.
pub const CHUNK_SIZE: u64 = 1_000_000;

/// Read-only handle to a file the user dropped or named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub path: PathBuf,
    pub original_name: String,
    pub size: u64,
}

impl LocalFile {
    pub fn new(path: impl Into<PathBuf>, original_name: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            original_name: original_name.into(),
            size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0 || self.original_name.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Submitting,
    Transmitting,
    Succeeded,
    Failed,
}

impl SessionPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionPhase::Succeeded | SessionPhase::Failed)
    }
}

/// Client-side lifecycle of one file from submission to terminal outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSession {
    pub id: SessionId,
    pub file: LocalFile,
    pub generated_name: String,
    pub user_id: String,
    pub bytes_loaded: u64,
    pub bytes_total: u64,
    pub chunk_size: u64,
    pub phase: SessionPhase,
    /// Latest status the listing reported for `generated_name`.
    pub server_status: Option<UploadStatus>,
}

impl UploadSession {
    pub(crate) fn new(
        id: SessionId,
        file: LocalFile,
        generated_name: String,
        user_id: String,
    ) -> Self {
        let bytes_total = file.size;
        Self {
            id,
            file,
            generated_name,
            user_id,
            bytes_loaded: 0,
            bytes_total,
            chunk_size: CHUNK_SIZE,
            phase: SessionPhase::Submitting,
            server_status: None,
        }
    }

    pub(crate) fn record_progress(&mut self, bytes_loaded: u64, bytes_total: u64) {
        if bytes_total > 0 {
            self.bytes_total = bytes_total;
        }
        self.bytes_loaded = bytes_loaded.min(self.bytes_total);
    }
}

/// `"{millis}_{trimmed original name}"`, the key that ties a session to its server record.
pub fn generated_name(submitted_at_millis: u64, original_name: &str) -> String {
    format!("{submitted_at_millis}_{}", original_name.trim())
}

/// Legacy first-chunk test for transports that only report byte counts.
pub fn is_first_chunk(bytes_uploaded: u64, chunk_size: u64) -> bool {
    bytes_uploaded <= chunk_size
}

/// True when `filename` looks like something [`generated_name`] produced.
pub(crate) fn has_generated_shape(filename: &str) -> bool {
    match filename.split_once('_') {
        Some((prefix, rest)) => {
            !prefix.is_empty() && !rest.is_empty() && prefix.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}
