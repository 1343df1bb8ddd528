use std::fmt;
use std::path::PathBuf;

use uploader_core::{RefreshSeq, SessionId, UploadRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub session_id: SessionId,
    pub path: PathBuf,
    pub generated_name: String,
    pub user_id: String,
    pub chunk_size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSummary {
    pub session_id: SessionId,
    pub bytes_sent: u64,
    pub chunks_sent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    TransferStarted {
        session_id: SessionId,
    },
    ChunkProgress {
        session_id: SessionId,
        bytes_loaded: u64,
        bytes_total: u64,
    },
    ChunkCompleted {
        session_id: SessionId,
        chunk_index: u32,
        bytes_uploaded: u64,
        is_first_chunk: bool,
    },
    UploadFinished {
        session_id: SessionId,
        result: Result<UploadSummary, TransportError>,
    },
    ListingFetched {
        seq: RefreshSeq,
        result: Result<Vec<UploadRecord>, TransportError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: FailureKind,
    pub message: String,
}

impl TransportError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    Io,
    Decode,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Io => write!(f, "io error"),
            FailureKind::Decode => write!(f, "malformed listing"),
        }
    }
}
