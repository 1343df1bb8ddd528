use std::path::PathBuf;

/// Issue order of listing refreshes; a larger value was requested later.
pub type RefreshSeq = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartUpload {
        session_id: crate::SessionId,
        path: PathBuf,
        generated_name: String,
        user_id: String,
        chunk_size: u64,
    },
    RefreshListing {
        seq: RefreshSeq,
        reason: RefreshReason,
    },
}

/// Why a listing refresh was requested. Only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshReason {
    Startup,
    FirstChunk,
    FileCompleted,
    FileFailed,
}
