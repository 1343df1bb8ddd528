use crate::{LocalFile, RefreshSeq, SessionId, UploadRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Application launched; the listing is loaded once up front.
    Started,
    /// User dropped a file and entered a user id.
    FileSubmitted {
        file: LocalFile,
        user_id: String,
        submitted_at_millis: u64,
    },
    /// Transport dispatched the first chunk of a session.
    TransferStarted { session_id: SessionId },
    /// Transport byte progress for a session.
    ChunkProgress {
        session_id: SessionId,
        bytes_loaded: u64,
        bytes_total: u64,
    },
    /// One chunk was accepted by the upload endpoint.
    ChunkCompleted {
        session_id: SessionId,
        bytes_uploaded: u64,
        is_first_chunk: bool,
    },
    /// Every chunk of the file was accepted.
    FileCompleted { session_id: SessionId },
    /// Transport gave up on the file.
    FileFailed { session_id: SessionId, detail: String },
    /// Outcome of the listing refresh issued as `seq`; the error carries the
    /// server-provided detail.
    ListingFetched {
        seq: RefreshSeq,
        result: Result<Vec<UploadRecord>, String>,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
}
