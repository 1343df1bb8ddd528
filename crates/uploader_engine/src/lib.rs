//! Uploader engine: chunked transport, listing client and effect execution.
mod chunking;
mod engine;
mod http;
mod settings;
mod status;
mod transport;
mod types;

pub use chunking::{chunk_ranges, ChunkRange};
pub use engine::{EngineError, EngineHandle};
pub use settings::{TransportSettings, FILES_ENDPOINT};
pub use status::{ReqwestStatusClient, StatusSyncClient};
pub use transport::{ChannelProgressSink, ChunkTransport, ProgressSink, ReqwestChunkTransport};
pub use types::{EngineEvent, FailureKind, TransportError, UploadRequest, UploadSummary};
