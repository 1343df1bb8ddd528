use std::time::Duration;

use upload_logging::upload_info;
use uploader_core::{Effect, Msg};
use uploader_engine::{EngineEvent, EngineHandle, UploadRequest};

/// Executes core effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartUpload {
                    session_id,
                    path,
                    generated_name,
                    user_id,
                    chunk_size,
                } => {
                    upload_info!(
                        "StartUpload session={} name={} user={}",
                        session_id,
                        generated_name,
                        user_id
                    );
                    self.engine.start_upload(UploadRequest {
                        session_id,
                        path,
                        generated_name,
                        user_id,
                        chunk_size,
                    });
                }
                Effect::RefreshListing { seq, reason } => {
                    upload_info!("RefreshListing seq={} reason={:?}", seq, reason);
                    self.engine.refresh_listing(seq);
                }
            }
        }
    }

    /// Waits up to `timeout` for the next engine event.
    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(map_event)
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::TransferStarted { session_id } => Msg::TransferStarted { session_id },
        EngineEvent::ChunkProgress {
            session_id,
            bytes_loaded,
            bytes_total,
        } => Msg::ChunkProgress {
            session_id,
            bytes_loaded,
            bytes_total,
        },
        EngineEvent::ChunkCompleted {
            session_id,
            bytes_uploaded,
            is_first_chunk,
            ..
        } => Msg::ChunkCompleted {
            session_id,
            bytes_uploaded,
            is_first_chunk,
        },
        EngineEvent::UploadFinished { session_id, result } => match result {
            Ok(_) => Msg::FileCompleted { session_id },
            Err(err) => Msg::FileFailed {
                session_id,
                detail: err.to_string(),
            },
        },
        EngineEvent::ListingFetched { seq, result } => Msg::ListingFetched {
            seq,
            result: result.map_err(|err| err.to_string()),
        },
    }
}
