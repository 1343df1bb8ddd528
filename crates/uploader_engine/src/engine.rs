use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use upload_logging::{upload_debug, upload_warn};
use uploader_core::RefreshSeq;

use crate::status::{ReqwestStatusClient, StatusSyncClient};
use crate::transport::{ChannelProgressSink, ChunkTransport, ReqwestChunkTransport};
use crate::{EngineEvent, TransportSettings, UploadRequest};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

enum EngineCommand {
    StartUpload(UploadRequest),
    RefreshListing(RefreshSeq),
}

/// Runs transfers and listing refreshes off the caller's thread.
///
/// Every command is spawned on its own task, so a slow refresh never holds up
/// chunk traffic and sessions proceed independently.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: TransportSettings) -> Result<Self, EngineError> {
        Self::with_clients(
            Arc::new(ReqwestChunkTransport::new(settings.clone())),
            Arc::new(ReqwestStatusClient::new(settings)),
        )
    }

    pub fn with_clients(
        transport: Arc<dyn ChunkTransport>,
        status: Arc<dyn StatusSyncClient>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let transport = transport.clone();
                let status = status.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(transport.as_ref(), status.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn start_upload(&self, request: UploadRequest) {
        let _ = self.cmd_tx.send(EngineCommand::StartUpload(request));
    }

    /// Fetches the listing; the resulting event echoes `seq`.
    pub fn refresh_listing(&self, seq: RefreshSeq) {
        let _ = self.cmd_tx.send(EngineCommand::RefreshListing(seq));
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    transport: &dyn ChunkTransport,
    status: &dyn StatusSyncClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::StartUpload(request) => {
            let sink = Arc::new(ChannelProgressSink::new(event_tx.clone()));
            let result = transport.upload(&request, sink).await;
            if let Err(err) = &result {
                upload_warn!("Upload session={} failed: {}", request.session_id, err);
            }
            let _ = event_tx.send(EngineEvent::UploadFinished {
                session_id: request.session_id,
                result,
            });
        }
        EngineCommand::RefreshListing(seq) => {
            let result = status.fetch_all().await;
            match &result {
                Ok(records) => {
                    upload_debug!("Listing refresh seq={} returned {} records", seq, records.len())
                }
                Err(err) => upload_warn!("Listing refresh seq={} failed: {}", seq, err),
            }
            let _ = event_tx.send(EngineEvent::ListingFetched { seq, result });
        }
    }
}
