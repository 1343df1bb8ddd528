use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use futures_util::StreamExt;
use reqwest::header::CONTENT_RANGE;
use reqwest::multipart::{Form, Part};
use reqwest::Body;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use upload_logging::{upload_debug, upload_info};
use uploader_core::SessionId;

use crate::chunking::{chunk_ranges, ChunkRange};
use crate::http::{build_client, files_endpoint, map_reqwest_error, rejection};
use crate::{
    EngineEvent, FailureKind, TransportError, TransportSettings, UploadRequest, UploadSummary,
};

/// Granularity of progress reports inside one chunk.
const PROGRESS_SLICE: usize = 64 * 1024;

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Moves one file to the upload endpoint in sequential chunks.
#[async_trait::async_trait]
pub trait ChunkTransport: Send + Sync {
    async fn upload(
        &self,
        request: &UploadRequest,
        sink: Arc<dyn ProgressSink>,
    ) -> Result<UploadSummary, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestChunkTransport {
    settings: TransportSettings,
}

impl ReqwestChunkTransport {
    pub fn new(settings: TransportSettings) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait]
impl ChunkTransport for ReqwestChunkTransport {
    async fn upload(
        &self,
        request: &UploadRequest,
        sink: Arc<dyn ProgressSink>,
    ) -> Result<UploadSummary, TransportError> {
        let endpoint = files_endpoint(&self.settings.base_url)?;
        let client = build_client(self.settings.connect_timeout, self.settings.request_timeout)?;

        let mut file = File::open(&request.path)
            .await
            .map_err(|err| io_error(&request.path, err))?;
        let total = file
            .metadata()
            .await
            .map_err(|err| io_error(&request.path, err))?
            .len();
        let ranges = chunk_ranges(total, request.chunk_size);
        // A file that fits in one request goes out as a plain multipart upload.
        let chunked = ranges.len() > 1;
        upload_info!(
            "Uploading session={} name={} bytes={} chunks={}",
            request.session_id,
            request.generated_name,
            total,
            ranges.len()
        );

        let session_id = request.session_id;
        sink.emit(EngineEvent::TransferStarted { session_id });
        sink.emit(EngineEvent::ChunkProgress {
            session_id,
            bytes_loaded: 0,
            bytes_total: total,
        });

        let mut chunks_sent = 0;
        for range in &ranges {
            let body = read_range(&mut file, range)
                .await
                .map_err(|err| io_error(&request.path, err))?;
            let body = progress_body(body, range, total, session_id, sink.clone());
            let part =
                Part::stream_with_length(body, range.len()).file_name(request.generated_name.clone());
            let form = Form::new()
                .text("userId", request.user_id.clone())
                .part("file", part);

            let mut builder = client.post(endpoint.clone()).multipart(form);
            if chunked {
                builder = builder.header(CONTENT_RANGE, range.content_range(total));
            }
            let response = builder.send().await.map_err(map_reqwest_error)?;
            if !response.status().is_success() {
                return Err(rejection(response).await);
            }

            chunks_sent += 1;
            upload_debug!(
                "Chunk accepted session={} index={} end={}/{}",
                session_id,
                range.index,
                range.end,
                total
            );
            sink.emit(EngineEvent::ChunkCompleted {
                session_id,
                chunk_index: range.index,
                bytes_uploaded: range.end,
                is_first_chunk: range.index == 0,
            });
        }

        Ok(UploadSummary {
            session_id,
            bytes_sent: total,
            chunks_sent,
        })
    }
}

/// Streams a chunk in slices, reporting the running byte count as each slice
/// is handed to the connection.
fn progress_body(
    data: Vec<u8>,
    range: &ChunkRange,
    total: u64,
    session_id: SessionId,
    sink: Arc<dyn ProgressSink>,
) -> Body {
    let data = Bytes::from(data);
    let slices: Vec<Bytes> = (0..data.len())
        .step_by(PROGRESS_SLICE)
        .map(|start| data.slice(start..data.len().min(start + PROGRESS_SLICE)))
        .collect();
    let mut loaded = range.start;
    let stream = futures_util::stream::iter(slices).map(move |slice| {
        loaded += slice.len() as u64;
        sink.emit(EngineEvent::ChunkProgress {
            session_id,
            bytes_loaded: loaded,
            bytes_total: total,
        });
        Ok::<_, std::io::Error>(slice)
    });
    Body::wrap_stream(stream)
}

async fn read_range(file: &mut File, range: &ChunkRange) -> std::io::Result<Vec<u8>> {
    file.seek(std::io::SeekFrom::Start(range.start)).await?;
    let mut buf = vec![0; range.len() as usize];
    file.read_exact(&mut buf).await?;
    Ok(buf)
}

fn io_error(path: &Path, err: std::io::Error) -> TransportError {
    TransportError::new(FailureKind::Io, format!("{}: {err}", path.display()))
}
