//! Uploader core: pure upload-session state machine and view-model helpers.
mod effect;
mod msg;
mod notice;
mod progress;
mod record;
mod session;
mod state;
mod table;
mod update;
mod view_model;

pub use effect::{Effect, RefreshReason, RefreshSeq};
pub use msg::Msg;
pub use notice::{Notice, NoticeKind};
pub use progress::{progress_percent, ProgressIndicator};
pub use record::{RecordLink, UploadRecord, UploadStatus};
pub use session::{
    generated_name, is_first_chunk, LocalFile, SessionId, SessionPhase, UploadSession, CHUNK_SIZE,
};
pub use state::AppState;
pub use table::{render_table, DownloadLink, TableRow, TableView, COLUMN_HEADERS, DOWNLOAD_LABEL};
pub use update::update;
pub use view_model::{AppViewModel, SessionRowView};
