use crate::{SessionId, SessionPhase, TableView, UploadStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub progress_percent: u8,
    pub sessions: Vec<SessionRowView>,
    pub table: TableView,
    /// Filenames that look like ours but match no local session.
    pub unmatched_records: Vec<String>,
    pub pending_refreshes: usize,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn active_sessions(&self) -> usize {
        self.sessions
            .iter()
            .filter(|session| !session.phase.is_terminal())
            .count()
    }

    /// No transfer in flight and no listing refresh outstanding.
    pub fn is_settled(&self) -> bool {
        self.active_sessions() == 0 && self.pending_refreshes == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRowView {
    pub session_id: SessionId,
    pub generated_name: String,
    pub user_id: String,
    pub phase: SessionPhase,
    pub percent: Option<u8>,
    pub bytes_loaded: u64,
    pub bytes_total: u64,
    pub server_status: Option<UploadStatus>,
}
