use std::collections::{BTreeMap, BTreeSet};

use crate::progress::{progress_percent, ProgressIndicator};
use crate::session::{generated_name, has_generated_shape};
use crate::view_model::{AppViewModel, SessionRowView};
use crate::{
    render_table, LocalFile, Notice, RefreshSeq, SessionId, TableView, UploadRecord, UploadSession,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    sessions: BTreeMap<SessionId, UploadSession>,
    next_session_id: SessionId,
    last_name_millis: Option<u64>,
    progress: ProgressIndicator,
    table: TableView,
    unmatched_records: Vec<String>,
    pending_refreshes: usize,
    last_refresh_seq: RefreshSeq,
    applied_listing_seq: Option<RefreshSeq>,
    notices: Vec<Notice>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            sessions: BTreeMap::new(),
            next_session_id: 1,
            last_name_millis: None,
            progress: ProgressIndicator::default(),
            table: TableView::default(),
            unmatched_records: Vec::new(),
            pending_refreshes: 0,
            last_refresh_seq: 0,
            applied_listing_seq: None,
            notices: Vec::new(),
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            progress_percent: self.progress.percent(),
            sessions: self.sessions.values().map(session_row).collect(),
            table: self.table.clone(),
            unmatched_records: self.unmatched_records.clone(),
            pending_refreshes: self.pending_refreshes,
            dirty: self.dirty,
        }
    }

    /// Returns whether the view changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Drains notices in the order they were raised.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Validates a submission and opens a session for it.
    pub(crate) fn open_session(
        &mut self,
        file: LocalFile,
        user_id: String,
        submitted_at_millis: u64,
    ) -> Result<&UploadSession, Notice> {
        if user_id.trim().is_empty() {
            return Err(Notice::validation("a user id is required"));
        }
        if file.is_empty() {
            return Err(Notice::validation(format!(
                "file {} is empty",
                file.path.display()
            )));
        }

        // Two submissions in the same millisecond still get distinct names.
        let millis = match self.last_name_millis {
            Some(last) if submitted_at_millis <= last => last + 1,
            _ => submitted_at_millis,
        };
        self.last_name_millis = Some(millis);

        let session_id = self.next_session_id;
        self.next_session_id += 1;
        let name = generated_name(millis, &file.original_name);
        let session = UploadSession::new(session_id, file, name, user_id);
        self.dirty = true;
        Ok(self.sessions.entry(session_id).or_insert(session))
    }

    /// A session that still accepts transport events.
    pub(crate) fn active_session_mut(
        &mut self,
        session_id: SessionId,
    ) -> Option<&mut UploadSession> {
        self.sessions
            .get_mut(&session_id)
            .filter(|session| !session.phase.is_terminal())
    }

    pub(crate) fn refresh_progress(&mut self) {
        let (loaded, total) = self
            .sessions
            .values()
            .filter(|session| !session.phase.is_terminal())
            .fold((0_u64, 0_u64), |(loaded, total), session| {
                (
                    loaded.saturating_add(session.bytes_loaded),
                    total.saturating_add(session.bytes_total),
                )
            });
        self.progress.update(loaded, total);
    }

    /// Counts a new refresh as in flight and returns its sequence number.
    pub(crate) fn refresh_requested(&mut self) -> RefreshSeq {
        self.pending_refreshes += 1;
        self.last_refresh_seq += 1;
        self.last_refresh_seq
    }

    pub(crate) fn refresh_finished(&mut self) {
        self.pending_refreshes = self.pending_refreshes.saturating_sub(1);
    }

    /// Whether a listing requested as `seq` is older than the one on screen.
    pub(crate) fn is_stale_listing(&self, seq: RefreshSeq) -> bool {
        self.applied_listing_seq.is_some_and(|applied| seq <= applied)
    }

    /// Replaces the listing and cross-references it with local sessions.
    pub(crate) fn apply_listing(&mut self, seq: RefreshSeq, records: &[UploadRecord]) {
        self.applied_listing_seq = Some(seq);
        self.table = render_table(records);

        let local_names: BTreeSet<&str> = self
            .sessions
            .values()
            .map(|session| session.generated_name.as_str())
            .collect();
        let local_users: BTreeSet<&str> = self
            .sessions
            .values()
            .map(|session| session.user_id.as_str())
            .collect();
        self.unmatched_records = records
            .iter()
            .filter(|record| {
                local_users.contains(record.user_id.as_str())
                    && has_generated_shape(&record.filename)
                    && !local_names.contains(record.filename.as_str())
            })
            .map(|record| record.filename.clone())
            .collect();

        for session in self.sessions.values_mut() {
            session.server_status = records
                .iter()
                .find(|record| record.filename == session.generated_name)
                .map(|record| record.status.clone());
        }
        self.dirty = true;
    }
}

fn session_row(session: &UploadSession) -> SessionRowView {
    SessionRowView {
        session_id: session.id,
        generated_name: session.generated_name.clone(),
        user_id: session.user_id.clone(),
        phase: session.phase,
        percent: progress_percent(session.bytes_loaded, session.bytes_total),
        bytes_loaded: session.bytes_loaded,
        bytes_total: session.bytes_total,
        server_status: session.server_status.clone(),
    }
}
