use crate::{AppState, Effect, Msg, Notice, RefreshReason, SessionPhase};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => request_refresh(&mut state, RefreshReason::Startup),
        Msg::FileSubmitted {
            file,
            user_id,
            submitted_at_millis,
        } => match state.open_session(file, user_id, submitted_at_millis) {
            Ok(session) => vec![Effect::StartUpload {
                session_id: session.id,
                path: session.file.path.clone(),
                generated_name: session.generated_name.clone(),
                user_id: session.user_id.clone(),
                chunk_size: session.chunk_size,
            }],
            Err(notice) => {
                state.push_notice(notice);
                Vec::new()
            }
        },
        Msg::TransferStarted { session_id } => {
            if let Some(session) = state.active_session_mut(session_id) {
                session.phase = SessionPhase::Transmitting;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ChunkProgress {
            session_id,
            bytes_loaded,
            bytes_total,
        } => {
            // Progress is local only; the listing is not consulted here.
            if let Some(session) = state.active_session_mut(session_id) {
                session.phase = SessionPhase::Transmitting;
                session.record_progress(bytes_loaded, bytes_total);
                state.refresh_progress();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ChunkCompleted {
            session_id,
            bytes_uploaded,
            is_first_chunk,
        } => {
            let Some(session) = state.active_session_mut(session_id) else {
                return (state, Vec::new());
            };
            session.phase = SessionPhase::Transmitting;
            let total = session.bytes_total;
            session.record_progress(bytes_uploaded.max(session.bytes_loaded), total);
            state.refresh_progress();
            state.mark_dirty();
            // Only the first chunk asks the server, so large files do not flood the listing.
            if is_first_chunk {
                request_refresh(&mut state, RefreshReason::FirstChunk)
            } else {
                Vec::new()
            }
        }
        Msg::FileCompleted { session_id } => {
            let Some(session) = state.active_session_mut(session_id) else {
                return (state, Vec::new());
            };
            let total = session.bytes_total;
            session.record_progress(total, total);
            state.refresh_progress();
            if let Some(session) = state.active_session_mut(session_id) {
                session.phase = SessionPhase::Succeeded;
            }
            state.mark_dirty();
            request_refresh(&mut state, RefreshReason::FileCompleted)
        }
        Msg::FileFailed { session_id, detail } => {
            let Some(session) = state.active_session_mut(session_id) else {
                return (state, Vec::new());
            };
            session.phase = SessionPhase::Failed;
            let name = session.generated_name.clone();
            state.push_notice(Notice::transport(format!("{name}: {detail}")));
            state.mark_dirty();
            request_refresh(&mut state, RefreshReason::FileFailed)
        }
        Msg::ListingFetched { seq, result } => {
            state.refresh_finished();
            match result {
                // Refreshes race each other; an older snapshot never replaces a newer one.
                Ok(_) if state.is_stale_listing(seq) => {}
                Ok(records) => state.apply_listing(seq, &records),
                // Keep the previous table: a failed round must not blank the listing.
                Err(detail) => {
                    state.push_notice(Notice::transport(format!("listing unavailable: {detail}")))
                }
            }
            Vec::new()
        }
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}

fn request_refresh(state: &mut AppState, reason: RefreshReason) -> Vec<Effect> {
    let seq = state.refresh_requested();
    vec![Effect::RefreshListing { seq, reason }]
}
