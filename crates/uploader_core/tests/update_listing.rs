use std::sync::Once;

use pretty_assertions::assert_eq;
use uploader_core::{
    update, AppState, Effect, LocalFile, Msg, NoticeKind, RecordLink, UploadRecord, UploadStatus,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(upload_logging::initialize_for_tests);
}

fn record(user: &str, filename: &str, status: UploadStatus) -> UploadRecord {
    UploadRecord {
        id: None,
        user_id: user.to_string(),
        filename: filename.to_string(),
        status,
        uploaded_time_in_milliseconds: Some(1050),
        chunks: Some(3),
        links: Some(RecordLink {
            rel: Some("uploadedFile".to_string()),
            href: format!("/files/{filename}"),
        }),
    }
}

fn alice_uploads_report() -> AppState {
    let (state, effects) = update(
        AppState::new(),
        Msg::FileSubmitted {
            file: LocalFile::new("/home/alice/report.pdf", "report.pdf", 2_500_000),
            user_id: "alice".to_string(),
            submitted_at_millis: 1000,
        },
    );
    assert!(matches!(effects[0], Effect::StartUpload { .. }));
    let (state, _) = update(state, Msg::TransferStarted { session_id: 1 });
    let (state, _) = update(state, Msg::FileCompleted { session_id: 1 });
    state
}

#[test]
fn completed_upload_renders_clickable_row() {
    init_logging();
    let state = alice_uploads_report();
    assert_eq!(state.view().pending_refreshes, 1);

    let (mut state, effects) = update(
        state,
        Msg::ListingFetched {
            seq: 1,
            result: Ok(vec![record("alice", "1000_report.pdf", UploadStatus::Completed)]),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert!(view.is_settled());
    assert_eq!(view.table.rows.len(), 1);
    let row = &view.table.rows[0];
    assert_eq!(row.filename, "1000_report.pdf");
    let link = row.download.as_ref().expect("completed rows link to the file");
    assert_eq!(link.href, "/files/1000_report.pdf");
    assert_eq!(link.label, "Click");
    assert_eq!(view.sessions[0].server_status, Some(UploadStatus::Completed));
    assert!(state.consume_dirty());
}

#[test]
fn failed_refresh_keeps_previous_table() {
    init_logging();
    let state = alice_uploads_report();
    let (state, _) = update(
        state,
        Msg::ListingFetched {
            seq: 1,
            result: Ok(vec![record("alice", "1000_report.pdf", UploadStatus::Completed)]),
        },
    );
    let table_before = state.view().table;

    let (state, _) = update(state, Msg::Started);
    let (mut state, effects) = update(
        state,
        Msg::ListingFetched {
            seq: 2,
            result: Err("http status 500".to_string()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.view().table, table_before);
    assert!(state.view().is_settled());
    let notices = state.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Transport);
    assert!(notices[0].message.contains("http status 500"));
}

#[test]
fn successful_refresh_replaces_all_rows() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = update(
        state,
        Msg::ListingFetched {
            seq: 1,
            result: Ok(vec![
                record("bob", "1_a.txt", UploadStatus::Pending),
                record("bob", "2_b.txt", UploadStatus::Completed),
            ]),
        },
    );
    assert_eq!(state.view().table.rows.len(), 2);

    let (state, _) = update(state, Msg::Started);
    let (state, _) = update(
        state,
        Msg::ListingFetched {
            seq: 2,
            result: Ok(vec![record("carol", "3_c.txt", UploadStatus::Failed)]),
        },
    );
    let rows = state.view().table.rows;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user_id, "carol");
    assert_eq!(rows[0].download, None);

    let (state, _) = update(state, Msg::Started);
    let (state, _) = update(
        state,
        Msg::ListingFetched {
            seq: 3,
            result: Ok(Vec::new()),
        },
    );
    assert!(state.view().table.is_empty());
}

#[test]
fn server_order_is_preserved() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::ListingFetched {
            seq: 1,
            result: Ok(vec![
                record("z", "9_z.txt", UploadStatus::Completed),
                record("a", "1_a.txt", UploadStatus::Completed),
                record("m", "5_m.txt", UploadStatus::Completed),
            ]),
        },
    );
    let users: Vec<_> = state
        .view()
        .table
        .rows
        .iter()
        .map(|row| row.user_id.clone())
        .collect();
    assert_eq!(users, vec!["z", "a", "m"]);
}

#[test]
fn unmatched_records_are_informational() {
    init_logging();
    let state = alice_uploads_report();
    let (mut state, effects) = update(
        state,
        Msg::ListingFetched {
            seq: 1,
            result: Ok(vec![
                record("alice", "1000_report.pdf", UploadStatus::Completed),
                record("alice", "900_old.pdf", UploadStatus::Completed),
                record("alice", "notes.txt", UploadStatus::Completed),
                record("bob", "950_theirs.pdf", UploadStatus::Pending),
            ]),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.table.rows.len(), 4);
    assert_eq!(view.unmatched_records, vec!["900_old.pdf".to_string()]);
    assert!(state.take_notices().is_empty());
}

#[test]
fn server_status_follows_latest_listing() {
    init_logging();
    let state = alice_uploads_report();
    let (state, _) = update(
        state,
        Msg::ListingFetched {
            seq: 1,
            result: Ok(vec![record("alice", "1000_report.pdf", UploadStatus::Pending)]),
        },
    );
    assert_eq!(
        state.view().sessions[0].server_status,
        Some(UploadStatus::Pending)
    );

    let (state, _) = update(
        state,
        Msg::ListingFetched {
            seq: 2,
            result: Ok(vec![record("alice", "1000_report.pdf", UploadStatus::Completed)]),
        },
    );
    assert_eq!(
        state.view().sessions[0].server_status,
        Some(UploadStatus::Completed)
    );
}

#[test]
fn late_first_chunk_listing_does_not_overwrite_completed_status() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::FileSubmitted {
            file: LocalFile::new("/home/alice/report.pdf", "report.pdf", 2_000_000),
            user_id: "alice".to_string(),
            submitted_at_millis: 1000,
        },
    );
    let (state, first) = update(
        state,
        Msg::ChunkCompleted {
            session_id: 1,
            bytes_uploaded: 1_000_000,
            is_first_chunk: true,
        },
    );
    let (state, last) = update(state, Msg::FileCompleted { session_id: 1 });
    let seq_of = |effects: &[Effect]| match effects {
        [Effect::RefreshListing { seq, .. }] => *seq,
        other => panic!("expected one refresh, got {other:?}"),
    };
    let (first_seq, last_seq) = (seq_of(&first), seq_of(&last));
    assert!(first_seq < last_seq);
    assert_eq!(state.view().pending_refreshes, 2);

    // The file-completed refresh answers first, the slow first-chunk one after it.
    let (state, _) = update(
        state,
        Msg::ListingFetched {
            seq: last_seq,
            result: Ok(vec![record("alice", "1000_report.pdf", UploadStatus::Completed)]),
        },
    );
    let (mut state, effects) = update(
        state,
        Msg::ListingFetched {
            seq: first_seq,
            result: Ok(vec![record("alice", "1000_report.pdf", UploadStatus::Pending)]),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert!(view.is_settled());
    assert_eq!(view.table.rows[0].status, UploadStatus::Completed);
    assert!(view.table.rows[0].download.is_some());
    assert_eq!(view.sessions[0].server_status, Some(UploadStatus::Completed));
    assert!(state.take_notices().is_empty());
}

#[test]
fn late_failed_listing_still_reports_and_keeps_table() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = update(state, Msg::Started);
    let (state, _) = update(
        state,
        Msg::ListingFetched {
            seq: 2,
            result: Ok(vec![record("bob", "1_a.txt", UploadStatus::Completed)]),
        },
    );
    let (mut state, _) = update(
        state,
        Msg::ListingFetched {
            seq: 1,
            result: Err("timeout: listing took too long".to_string()),
        },
    );

    let view = state.view();
    assert!(view.is_settled());
    assert_eq!(view.table.rows.len(), 1);
    assert_eq!(state.take_notices()[0].kind, NoticeKind::Transport);
}
