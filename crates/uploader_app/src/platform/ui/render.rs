use uploader_core::{AppViewModel, SessionPhase, SessionRowView, TableView, COLUMN_HEADERS};

use super::constants::{COLUMN_GAP, PROGRESS_BAR_WIDTH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCommand {
    SetProgress { percent: u8, text: String },
    ShowSessions { lines: Vec<String> },
    ReplaceTable { lines: Vec<String> },
}

pub fn render(view: &AppViewModel) -> Vec<DisplayCommand> {
    vec![
        DisplayCommand::SetProgress {
            percent: view.progress_percent,
            text: progress_text(view),
        },
        DisplayCommand::ShowSessions {
            lines: view.sessions.iter().map(format_session_row).collect(),
        },
        DisplayCommand::ReplaceTable {
            lines: table_lines(&view.table),
        },
    ]
}

fn progress_text(view: &AppViewModel) -> String {
    let percent = usize::from(view.progress_percent.min(100));
    let filled = PROGRESS_BAR_WIDTH * percent / 100;
    format!(
        "[{}{}] {:>3}% | active uploads: {}",
        "#".repeat(filled),
        ".".repeat(PROGRESS_BAR_WIDTH - filled),
        percent,
        view.active_sessions()
    )
}

fn format_session_row(session: &SessionRowView) -> String {
    let phase = match session.phase {
        SessionPhase::Submitting => "Submitting",
        SessionPhase::Transmitting => "Transmitting",
        SessionPhase::Succeeded => "Sent",
        SessionPhase::Failed => "Failed",
    };
    let percent = session
        .percent
        .map(|p| format!("{p}%"))
        .unwrap_or_else(|| "-".to_string());
    let server = session
        .server_status
        .as_ref()
        .map(|status| status.label())
        .unwrap_or("not listed");
    format!(
        "[#{id}] {name} ({user}) {phase} {percent} | server: {server}",
        id = session.session_id,
        name = session.generated_name,
        user = session.user_id,
    )
}

fn table_lines(table: &TableView) -> Vec<String> {
    let mut grid: Vec<[String; 6]> = Vec::with_capacity(table.rows.len() + 1);
    grid.push(COLUMN_HEADERS.map(str::to_string));
    for row in &table.rows {
        let mut cells = row.cells();
        cells[5] = row
            .download
            .as_ref()
            .map(|link| format!("{} <{}>", link.label, link.href))
            .unwrap_or_default();
        grid.push(cells);
    }

    let mut widths = [0_usize; 6];
    for cells in &grid {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines: Vec<String> = grid.iter().map(|cells| pad_row(cells, &widths)).collect();
    if table.is_empty() {
        lines.push("(no uploads listed)".to_string());
    }
    lines
}

fn pad_row(cells: &[String; 6], widths: &[usize; 6]) -> String {
    let gap = " ".repeat(COLUMN_GAP);
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}", width = *width))
        .collect();
    padded.join(&gap).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use uploader_core::{render_table, AppViewModel, RecordLink, UploadRecord, UploadStatus};

    use super::{render, DisplayCommand};

    fn record(filename: &str, status: UploadStatus) -> UploadRecord {
        UploadRecord {
            id: None,
            user_id: "alice".to_string(),
            filename: filename.to_string(),
            status,
            uploaded_time_in_milliseconds: Some(1050),
            chunks: Some(3),
            links: Some(RecordLink {
                rel: None,
                href: format!("/files/{filename}"),
            }),
        }
    }

    fn table_of(commands: &[DisplayCommand]) -> Vec<String> {
        commands
            .iter()
            .find_map(|command| match command {
                DisplayCommand::ReplaceTable { lines } => Some(lines.clone()),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn completed_rows_show_link_others_blank() {
        let view = AppViewModel {
            table: render_table(&[
                record("1000_report.pdf", UploadStatus::Completed),
                record("1001_draft.pdf", UploadStatus::Pending),
            ]),
            ..AppViewModel::default()
        };

        let lines = table_of(&render(&view));
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("User"));
        assert!(lines[1].ends_with("Click </files/1000_report.pdf>"));
        assert!(lines[2].contains("Pending"));
        assert!(lines[2].ends_with('3'));
        assert!(!lines[2].contains("Click"));
    }

    #[test]
    fn render_is_repeatable() {
        let view = AppViewModel {
            progress_percent: 42,
            table: render_table(&[record("1000_report.pdf", UploadStatus::Completed)]),
            ..AppViewModel::default()
        };
        assert_eq!(render(&view), render(&view));
    }

    #[test]
    fn progress_bar_is_proportional() {
        let view = AppViewModel {
            progress_percent: 50,
            ..AppViewModel::default()
        };
        match &render(&view)[0] {
            DisplayCommand::SetProgress { percent, text } => {
                assert_eq!(*percent, 50);
                assert_eq!(text.matches('#').count(), 15);
                assert!(text.contains(" 50%"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn empty_listing_says_so() {
        let lines = table_of(&render(&AppViewModel::default()));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "(no uploads listed)");
    }
}
