use crate::record::{UploadRecord, UploadStatus};

pub const COLUMN_HEADERS: [&str; 6] = [
    "User",
    "Filename",
    "Status",
    "Uploaded (ms)",
    "Chunks",
    "Download",
];

pub const DOWNLOAD_LABEL: &str = "Click";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub user_id: String,
    pub filename: String,
    pub status: UploadStatus,
    pub uploaded_time: String,
    pub chunks: String,
    pub download: Option<DownloadLink>,
}

impl TableRow {
    /// Cell texts in column order; the download cell is blank unless actionable.
    pub fn cells(&self) -> [String; 6] {
        [
            self.user_id.clone(),
            self.filename.clone(),
            self.status.label().to_string(),
            self.uploaded_time.clone(),
            self.chunks.clone(),
            self.download
                .as_ref()
                .map(|link| link.href.clone())
                .unwrap_or_default(),
        ]
    }
}

/// Fully rendered listing. Applying it always replaces every previous row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableView {
    pub rows: Vec<TableRow>,
}

impl TableView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Renders records in server order, one row each.
pub fn render_table(records: &[UploadRecord]) -> TableView {
    TableView {
        rows: records.iter().map(render_row).collect(),
    }
}

fn render_row(record: &UploadRecord) -> TableRow {
    TableRow {
        user_id: record.user_id.clone(),
        filename: record.filename.clone(),
        status: record.status.clone(),
        uploaded_time: optional_cell(record.uploaded_time_in_milliseconds),
        chunks: optional_cell(record.chunks),
        download: record.download_link().map(|href| DownloadLink {
            label: DOWNLOAD_LABEL.to_string(),
            href: href.to_string(),
        }),
    }
}

fn optional_cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
