use std::path::PathBuf;

use clap::Parser;

use super::logging::LogDestination;

/// Upload files to the ingestion service in 1 MB chunks and show its listing.
#[derive(Debug, Parser)]
#[command(name = "uploader", version)]
pub struct Cli {
    /// Identifier attached to every chunk of every file.
    pub user_id: String,

    /// Files to upload. With none, only the current listing is shown.
    pub files: Vec<PathBuf>,

    /// Root URL of the ingestion service.
    #[arg(long, default_value = "http://localhost:8080")]
    pub server: String,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    /// Log per-chunk detail and listing records that match no local upload.
    #[arg(short, long)]
    pub verbose: bool,
}
