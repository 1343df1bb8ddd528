use std::time::Duration;

pub const PROGRESS_BAR_WIDTH: usize = 30;
pub const COLUMN_GAP: usize = 2;
/// How long the loop waits for engine events before a render tick.
pub const TICK_INTERVAL: Duration = Duration::from_millis(75);
