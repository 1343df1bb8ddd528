/// Whole-number percentage of `loaded` over `total`, or `None` while the total is unknown.
pub fn progress_percent(loaded: u64, total: u64) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let loaded = u128::from(loaded.min(total));
    let percent = loaded * 100 / u128::from(total);
    Some(percent as u8)
}

/// Last known aggregate upload progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressIndicator {
    percent: u8,
}

impl ProgressIndicator {
    pub fn update(&mut self, loaded: u64, total: u64) {
        if let Some(percent) = progress_percent(loaded, total) {
            self.percent = percent;
        }
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }
}
