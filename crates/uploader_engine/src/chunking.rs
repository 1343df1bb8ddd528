/// Half-open byte range `[start, end)` of one upload request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRange {
    pub index: u32,
    pub start: u64,
    pub end: u64,
}

impl ChunkRange {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// `Content-Range` value with an inclusive end, e.g. `bytes 0-999999/2500000`.
    pub fn content_range(&self, total: u64) -> String {
        format!("bytes {}-{}/{}", self.start, self.end.saturating_sub(1), total)
    }
}

/// Consecutive ranges covering `[0, total)`, none longer than `chunk_size`.
pub fn chunk_ranges(total: u64, chunk_size: u64) -> Vec<ChunkRange> {
    let chunk_size = chunk_size.max(1);
    let mut ranges = Vec::with_capacity(total.div_ceil(chunk_size) as usize);
    let mut start = 0;
    let mut index = 0;
    while start < total {
        let end = total.min(start + chunk_size);
        ranges.push(ChunkRange { index, start, end });
        start = end;
        index += 1;
    }
    ranges
}
