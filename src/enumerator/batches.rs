use crate::utils::Result;
use csv::StringRecord;
use std::io::Read;

/// Lazy sequence of `(batch, index)` pairs, grouping consecutive rows into
/// fixed-size batches. `index` is the zero-based position of the batch; the
/// last batch may be shorter.
pub struct BatchIter {
    records: csv::StringRecordsIntoIter<Box<dyn Read + Send>>,
    headers: Option<StringRecord>,
    batch_size: usize,
    next_index: u64,
    skip_rows_remaining: u64,
    remaining: Option<u64>,
}

impl BatchIter {
    pub(crate) fn new(
        records: csv::StringRecordsIntoIter<Box<dyn Read + Send>>,
        headers: Option<StringRecord>,
        cursor: Option<u64>,
        batch_size: usize,
        total_rows: Option<u64>,
    ) -> Self {
        let start_batch = cursor.map(|c| c + 1).unwrap_or(0);
        let total_batches = total_rows.map(|t| t.div_ceil(batch_size as u64));
        Self {
            records,
            headers,
            batch_size,
            next_index: start_batch,
            skip_rows_remaining: start_batch * batch_size as u64,
            remaining: total_batches.map(|t| t.saturating_sub(start_batch)),
        }
    }

    pub fn headers(&self) -> Option<&StringRecord> {
        self.headers.as_ref()
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Best-effort count of batches left to yield, for progress reporting only.
    pub fn estimated_remaining(&self) -> Option<u64> {
        self.remaining
    }
}

impl Iterator for BatchIter {
    type Item = Result<(Vec<StringRecord>, u64)>;

    fn next(&mut self) -> Option<Self::Item> {
        // resumption skips whole batches: (cursor + 1) * batch_size rows
        while self.skip_rows_remaining > 0 {
            match self.records.next() {
                Some(Ok(_)) => self.skip_rows_remaining -= 1,
                Some(Err(e)) => return Some(Err(e.into())),
                None => return None,
            }
        }

        let mut batch = Vec::with_capacity(self.batch_size);
        while batch.len() < self.batch_size {
            match self.records.next() {
                Some(Ok(record)) => batch.push(record),
                Some(Err(e)) => return Some(Err(e.into())),
                None => break,
            }
        }

        if batch.is_empty() {
            return None;
        }

        let index = self.next_index;
        self.next_index += 1;
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
        }
        Some(Ok((batch, index)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.remaining.map(|r| r as usize))
    }
}
