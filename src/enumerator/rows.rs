use crate::utils::Result;
use csv::StringRecord;
use std::io::Read;

/// Lazy sequence of `(row, index)` pairs in file order. The yielded index is
/// the row's zero-based position in the full file, i.e. the cursor to persist
/// once the row has been processed.
pub struct RowIter {
    records: csv::StringRecordsIntoIter<Box<dyn Read + Send>>,
    headers: Option<StringRecord>,
    next_index: u64,
    skip_remaining: u64,
    remaining: Option<u64>,
}

impl RowIter {
    pub(crate) fn new(
        records: csv::StringRecordsIntoIter<Box<dyn Read + Send>>,
        headers: Option<StringRecord>,
        cursor: Option<u64>,
        total_rows: Option<u64>,
    ) -> Self {
        let start = cursor.map(|c| c + 1).unwrap_or(0);
        Self {
            records,
            headers,
            next_index: 0,
            skip_remaining: start,
            remaining: total_rows.map(|t| t.saturating_sub(start)),
        }
    }

    pub fn headers(&self) -> Option<&StringRecord> {
        self.headers.as_ref()
    }

    /// Best-effort count of rows left to yield, for progress reporting only.
    pub fn estimated_remaining(&self) -> Option<u64> {
        self.remaining
    }
}

impl Iterator for RowIter {
    type Item = Result<(StringRecord, u64)>;

    fn next(&mut self) -> Option<Self::Item> {
        // skipped rows are read and discarded, never collected
        while self.skip_remaining > 0 {
            match self.records.next() {
                Some(Ok(_)) => {
                    self.next_index += 1;
                    self.skip_remaining -= 1;
                }
                Some(Err(e)) => return Some(Err(e.into())),
                None => return None,
            }
        }

        match self.records.next() {
            Some(Ok(record)) => {
                let index = self.next_index;
                self.next_index += 1;
                if let Some(remaining) = self.remaining.as_mut() {
                    *remaining = remaining.saturating_sub(1);
                }
                Some(Ok((record, index)))
            }
            Some(Err(e)) => Some(Err(e.into())),
            None => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.remaining.map(|r| r as usize))
    }
}
