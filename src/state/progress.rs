/// Tracks items processed against an optional total. An unknown total means
/// indeterminate progress: `fraction` and `eta_seconds` both come back `None`.
#[derive(Debug, Clone)]
pub struct Progress {
    rows_processed: u64,
    rows_total: Option<u64>,
    start_time: u64,
}

impl Progress {
    pub fn new(rows_total: Option<u64>) -> Self {
        Self {
            rows_processed: 0,
            rows_total,
            start_time: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_secs(),
        }
    }

    pub fn record(&mut self, rows: u64) {
        self.rows_processed += rows;
    }

    pub fn rows_processed(&self) -> u64 {
        self.rows_processed
    }

    pub fn rows_total(&self) -> Option<u64> {
        self.rows_total
    }

    pub fn fraction(&self) -> Option<f32> {
        match self.rows_total {
            Some(total) if total > 0 => {
                Some((self.rows_processed as f32 / total as f32).min(1.0))
            }
            Some(_) => Some(0.0),
            None => None,
        }
    }

    pub fn eta_seconds(&self) -> Option<u64> {
        let total = self.rows_total?;
        if self.rows_processed == 0 {
            return None;
        }

        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let elapsed = now.saturating_sub(self.start_time);
        let rate = self.rows_processed as f64 / elapsed.max(1) as f64;
        let remaining = total.saturating_sub(self.rows_processed);
        Some((remaining as f64 / rate.max(0.001)) as u64)
    }
}
