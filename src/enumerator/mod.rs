pub mod batches;
pub mod rows;
pub mod source;

pub use batches::BatchIter;
pub use rows::RowIter;
pub use source::CsvSource;

use crate::estimate::{RowCountEstimator, WcLineCounter};
use crate::utils::{CsvEnumeratorError, Result};

pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Wraps a [`CsvSource`] and exposes cursor-resumable row and batch views
/// over it. Resumption state lives entirely in the cursor the caller passes
/// back in.
pub struct CsvEnumerator {
    source: CsvSource,
    estimator: Box<dyn RowCountEstimator>,
}

impl CsvEnumerator {
    pub fn new(source: CsvSource) -> Result<Self> {
        Self::with_estimator(source, Box::new(WcLineCounter))
    }

    pub fn with_estimator(
        source: CsvSource,
        estimator: Box<dyn RowCountEstimator>,
    ) -> Result<Self> {
        if let Some(path) = source.path() {
            if !path.is_file() {
                return Err(CsvEnumeratorError::InvalidArgument(format!(
                    "source is not backed by a regular file: {}",
                    path.display()
                )));
            }
        }
        Ok(Self { source, estimator })
    }

    /// Rows in file order, starting after the row the cursor points at
    /// (`None` starts at index 0). Consumes the enumerator; the source is
    /// forward-only.
    pub fn rows(mut self, cursor: Option<u64>) -> Result<RowIter> {
        let total = self.estimator.total_rows(&self.source);
        let headers = self.source.read_headers()?;
        Ok(RowIter::new(
            self.source.into_records(),
            headers,
            cursor,
            total,
        ))
    }

    /// Fixed-size batches in file order, starting after the batch the cursor
    /// points at.
    pub fn batches(mut self, cursor: Option<u64>, batch_size: usize) -> Result<BatchIter> {
        if batch_size == 0 {
            return Err(CsvEnumeratorError::InvalidArgument(
                "batch_size must be positive".to_string(),
            ));
        }
        let total = self.estimator.total_rows(&self.source);
        let headers = self.source.read_headers()?;
        Ok(BatchIter::new(
            self.source.into_records(),
            headers,
            cursor,
            batch_size,
            total,
        ))
    }
}
