pub mod enumerator;
pub mod estimate;
pub mod state;
pub mod utils;

pub use enumerator::{BatchIter, CsvEnumerator, CsvSource, RowIter, DEFAULT_BATCH_SIZE};
pub use estimate::{NoEstimate, RowCountEstimator, WcLineCounter};
pub use state::{Checkpoint, CursorStore, Progress, RunStatus};
pub use utils::{AppConfig, CsvEnumeratorError, Result};
