pub mod checkpoint;
pub mod progress;

pub use checkpoint::{Checkpoint, CursorStore, RunStatus};
pub use progress::Progress;
