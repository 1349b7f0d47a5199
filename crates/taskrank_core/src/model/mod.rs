mod scored;
mod task;

pub use scored::{Scalar, ScoredTask};
pub use task::{DEFAULT_ESTIMATED_HOURS, DEFAULT_IMPORTANCE, Task};
