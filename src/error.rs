use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerError {
    /// Extraction was attempted on an empty task queue. The work loop gates
    /// on emptiness itself, so only direct queue users can hit this.
    #[error("task queue is empty")]
    EmptyQueue,
}
