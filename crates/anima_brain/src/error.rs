use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrainError {
    /// The worker has shut down; nothing more will be processed.
    #[error("brain is shut down")]
    Closed,
}
