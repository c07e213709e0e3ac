use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("Batch worker panicked")]
    WorkerPanicked,

    #[error(transparent)]
    Framefit(#[from] framefit::Error),
}
