use thiserror::Error;

/// Diagnostics raised by controllers. None of these are fatal to the page:
/// callers log them and the affected visual degrades to nothing or to a
/// neutral frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FxError {
    #[error("missing element `{0}`")]
    MissingElement(String),
    #[error("unrecognized parameter `{0}`")]
    UnrecognizedParameter(String),
    #[error("invalid value for `{name}`: expected {expected}")]
    InvalidValue { name: String, expected: &'static str },
    #[error("unknown mode `{0}`")]
    UnknownMode(String),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("could not acquire drawing surface: {0}")]
    SurfaceAcquisitionFailure(String),
    #[error("surface already initialized under `{0}`")]
    AlreadyInitialized(String),
    #[error("controller already destroyed")]
    Destroyed,
}

pub type FxResult<T> = Result<T, FxError>;
