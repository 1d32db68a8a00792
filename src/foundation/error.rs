pub type LedResult<T> = Result<T, LedError>;

#[derive(thiserror::Error, Debug)]
pub enum LedError {
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    #[error("out of bounds: {0}")]
    OutOfBounds(String),

    #[error("non-uniform animation: {0}")]
    NonUniformAnimation(String),

    #[error("empty animation: {0}")]
    EmptyAnimation(String),

    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LedError {
    pub fn invalid_dimension(msg: impl Into<String>) -> Self {
        Self::InvalidDimension(msg.into())
    }

    pub fn out_of_bounds(msg: impl Into<String>) -> Self {
        Self::OutOfBounds(msg.into())
    }

    pub fn non_uniform(msg: impl Into<String>) -> Self {
        Self::NonUniformAnimation(msg.into())
    }

    pub fn empty_animation(msg: impl Into<String>) -> Self {
        Self::EmptyAnimation(msg.into())
    }

    pub fn source_unavailable(msg: impl Into<String>) -> Self {
        Self::SourceUnavailable(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
