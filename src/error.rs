pub type LumicResult<T> = Result<T, LumicError>;

#[derive(thiserror::Error, Debug)]
pub enum LumicError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid shape: {0}")]
    InvalidShape(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LumicError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_shape(msg: impl Into<String>) -> Self {
        Self::InvalidShape(msg.into())
    }
}
