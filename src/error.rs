pub type PreviewResult<T> = Result<T, PreviewError>;

#[derive(thiserror::Error, Debug)]
pub enum PreviewError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("text error: {0}")]
    Text(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PreviewError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn text(msg: impl Into<String>) -> Self {
        Self::Text(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}
