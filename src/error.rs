pub type CuelineResult<T> = Result<T, CuelineError>;

#[derive(thiserror::Error, Debug)]
pub enum CuelineError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CuelineError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
