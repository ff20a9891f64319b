/// Errors for the similarity evaluation pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SimrefError {
    #[error("storage error: {message}")]
    Storage { message: String },

    #[error("field catalog error: {message}")]
    Catalog { message: String },

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

pub type SimrefResult<T> = Result<T, SimrefError>;

impl SimrefError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage { message: message.into() }
    }

    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog { message: message.into() }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig { message: message.into() }
    }
}
