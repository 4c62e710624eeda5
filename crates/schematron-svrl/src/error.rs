#[derive(Debug, thiserror::Error)]
pub enum SvrlError {
    #[error("failed to serialize SVRL document: {0}")]
    Serialize(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SvrlError>;
