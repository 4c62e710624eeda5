#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("unknown query binding: `{0}`")]
    UnknownBinding(String),

    #[error("XPath 1.0 does not support custom functions: `{0}`")]
    Xpath1CustomFunctionUnsupported(String),

    #[error("failed to compile query `{source}`: {reason}")]
    Compile { source: String, reason: String },

    #[error("failed to evaluate query `{source}`: {reason}")]
    Eval { source: String, reason: String },

    #[error("cannot convert query result to {0}")]
    TypeConversion(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, QueryError>;
