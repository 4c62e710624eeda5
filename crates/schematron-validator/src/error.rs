use schematron_query::QueryError;
use schematron_transform::TransformError;

#[derive(Debug, thiserror::Error)]
pub enum ValidatorError {
    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("unresolved reference: {kind} `{id}`")]
    UnresolvedReference { kind: &'static str, id: String },

    #[error("evaluation context consulted before its root document was set")]
    MissingRootNode,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ValidatorError>;
