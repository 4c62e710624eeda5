//! Aggregate public error (§4.8, §7): every lower-layer error converts into
//! one `SchematronError` so callers only need to match a single taxonomy.

#[derive(Debug, thiserror::Error)]
pub enum SchematronError {
    #[error(transparent)]
    Parse(#[from] schematron_parser::ParseError),

    #[error(transparent)]
    Transform(#[from] schematron_transform::TransformError),

    #[error(transparent)]
    Query(#[from] schematron_query::QueryError),

    #[error(transparent)]
    Validator(#[from] schematron_validator::ValidatorError),

    #[error(transparent)]
    Svrl(#[from] schematron_svrl::SvrlError),

    #[error("no schema was configured; call set_schema before build()")]
    MissingSchema,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SchematronError>;
