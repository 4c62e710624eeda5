#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("unresolved {kind} reference: `{id}`")]
    UnresolvedReference { kind: &'static str, id: String },
}

pub type Result<T> = std::result::Result<T, TransformError>;
