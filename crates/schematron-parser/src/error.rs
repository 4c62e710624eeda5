//! Parser error taxonomy.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("malformed Schematron XML: {0}")]
    Xml(String),

    #[error("{element}: missing required attribute `{attribute}`")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("{element}: invalid polymorphic discriminant: {reason}")]
    InvalidDiscriminant {
        element: &'static str,
        reason: String,
    },

    #[error("expected root element `{expected}`, found `{found}`")]
    UnexpectedRoot { expected: &'static str, found: String },

    #[error("<include href=\"{href}\"> could not be merged: {reason}")]
    BadInclude { href: String, reason: String },

    #[error("failed to read include file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ParseError>;
