//! `path-or-tree` inputs for schema and document sources (§6.1).

use std::path::{Path, PathBuf};

use schematron_ast::Schema;
use schematron_query::DocumentTree;

/// A Schematron schema, given either as a file path to be parsed or as an
/// already-parsed AST (e.g. one the caller built or transformed by hand).
pub enum SchemaSource {
    Path(PathBuf),
    Parsed(Schema),
}

impl From<PathBuf> for SchemaSource {
    fn from(path: PathBuf) -> Self {
        SchemaSource::Path(path)
    }
}

impl From<&Path> for SchemaSource {
    fn from(path: &Path) -> Self {
        SchemaSource::Path(path.to_path_buf())
    }
}

impl From<Schema> for SchemaSource {
    fn from(schema: Schema) -> Self {
        SchemaSource::Parsed(schema)
    }
}

/// A target XML document, given either as a file path to be parsed or as an
/// already-built node tree (e.g. one shared across several validation
/// calls).
pub enum XmlSource {
    Path(PathBuf),
    Tree(DocumentTree),
}

impl From<PathBuf> for XmlSource {
    fn from(path: PathBuf) -> Self {
        XmlSource::Path(path)
    }
}

impl From<&Path> for XmlSource {
    fn from(path: &Path) -> Self {
        XmlSource::Path(path.to_path_buf())
    }
}

impl From<DocumentTree> for XmlSource {
    fn from(tree: DocumentTree) -> Self {
        XmlSource::Tree(tree)
    }
}

impl XmlSource {
    pub(crate) fn into_tree(self) -> crate::error::Result<DocumentTree> {
        match self {
            XmlSource::Tree(tree) => Ok(tree),
            XmlSource::Path(path) => {
                let xml = std::fs::read_to_string(&path)?;
                Ok(DocumentTree::parse(&xml)?)
            }
        }
    }

    /// The path this source was read from, if any — used to build the
    /// SVRL metadata's `file:` document URI and the CLI's per-document
    /// output filenames.
    pub(crate) fn path(&self) -> Option<&Path> {
        match self {
            XmlSource::Path(path) => Some(path.as_path()),
            XmlSource::Tree(_) => None,
        }
    }
}
