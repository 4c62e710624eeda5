//! The public `Factory` (§6.1): accumulates schema/base-path/phase/custom
//! function configuration, then compiles a [`crate::Validator`] once.

use std::path::PathBuf;

use schematron_ast::Schema;

use crate::custom_function::{AliasingQueryProcessorFactory, Function};
use crate::error::{Result, SchematronError};
use crate::source::SchemaSource;
use crate::validator::Validator;

/// Builds a [`Validator`] from a schema plus optional base path, phase
/// selector, and custom query functions.
#[derive(Default)]
pub struct Factory {
    schema: Option<SchemaSource>,
    base_path: Option<PathBuf>,
    phase: Option<String>,
    custom_functions: AliasingQueryProcessorFactory,
}

impl Factory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_schema(mut self, schema: impl Into<SchemaSource>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Directory `<include href>` paths resolve against. Only meaningful
    /// when the schema source is a path or an inline string; ignored for an
    /// already-parsed [`Schema`], whose includes are already resolved.
    pub fn set_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// `None` defers to the schema's `defaultPhase` (`#DEFAULT`); pass
    /// `Some("#ALL")` explicitly to keep every pattern regardless of phase.
    pub fn set_phase(mut self, phase: Option<impl Into<String>>) -> Self {
        self.phase = phase.map(Into::into);
        self
    }

    /// Registers `functions` under the `query_binding` name a schema's
    /// `queryBinding=` attribute may reference. `base_query_binding`, if
    /// given, is one of the seven ISO names the registered binding compiles
    /// against; it defaults to `query_binding` itself, which is how callers
    /// extend a standard binding (e.g. `"xpath2"`) with their own functions
    /// without renaming it.
    pub fn add_custom_functions(
        mut self,
        query_binding: impl Into<String>,
        functions: Vec<Function>,
        base_query_binding: Option<impl Into<String>>,
    ) -> Self {
        self.custom_functions.register(
            query_binding.into(),
            base_query_binding.map(Into::into),
            functions,
        );
        self
    }

    pub fn build(self) -> Result<Validator> {
        let schema = self.resolve_schema()?;
        if self.custom_functions.is_empty() {
            Validator::compile(schema, self.phase.as_deref(), &schematron_query::DefaultQueryProcessorFactory)
        } else {
            Validator::compile(schema, self.phase.as_deref(), &self.custom_functions)
        }
    }

    fn resolve_schema(&self) -> Result<Schema> {
        match &self.schema {
            None => Err(SchematronError::MissingSchema),
            Some(SchemaSource::Parsed(schema)) => Ok(schema.clone()),
            Some(SchemaSource::Path(path)) => {
                let base = self.base_path.clone().or_else(|| path.parent().map(PathBuf::from));
                let xml = std::fs::read_to_string(path)?;
                Ok(schematron_parser::parse_schema_str(&xml, base.as_deref())?)
            }
        }
    }
}
