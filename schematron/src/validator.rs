//! The public `Validator` (§6.1): a compiled, reusable handle produced by
//! [`crate::Factory::build`].

use schematron_ast::Schema;
use schematron_query::QueryProcessorFactory;

use crate::error::Result;
use crate::result::ValidationResult;
use crate::source::XmlSource;

pub struct Validator {
    inner: schematron_validator::Validator,
}

impl Validator {
    pub(crate) fn compile(schema: Schema, phase: Option<&str>, factory: &dyn QueryProcessorFactory) -> Result<Self> {
        let _span = tracing::info_span!("compile_validator", ?phase).entered();
        let inner = schematron_validator::Validator::compile(&schema, phase, factory)?;
        Ok(Self { inner })
    }

    pub fn validate(&self, xml: impl Into<XmlSource>) -> Result<ValidationResult> {
        let xml = xml.into();
        let document_uri = xml.path().map(|p| p.display().to_string());
        let _span = tracing::info_span!("validate_document", document = document_uri.as_deref()).entered();
        let tree = xml.into_tree()?;
        let result = self.inner.validate_xml(&tree)?;
        Ok(ValidationResult::new(result, document_uri))
    }

    pub fn schema(&self) -> &Schema {
        self.inner.schema()
    }
}
