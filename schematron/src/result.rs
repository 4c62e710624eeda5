//! The public `ValidationResult` (§6.1): wraps the full per-node result tree
//! and renders it to SVRL on demand.

use schematron_svrl::SchematronOutput;
use schematron_validator::XMLDocumentValidationResult;

pub struct ValidationResult {
    document: XMLDocumentValidationResult,
    document_uri: Option<String>,
}

impl ValidationResult {
    pub(crate) fn new(document: XMLDocumentValidationResult, document_uri: Option<String>) -> Self {
        Self { document, document_uri }
    }

    /// `true` iff no check across all fired rules failed or fired (§4.5).
    pub fn is_valid(&self) -> bool {
        self.document.is_valid()
    }

    /// The SVRL report as a typed tree.
    pub fn get_svrl(&self) -> SchematronOutput {
        schematron_svrl::build(&self.document, self.document_uri.as_deref())
    }

    /// The SVRL report serialized to XML text.
    pub fn get_svrl_xml(&self) -> String {
        schematron_svrl::to_xml(&self.document, self.document_uri.as_deref())
    }

    /// The full per-node/per-pattern/per-rule/per-check result tree this
    /// result was built from, for callers that need more than `is_valid`
    /// and the SVRL reduction.
    pub fn document_result(&self) -> &XMLDocumentValidationResult {
        &self.document
    }
}
