//! SVRL AST (§3.4): a parallel, flat algebra rooted in [`SchematronOutput`],
//! produced by [`crate::builder::build`] from an
//! `schematron_validator::XMLDocumentValidationResult` and serialized by
//! [`crate::writer::write`].

pub struct SchematronOutput {
    pub title: Option<String>,
    pub schema_version: Option<String>,
    pub phase: Option<String>,
    pub texts: Vec<Text>,
    pub ns_prefixes: Vec<NsPrefixInAttributeValues>,
    pub metadata: MetaData,
    pub events: Vec<ValidationEvent>,
}

pub struct Text {
    pub content: String,
    pub id: Option<String>,
    pub class: Option<String>,
    pub icon: Option<String>,
    pub xml_lang: Option<String>,
}

pub struct NsPrefixInAttributeValues {
    pub prefix: String,
    pub uri: String,
}

/// A fixed metadata block (`dct`/`skos`/`rdf` + a tool namespace) embedded
/// as raw XML children, per §4.7.
pub struct MetaData {
    pub creator_agent: String,
    pub created: String,
    pub source_description: Option<String>,
}

pub enum ValidationEvent {
    ActivePattern(ActivePattern),
    FiredRule(FiredRule),
    SuppressedRule(SuppressedRule),
    FailedAssert(CheckEvent),
    SuccessfulReport(CheckEvent),
}

pub struct ActivePattern {
    pub id: Option<String>,
    pub documents: Option<String>,
}

pub struct FiredRule {
    pub context: String,
    pub id: Option<String>,
    pub role: Option<String>,
    pub document: Option<String>,
}

pub struct SuppressedRule {
    pub context: String,
    pub id: Option<String>,
    pub role: Option<String>,
}

/// Shared shape of `failed-assert` and `successful-report`.
pub struct CheckEvent {
    pub test: String,
    pub location: String,
    pub text: String,
    pub id: Option<String>,
    pub role: Option<String>,
    pub flag: Option<String>,
    pub subject_location: Option<String>,
    pub diagnostics: Vec<DiagnosticReference>,
    pub properties: Vec<PropertyReference>,
}

pub struct DiagnosticReference {
    pub diagnostic: String,
    pub text: String,
}

pub struct PropertyReference {
    pub property: String,
    pub text: String,
    pub role: Option<String>,
}
