use crate::{Query, RichTextItem, Seq, Str, XPathExpression};

/// `<assert>` and `<report>` share every field; only the polarity with which
/// their `test_result` is interpreted differs (see the check polarity table
/// in the validator).
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    Assert(CheckBody),
    Report(CheckBody),
}

impl Check {
    pub fn body(&self) -> &CheckBody {
        match self {
            Check::Assert(b) | Check::Report(b) => b,
        }
    }

    pub fn is_assert(&self) -> bool {
        matches!(self, Check::Assert(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckBody {
    pub test: Query,
    pub content: Seq<RichTextItem>,
    /// Id references into the schema's `<diagnostics>`.
    pub diagnostics: Seq<Str>,
    /// Id references into the schema's `<properties>`.
    pub properties: Seq<Str>,
    pub flag: Option<Str>,
    pub id: Option<Str>,
    pub role: Option<Str>,
    pub see: Option<Str>,
    pub subject: Option<XPathExpression>,
    pub fpi: Option<Str>,
    pub icon: Option<Str>,
    pub xml_lang: Option<Str>,
    pub xml_space: Option<Str>,
}
