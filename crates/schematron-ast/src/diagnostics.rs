use crate::{RichTextItem, Seq, Str};

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostics {
    pub diagnostics: Seq<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub id: Str,
    pub content: Seq<RichTextItem>,
    pub fpi: Option<Str>,
    pub icon: Option<Str>,
    pub see: Option<Str>,
    pub xml_lang: Option<Str>,
    pub xml_space: Option<Str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Properties {
    pub properties: Seq<Property>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub id: Str,
    pub content: Seq<RichTextItem>,
    pub role: Option<Str>,
    pub scheme: Option<Str>,
    pub fpi: Option<Str>,
    pub icon: Option<Str>,
    pub see: Option<Str>,
    pub xml_lang: Option<Str>,
    pub xml_space: Option<Str>,
}
