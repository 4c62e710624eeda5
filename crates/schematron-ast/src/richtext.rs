use crate::{Query, Seq, Str};

/// One element of a mixed-content sequence inside `<assert>`, `<report>`,
/// `<diagnostic>`, `<property>`, `<p>` or `<title>`. Unknown inline markup
/// (`<emph>`, `<b>`, ...) is folded into `Text` with namespace prefixes
/// stripped at parse time (see `schematron-parser`), not modeled separately.
#[derive(Debug, Clone, PartialEq)]
pub enum RichTextItem {
    Text(Str),
    ValueOf(ValueOf),
    Name(NameNode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueOf {
    pub select: Query,
}

/// `<name>`, optionally scoped by `path` (default: the current node).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameNode {
    pub path: Option<Query>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub content: Seq<RichTextItem>,
    pub id: Option<Str>,
    pub class: Option<Str>,
    pub icon: Option<Str>,
    pub xml_lang: Option<Str>,
    pub xml_space: Option<Str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Title {
    pub content: Seq<RichTextItem>,
}
