use crate::{Query, Str};

/// `<let>` is polymorphic: a `value` attribute yields a [`QueryVariable`];
/// otherwise the element's inner XML is serialized verbatim into an
/// [`XMLVariable`]. Per the open question this specification resolves,
/// `XMLVariable` substitutes into the query context as a plain string, not
/// as an opaque XML fragment (see DESIGN.md).
#[derive(Debug, Clone, PartialEq)]
pub enum Variable {
    Query(QueryVariable),
    Xml(XMLVariable),
}

impl Variable {
    pub fn name(&self) -> &str {
        match self {
            Variable::Query(v) => &v.name,
            Variable::Xml(v) => &v.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryVariable {
    pub name: Str,
    pub query: Query,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XMLVariable {
    pub name: Str,
    pub xml: Str,
}
