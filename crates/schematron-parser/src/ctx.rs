use std::path::PathBuf;

use xot::Xot;

use crate::dispatch::ParserTable;

/// Everything an element parser needs: the owning tree, the base path for
/// resolving relative `<include href>`, and the (swappable) dispatch table
/// used for recursive descent into polymorphic children.
pub struct ParseCtx<'a> {
    pub xot: &'a Xot,
    pub base_path: Option<PathBuf>,
    pub table: &'a ParserTable,
}

impl<'a> ParseCtx<'a> {
    pub fn with_base(&self, base_path: Option<PathBuf>) -> ParseCtx<'a> {
        ParseCtx {
            xot: self.xot,
            base_path,
            table: self.table,
        }
    }

    /// Resolve `href` against this context's base path.
    pub fn resolve_href(&self, href: &str) -> PathBuf {
        match &self.base_path {
            Some(base) => base.join(href),
            None => PathBuf::from(href),
        }
    }
}
