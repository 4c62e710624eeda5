use std::cell::{Ref, RefCell};
use std::rc::Rc;

use xee_xpath::Documents;
use xot::{Node, Xot};

use crate::error::{QueryError, Result};

/// Owns the single `xot`/`Documents` instance backing one validated
/// document. Shared (via `Rc<RefCell<_>>`) by every `EvaluationContext`
/// derived from it, matching the single-threaded, per-document resource
/// model.
#[derive(Clone)]
pub struct DocumentTree {
    documents: Rc<RefCell<Documents>>,
    root: Node,
}

impl DocumentTree {
    pub fn parse(xml: &str) -> Result<Self> {
        let mut documents = Documents::new();
        let root = documents
            .xot
            .parse(xml)
            .map_err(|e| QueryError::Other(format!("xml parse error: {e}")))?;
        Ok(Self {
            documents: Rc::new(RefCell::new(documents)),
            root,
        })
    }

    pub fn root(&self) -> Node {
        self.root
    }

    pub fn document_element(&self) -> Option<Node> {
        self.documents.borrow().xot.document_element(self.root)
    }

    pub(crate) fn documents(&self) -> &Rc<RefCell<Documents>> {
        &self.documents
    }

    /// Read access to the underlying `xot` tree, for callers (the
    /// validator's node iteration and path computation) that need direct
    /// tree navigation rather than an XPath round trip.
    pub fn xot(&self) -> Ref<'_, Xot> {
        Ref::map(self.documents.borrow(), |d| &d.xot)
    }

    pub fn serialize(&self, node: Node) -> Result<String> {
        self.documents
            .borrow()
            .xot
            .to_string(node)
            .map_err(|e| QueryError::Other(format!("serialize error: {e}")))
    }
}
