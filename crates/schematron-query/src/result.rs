use std::cell::RefCell;
use std::rc::Rc;

use xee_interpreter::atomic::Atomic;
use xee_interpreter::sequence::{Item, Sequence};
use xee_xpath::Documents;
use xot::Node;

use crate::error::{QueryError, Result};

/// The engine-native result of evaluating a [`crate::Query`]. Coercions
/// follow XPath's own string()/boolean()/number() rules, not ad hoc ones.
pub struct QueryResult {
    documents: Rc<RefCell<Documents>>,
    sequence: Sequence,
}

impl QueryResult {
    pub(crate) fn new(documents: Rc<RefCell<Documents>>, sequence: Sequence) -> Self {
        Self { documents, sequence }
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn count(&self) -> usize {
        self.sequence.len()
    }

    pub fn nodes(&self) -> Vec<Node> {
        self.sequence
            .iter()
            .filter_map(|item| match item {
                Item::Node(node) => Some(*node),
                _ => None,
            })
            .collect()
    }

    /// String value of each node in the result, in sequence order. Used by
    /// rich-text rendering, which concatenates the string values of a
    /// node-set `value-of` result rather than truncating to the first node.
    pub fn node_texts(&self) -> Vec<String> {
        let documents = self.documents.borrow();
        self.sequence
            .iter()
            .filter_map(|item| match item {
                Item::Node(node) => Some(documents.xot().text_content(*node)),
                _ => None,
            })
            .collect()
    }

    /// XPath effective boolean value: non-empty node sequences are `true`;
    /// for a singleton atomic the atomic's own truthiness applies.
    pub fn to_boolean(&self) -> Result<bool> {
        if self.sequence.is_empty() {
            return Ok(false);
        }
        match &self.sequence[0] {
            Item::Atomic(Atomic::Boolean(b)) => Ok(*b),
            Item::Atomic(Atomic::String(_, s)) => Ok(!s.is_empty()),
            Item::Atomic(Atomic::Untyped(s)) => Ok(!s.is_empty()),
            Item::Atomic(Atomic::Integer(_, i)) => Ok(**i != 0.into()),
            Item::Atomic(Atomic::Decimal(d)) => Ok(!d.is_zero()),
            Item::Atomic(Atomic::Double(d)) => Ok(d.0 != 0.0 && !d.is_nan()),
            Item::Node(_) => Ok(true),
            _ => Ok(true),
        }
    }

    /// String-value of the result: for a node sequence, the first node's
    /// string value (matching XPath's `string(node-set)` truncation to the
    /// first node); for atomics, their canonical lexical form.
    pub fn to_text(&self) -> Result<String> {
        if self.sequence.is_empty() {
            return Ok(String::new());
        }
        match &self.sequence[0] {
            Item::Atomic(atomic) => Ok(atomic_to_string(atomic)),
            Item::Node(node) => Ok(self.documents.borrow().xot().text_content(*node)),
            Item::Function(_) => Err(QueryError::TypeConversion("function".to_string())),
            _ => Err(QueryError::TypeConversion("map or array".to_string())),
        }
    }

    pub fn to_number(&self) -> Result<f64> {
        if self.sequence.is_empty() {
            return Ok(f64::NAN);
        }
        match &self.sequence[0] {
            Item::Atomic(Atomic::Integer(_, i)) => Ok(i.to_string().parse().unwrap_or(f64::NAN)),
            Item::Atomic(Atomic::Decimal(d)) => Ok(d.to_string().parse().unwrap_or(f64::NAN)),
            Item::Atomic(Atomic::Double(d)) => Ok(d.0),
            Item::Atomic(Atomic::String(_, s)) => Ok(s.trim().parse().unwrap_or(f64::NAN)),
            _ => Ok(f64::NAN),
        }
    }
}

pub(crate) fn atomic_to_string(atomic: &Atomic) -> String {
    match atomic {
        Atomic::String(_, s) => s.to_string(),
        Atomic::Untyped(s) => s.to_string(),
        Atomic::Boolean(b) => b.to_string(),
        Atomic::Integer(_, i) => i.to_string(),
        Atomic::Decimal(d) => d.to_string(),
        Atomic::Float(f) => f.into_inner().to_string(),
        Atomic::Double(d) => d.into_inner().to_string(),
        other => format!("{other:?}"),
    }
}
