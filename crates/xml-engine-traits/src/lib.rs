//! Core trait abstractions for XML processing engines.
//!
//! This crate defines the `XmlTree`/`XPathEngine` shape `xee-adapter`
//! implements over `xot`/`xee`, and the `Error` currency the rest of the
//! Schematron crates converge on (§4.8).

pub mod error;
pub mod tree;
pub mod xpath;

pub use error::Error;
pub use tree::{NodeType, XmlTree};
pub use xpath::XPathEngine;
