//! Query binding layer: unifies the seven ISO Schematron `queryBinding`
//! names onto one real XPath 3.1 grammar and evaluator.
//!
//! [`QueryBinding`] only gates wrapper-level policy (custom function
//! support); [`QueryProcessor`] exposes a [`parser::QueryParser`] plus a
//! constructor for the matching [`EvaluationContext`], and [`Query`] is the
//! compiled, evaluable unit the validator runs per rule context / per check.

mod binding;
mod context;
mod error;
mod factory;
mod parser;
mod processor;
mod query;
mod result;
mod tree;

pub use binding::QueryBinding;
pub use context::EvaluationContext;
pub use error::{QueryError, Result};
pub use factory::{
    DefaultQueryProcessorFactory, ExtendableQueryProcessorFactory, QueryProcessorFactory, get_schema_query_processor,
};
pub use parser::{CachingQueryParser, CustomFunction, QueryParser, XeeQueryParser};
pub use processor::QueryProcessor;
pub use query::Query;
pub use result::QueryResult;
pub use tree::DocumentTree;
