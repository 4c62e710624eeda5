//! The element-dispatch table.
//!
//! `schema`, `pattern`, `rule`, `assert`/`report`, and `let` are polymorphic
//! on element content and attributes (see each module's doc comment). The
//! table is a plain struct of function pointers rather than a `match` buried
//! inside the traversal, so a caller wanting specialized AST node types can
//! build a [`ParserTable`] with substitute functions without forking the
//! recursive-descent code in `schema.rs`/`pattern.rs`/`rule.rs`.

use xot::Node;

use schematron_ast::{Check, Pattern, Rule, Variable};

use crate::ctx::ParseCtx;
use crate::error::Result;

pub type PatternParserFn = fn(&ParseCtx, Node) -> Result<Pattern>;
pub type RuleParserFn = fn(&ParseCtx, Node) -> Result<Rule>;
pub type CheckParserFn = fn(&ParseCtx, Node) -> Result<Check>;
pub type VariableParserFn = fn(&ParseCtx, Node) -> Result<Variable>;

#[derive(Clone, Copy)]
pub struct ParserTable {
    pub pattern: PatternParserFn,
    pub rule: RuleParserFn,
    pub check: CheckParserFn,
    pub variable: VariableParserFn,
}

impl Default for ParserTable {
    fn default() -> Self {
        Self {
            pattern: crate::pattern::parse_pattern,
            rule: crate::rule::parse_rule,
            check: crate::check::parse_check,
            variable: crate::variable::parse_variable,
        }
    }
}
