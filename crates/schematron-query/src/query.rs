use std::rc::Rc;

use xee_interpreter::atomic::Atomic;
use xee_interpreter::context::{DynamicContext, StaticContextBuilder};
use xee_interpreter::interpreter::Program;
use xee_interpreter::sequence::Item;
use xee_xpath_compiler::parse;

use crate::context::EvaluationContext;
use crate::error::{QueryError, Result};
use crate::result::QueryResult;

/// A compiled query. Compiled once against the query parser's namespace
/// bindings; re-specialized at evaluation time when the context carries
/// in-scope variable bindings, since this engine's static context is where
/// variable names (and, in the shape this crate's grounding demonstrates,
/// their values) are declared — see DESIGN.md for the tradeoff this implies.
#[derive(Clone)]
pub struct Query {
    source: Rc<str>,
    program: Rc<Program>,
}

impl Query {
    pub(crate) fn new(source: Rc<str>, program: Program) -> Self {
        Self {
            source,
            program: Rc::new(program),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn evaluate(&self, ctx: &EvaluationContext) -> Result<QueryResult> {
        let program = if ctx.variable_map().is_empty() {
            Rc::clone(&self.program)
        } else {
            Rc::new(self.recompile_with_variables(ctx)?)
        };

        let sequence = {
            let mut documents = ctx.documents().borrow_mut();
            let mut dynamic_context = DynamicContext::new(documents.documents(), &mut documents.xot);
            if let Some(node) = ctx.context_node() {
                dynamic_context.set_context_item(Some(Item::Node(node)));
            }
            program.execute(&mut dynamic_context).map_err(|e| QueryError::Eval {
                source: self.source.to_string(),
                reason: format!("{e:?}"),
            })?
        };

        Ok(QueryResult::new(Rc::clone(ctx.documents()), sequence))
    }

    fn recompile_with_variables(&self, ctx: &EvaluationContext) -> Result<Program> {
        let mut builder = StaticContextBuilder::default();
        for (prefix, uri) in ctx.namespace_map() {
            builder.add_namespace(prefix.clone(), uri.clone());
        }
        for (name, value) in ctx.variable_map() {
            builder.add_variable(name.clone(), Atomic::String(value.clone()));
        }
        let static_context = builder.build();
        parse(static_context, &self.source).map_err(|e| QueryError::Compile {
            source: self.source.to_string(),
            reason: format!("{e:?}"),
        })
    }
}
