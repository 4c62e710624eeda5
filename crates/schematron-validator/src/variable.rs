//! Variable scoping (§8 testable property 8): schema-, pattern- and
//! rule-scoped `<let>` bindings are pre-parsed once at compile time into
//! [`VariableEvaluator`]s, then evaluated in order against a context at
//! validation time, each overwriting any same-named binding inherited from
//! an outer scope — giving the innermost scope's definition precedence.

use std::collections::HashMap;

use schematron_ast::Variable;
use schematron_query::{EvaluationContext, Query, QueryProcessor};

use crate::error::Result;

pub enum VariableEvaluator {
    Query { name: String, query: Query },
    Literal { name: String, value: String },
}

impl VariableEvaluator {
    pub fn compile(variable: &Variable, processor: &QueryProcessor) -> Result<Self> {
        match variable {
            Variable::Query(qv) => Ok(Self::Query {
                name: qv.name.to_string(),
                query: processor.parse(qv.query.source())?,
            }),
            // Per the resolved Open Question (DESIGN.md), an XMLVariable's
            // serialized inner XML substitutes as a plain string.
            Variable::Xml(xv) => Ok(Self::Literal {
                name: xv.name.to_string(),
                value: xv.xml.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Query { name, .. } | Self::Literal { name, .. } => name,
        }
    }
}

pub fn compile_all(variables: &[Variable], processor: &QueryProcessor) -> Result<Vec<VariableEvaluator>> {
    variables.iter().map(|v| VariableEvaluator::compile(v, processor)).collect()
}

pub fn evaluate(evaluators: &[VariableEvaluator], ctx: &EvaluationContext) -> Result<EvaluationContext> {
    let mut ctx = ctx.clone();
    for evaluator in evaluators {
        let value = match evaluator {
            VariableEvaluator::Query { query, .. } => query.evaluate(&ctx)?.to_text()?,
            VariableEvaluator::Literal { value, .. } => value.clone(),
        };
        let mut binding = HashMap::with_capacity(1);
        binding.insert(evaluator.name().to_string(), value);
        ctx = ctx.with_variables(&binding, true);
    }
    Ok(ctx)
}
