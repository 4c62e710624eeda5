use schematron_ast::{ConcretePattern, Diagnostics, Properties, Rule};
use schematron_query::{EvaluationContext, QueryProcessor};
use xot::{Node, Xot};

use crate::error::Result;
use crate::result::{PatternResult, RuleResult};
use crate::rule::RuleValidator;
use crate::variable::{self, VariableEvaluator};

pub struct PatternValidator {
    pattern_id: Option<String>,
    variables: Vec<VariableEvaluator>,
    rules: Vec<RuleValidator>,
}

impl PatternValidator {
    pub fn compile(
        pattern: &ConcretePattern,
        processor: &QueryProcessor,
        diagnostics: Option<&Diagnostics>,
        properties: Option<&Properties>,
    ) -> Result<Self> {
        let variables = variable::compile_all(&pattern.variables, processor)?;
        let rules = pattern
            .rules
            .iter()
            .filter_map(|r| match r {
                Rule::Concrete(concrete) => Some(concrete),
                _ => None,
            })
            .map(|r| RuleValidator::compile(r, processor, diagnostics, properties))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            pattern_id: pattern.id.as_deref().map(str::to_string),
            variables,
            rules,
        })
    }

    /// Runs every rule validator in schema order, tracking whether a rule
    /// has already fired on this node in this pattern (first match wins;
    /// every later match is recorded as suppressed, never skipped).
    pub fn evaluate(
        &self,
        node: Node,
        node_ctx: &EvaluationContext,
        parent_ctx: &EvaluationContext,
        xot: &Xot,
    ) -> Result<PatternResult> {
        let node_ctx = variable::evaluate(&self.variables, node_ctx)?;
        let parent_ctx = variable::evaluate(&self.variables, parent_ctx)?;

        let mut rule_results = Vec::with_capacity(self.rules.len());
        let mut fired = false;
        for rule in &self.rules {
            if !rule.matches(node, &parent_ctx)? {
                rule_results.push(RuleResult::Skipped);
                continue;
            }
            if fired {
                tracing::debug!(pattern = ?self.pattern_id, "rule context matched but shadowed by an earlier rule");
                rule_results.push(RuleResult::Suppressed(rule.suppressed_result()));
                continue;
            }
            fired = true;
            rule_results.push(RuleResult::Fired(rule.evaluate(&node_ctx, xot)?));
        }

        Ok(PatternResult {
            pattern_id: self.pattern_id.clone(),
            rule_results,
        })
    }
}
