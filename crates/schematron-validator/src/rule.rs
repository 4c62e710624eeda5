use schematron_ast::{ConcreteRule, Diagnostics, Properties};
use schematron_query::{EvaluationContext, Query, QueryProcessor};
use xot::{Node, Xot};

use crate::check::{self, CheckValidator};
use crate::error::Result;
use crate::result::{FiredRuleResult, SuppressedRuleResult};
use crate::variable::{self, VariableEvaluator};

pub struct RuleValidator {
    context: Query,
    context_source: String,
    id: Option<String>,
    role: Option<String>,
    variables: Vec<VariableEvaluator>,
    checks: Vec<CheckValidator>,
    subject: Option<Query>,
}

impl RuleValidator {
    pub fn compile(
        rule: &ConcreteRule,
        processor: &QueryProcessor,
        diagnostics: Option<&Diagnostics>,
        properties: Option<&Properties>,
    ) -> Result<Self> {
        let context = processor.parse(rule.context.source())?;
        let variables = variable::compile_all(&rule.variables, processor)?;
        let checks = rule
            .checks
            .iter()
            .map(|c| CheckValidator::compile(c, processor, diagnostics, properties))
            .collect::<Result<Vec<_>>>()?;
        let subject = rule.subject.as_ref().map(|s| processor.parse(s.source())).transpose()?;

        Ok(Self {
            context,
            context_source: rule.context.source().to_string(),
            id: rule.id.as_deref().map(str::to_string),
            role: rule.role.as_deref().map(str::to_string),
            variables,
            checks,
            subject,
        })
    }

    /// "Parent-plus-membership" context matching (§4.4): evaluates the
    /// rule's context query with `node`'s parent as context item, then
    /// checks `node` is a member of the returned sequence. This correctly
    /// handles context expressions whose natural evaluation point is the
    /// parent, e.g. `@id`, `banana`, `section/title`.
    pub fn matches(&self, node: Node, parent_ctx: &EvaluationContext) -> Result<bool> {
        let result = self.context.evaluate(parent_ctx)?;
        Ok(result.nodes().contains(&node))
    }

    pub fn evaluate(&self, node_ctx: &EvaluationContext, xot: &Xot) -> Result<FiredRuleResult> {
        let ctx = variable::evaluate(&self.variables, node_ctx)?;
        let checks = self.checks.iter().map(|c| c.evaluate(&ctx, xot)).collect::<Result<Vec<_>>>()?;
        let subject_node = match &self.subject {
            Some(query) => check::resolve_subject(query, &ctx, xot)?,
            None => None,
        };
        Ok(FiredRuleResult {
            context: self.context_source.clone(),
            id: self.id.clone(),
            role: self.role.clone(),
            checks,
            subject_node,
        })
    }

    pub fn suppressed_result(&self) -> SuppressedRuleResult {
        SuppressedRuleResult {
            context: self.context_source.clone(),
            id: self.id.clone(),
            role: self.role.clone(),
        }
    }
}
