use schematron_ast::{Check, Diagnostics, Properties};
use schematron_query::{EvaluationContext, Query, QueryProcessor};
use xot::Xot;

use crate::error::Result;
use crate::node::{self, XmlNodeDescriptor};
use crate::richtext::{self, TextFragment};
use crate::result::{CheckResult, DiagnosticResult, PropertyResult};

struct DiagnosticEvaluator {
    id: String,
    content: Vec<TextFragment>,
}

struct PropertyEvaluator {
    id: String,
    role: Option<String>,
    content: Vec<TextFragment>,
}

/// Pre-compiled `<assert>`/`<report>`: test query, rendered content, subject
/// XPath, and the diagnostics/properties it references, resolved once at
/// compile time against the schema's `<diagnostics>`/`<properties>` blocks.
pub struct CheckValidator {
    check: Check,
    test: Query,
    content: Vec<TextFragment>,
    subject: Option<Query>,
    diagnostics: Vec<DiagnosticEvaluator>,
    properties: Vec<PropertyEvaluator>,
}

impl CheckValidator {
    pub fn compile(
        check: &Check,
        processor: &QueryProcessor,
        diagnostics: Option<&Diagnostics>,
        properties: Option<&Properties>,
    ) -> Result<Self> {
        let body = check.body();
        let test = processor.parse(body.test.source())?;
        let content = richtext::compile(&body.content, processor)?;
        let subject = body.subject.as_ref().map(|s| processor.parse(s.source())).transpose()?;

        let diagnostic_evaluators = body
            .diagnostics
            .iter()
            .filter_map(|id| diagnostics.and_then(|d| d.diagnostics.iter().find(|diag| diag.id == *id)))
            .map(|diag| -> Result<DiagnosticEvaluator> {
                Ok(DiagnosticEvaluator {
                    id: diag.id.to_string(),
                    content: richtext::compile(&diag.content, processor)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let property_evaluators = body
            .properties
            .iter()
            .filter_map(|id| properties.and_then(|p| p.properties.iter().find(|prop| prop.id == *id)))
            .map(|prop| -> Result<PropertyEvaluator> {
                Ok(PropertyEvaluator {
                    id: prop.id.to_string(),
                    role: prop.role.as_deref().map(str::to_string),
                    content: richtext::compile(&prop.content, processor)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            check: check.clone(),
            test,
            content,
            subject,
            diagnostics: diagnostic_evaluators,
            properties: property_evaluators,
        })
    }

    pub fn evaluate(&self, ctx: &EvaluationContext, xot: &Xot) -> Result<CheckResult> {
        let test_result = self.test.evaluate(ctx)?.to_boolean()?;
        let text = richtext::render(&self.content, ctx)?;
        let subject_node = match &self.subject {
            Some(query) => resolve_subject(query, ctx, xot)?,
            None => None,
        };
        let diagnostics = self
            .diagnostics
            .iter()
            .map(|d| -> Result<DiagnosticResult> {
                Ok(DiagnosticResult {
                    id: d.id.clone(),
                    text: richtext::render(&d.content, ctx)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let properties = self
            .properties
            .iter()
            .map(|p| -> Result<PropertyResult> {
                Ok(PropertyResult {
                    id: p.id.clone(),
                    role: p.role.clone(),
                    text: richtext::render(&p.content, ctx)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CheckResult {
            check: self.check.clone(),
            test_result,
            text,
            subject_node,
            properties,
            diagnostics,
        })
    }
}

/// Subject resolution (§4.6), shared by rules and checks: evaluate, take
/// the first node of the result (if any), and describe it.
pub fn resolve_subject(query: &Query, ctx: &EvaluationContext, xot: &Xot) -> Result<Option<XmlNodeDescriptor>> {
    let result = query.evaluate(ctx)?;
    Ok(result.nodes().first().and_then(|n| node::describe_node(xot, *n)))
}
