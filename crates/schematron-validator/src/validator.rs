use std::rc::Rc;

use schematron_ast::{Pattern, Schema};
use schematron_query::{get_schema_query_processor, DocumentTree, QueryProcessor, QueryProcessorFactory};

use crate::error::Result;
use crate::node;
use crate::pattern::PatternValidator;
use crate::result::{FullNodeResult, XMLDocumentValidationResult};
use crate::variable::{self, VariableEvaluator};

/// Two-phase Schematron validator (§4.4): compiled once from a schema and
/// phase selector, then reused to validate any number of documents.
pub struct Validator {
    schema: Rc<Schema>,
    phase: Option<String>,
    processor: QueryProcessor,
    schema_variables: Vec<VariableEvaluator>,
    patterns: Vec<PatternValidator>,
}

impl Validator {
    /// Phase A (compile): reduces `schema` to concrete patterns/rules under
    /// `phase`, obtains a schema-specific query processor from `factory`,
    /// and pre-parses every variable, context, test and rich-text query.
    pub fn compile(schema: &Schema, phase: Option<&str>, factory: &dyn QueryProcessorFactory) -> Result<Self> {
        let reduced = schematron_transform::reduce(schema, phase)?;
        let processor = get_schema_query_processor(&reduced, factory)?;
        let schema_variables = variable::compile_all(&reduced.variables, &processor)?;

        let patterns = reduced
            .patterns
            .iter()
            .filter_map(Pattern::as_concrete)
            .map(|p| PatternValidator::compile(p, &processor, reduced.diagnostics.as_ref(), reduced.properties.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(pattern_count = patterns.len(), ?phase, "compiled validator");

        Ok(Self {
            schema: Rc::new(reduced),
            phase: phase.map(str::to_string),
            processor,
            schema_variables,
            patterns,
        })
    }

    /// Phase B (evaluate): walks every element/attribute/comment/PI node of
    /// `tree` in document order, running every pattern validator at each.
    pub fn validate_xml(&self, tree: &DocumentTree) -> Result<XMLDocumentValidationResult> {
        let _span = tracing::debug_span!("validate_xml", pattern_count = self.patterns.len()).entered();
        let xot = tree.xot();
        let root_ctx = self.processor.root_context(tree);
        let root_ctx = variable::evaluate(&self.schema_variables, &root_ctx)?;

        let all_nodes = self.processor.parse(".//node() | .//@*")?;
        let candidates = all_nodes.evaluate(&root_ctx)?.nodes();

        let mut node_results = Vec::new();
        for candidate in candidates {
            let Some(descriptor) = node::describe_node(&xot, candidate) else {
                continue;
            };
            let Some(parent) = xot.parent(candidate) else {
                continue;
            };

            let node_ctx = root_ctx.with_context_item(candidate);
            let parent_ctx = root_ctx.with_context_item(parent);

            let mut pattern_results = Vec::with_capacity(self.patterns.len());
            for pattern in &self.patterns {
                pattern_results.push(pattern.evaluate(candidate, &node_ctx, &parent_ctx, &xot)?);
            }
            node_results.push(FullNodeResult {
                node: descriptor,
                pattern_results,
            });
        }

        Ok(XMLDocumentValidationResult {
            schema: Rc::clone(&self.schema),
            document_path: None,
            schema_path: None,
            phase: self.phase.clone(),
            node_results,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}
