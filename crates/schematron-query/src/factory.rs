use std::collections::HashMap;

use schematron_ast::Schema;

use crate::binding::QueryBinding;
use crate::error::Result;
use crate::parser::CustomFunction;
use crate::processor::QueryProcessor;

/// Serves a [`QueryProcessor`] for a named query binding. Implementations
/// decide how (or whether) a binding name maps to custom-function support;
/// the engine underneath is always the same XPath 3.1 evaluator.
pub trait QueryProcessorFactory {
    fn processor_for(&self, binding_name: &str) -> Result<QueryProcessor>;
}

/// Serves a processor for each of the seven ISO Schematron query binding
/// names, all backed by the single real engine (see [`QueryBinding`]).
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultQueryProcessorFactory;

impl QueryProcessorFactory for DefaultQueryProcessorFactory {
    fn processor_for(&self, binding_name: &str) -> Result<QueryProcessor> {
        Ok(QueryProcessor::new(QueryBinding::parse(binding_name)?))
    }
}

/// Wraps a base factory and layers in caller-registered custom functions,
/// keyed by binding name, applied to every processor served for that name.
pub struct ExtendableQueryProcessorFactory<F> {
    base: F,
    custom_functions: HashMap<String, Vec<CustomFunction>>,
}

impl<F: QueryProcessorFactory> ExtendableQueryProcessorFactory<F> {
    pub fn new(base: F) -> Self {
        Self {
            base,
            custom_functions: HashMap::new(),
        }
    }

    pub fn with_custom_function(mut self, binding_name: &str, function: CustomFunction) -> Self {
        self.custom_functions
            .entry(binding_name.to_string())
            .or_default()
            .push(function);
        self
    }
}

impl<F: QueryProcessorFactory> QueryProcessorFactory for ExtendableQueryProcessorFactory<F> {
    fn processor_for(&self, binding_name: &str) -> Result<QueryProcessor> {
        let mut processor = self.base.processor_for(binding_name)?;
        if let Some(functions) = self.custom_functions.get(binding_name) {
            for function in functions {
                processor = processor.with_custom_function(function.clone())?;
            }
        }
        Ok(processor)
    }
}

/// Picks the processor for `schema.query_binding_or_default()` and merges in
/// the schema's own namespace declarations, so rule/check queries can refer
/// to schema-declared prefixes without callers repeating them.
pub fn get_schema_query_processor(
    schema: &Schema,
    factory: &dyn QueryProcessorFactory,
) -> Result<QueryProcessor> {
    let processor = factory.processor_for(schema.query_binding_or_default())?;
    let namespaces: HashMap<String, String> = schema
        .namespaces
        .iter()
        .map(|ns| (ns.prefix.to_string(), ns.uri.to_string()))
        .collect();
    Ok(processor.with_namespaces(&namespaces))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_factory_serves_known_bindings() {
        let factory = DefaultQueryProcessorFactory;
        assert!(factory.processor_for("xslt").is_ok());
        assert!(factory.processor_for("xpath31").is_ok());
        assert!(factory.processor_for("xquery").is_err());
    }

    #[test]
    fn extendable_factory_rejects_custom_function_on_xpath1() {
        let factory = ExtendableQueryProcessorFactory::new(DefaultQueryProcessorFactory).with_custom_function(
            "xpath",
            CustomFunction {
                namespace_uri: "urn:example".to_string(),
                local_name: "f".to_string(),
            },
        );
        assert!(factory.processor_for("xpath").is_err());
    }
}
