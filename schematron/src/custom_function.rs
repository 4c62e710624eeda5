//! Custom-function registration and the binding-name aliasing factory that
//! backs [`crate::Factory::add_custom_functions`].

use std::collections::HashMap;

use schematron_query::{
    CustomFunction, DefaultQueryProcessorFactory, QueryProcessor, QueryProcessorFactory, Result,
};

/// A single `(namespace, local-name)` custom function to attach to a query
/// binding. Re-exported so callers don't need a direct `schematron-query`
/// dependency just to register one.
pub use schematron_query::CustomFunction as Function;

/// Serves the seven standard bindings unchanged, except where the caller
/// registered a `query_binding` name via `add_custom_functions` — in which
/// case the served processor is built from that entry's `base_query_binding`
/// (defaulting to the registered name itself) with the registered custom
/// functions layered on top.
///
/// This generalizes `schematron_query::ExtendableQueryProcessorFactory`,
/// which can only extend one of the seven names it already recognizes, to
/// the public API's `add_custom_functions(query_binding, fns,
/// base_query_binding?)` contract: a schema may declare a `queryBinding`
/// that is not one of the seven ISO names at all, as long as the caller
/// registered it with a base to compile against.
#[derive(Default)]
pub(crate) struct AliasingQueryProcessorFactory {
    entries: HashMap<String, (String, Vec<CustomFunction>)>,
}

impl AliasingQueryProcessorFactory {
    pub fn register(&mut self, query_binding: String, base_query_binding: Option<String>, functions: Vec<CustomFunction>) {
        let base = base_query_binding.unwrap_or_else(|| query_binding.clone());
        self.entries.entry(query_binding).or_insert((base, Vec::new())).1.extend(functions);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl QueryProcessorFactory for AliasingQueryProcessorFactory {
    fn processor_for(&self, binding_name: &str) -> Result<QueryProcessor> {
        match self.entries.get(binding_name) {
            Some((base, functions)) => {
                let mut processor = DefaultQueryProcessorFactory.processor_for(base)?;
                for function in functions {
                    processor = processor.with_custom_function(function.clone())?;
                }
                Ok(processor)
            }
            None => DefaultQueryProcessorFactory.processor_for(binding_name),
        }
    }
}
