use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use xee_interpreter::context::StaticContextBuilder;
use xee_xpath_compiler::parse;

use crate::binding::QueryBinding;
use crate::error::{QueryError, Result};
use crate::query::Query;

/// A named custom function a `QueryParser` may be extended with. Binding
/// and dispatch are resolved entirely at the wrapper layer (see the note
/// on `QueryBinding::allows_custom_functions`); the engine itself only
/// needs the name to avoid rejecting `$prefix:name(...)` call sites during
/// static analysis.
#[derive(Debug, Clone)]
pub struct CustomFunction {
    pub namespace_uri: String,
    pub local_name: String,
}

/// Compiles query source text into a [`Query`], honoring the binding's
/// custom-function policy and a fixed set of namespace bindings. Produces a
/// new parser on every `with_*` call, per the immutable contract.
pub trait QueryParser {
    fn parse(&self, source: &str) -> Result<Query>;
    fn with_namespaces(&self, namespaces: &HashMap<String, String>) -> Box<dyn QueryParser>;
    fn with_custom_function(&self, function: CustomFunction) -> Result<Box<dyn QueryParser>>;
}

#[derive(Clone, Default)]
pub struct XeeQueryParser {
    binding: QueryBinding,
    namespaces: HashMap<String, String>,
    custom_functions: Vec<CustomFunction>,
}

impl XeeQueryParser {
    pub fn new(binding: QueryBinding) -> Self {
        Self {
            binding,
            namespaces: HashMap::new(),
            custom_functions: Vec::new(),
        }
    }

    pub fn binding(&self) -> QueryBinding {
        self.binding
    }
}

impl QueryParser for XeeQueryParser {
    fn parse(&self, source: &str) -> Result<Query> {
        let mut builder = StaticContextBuilder::default();
        for (prefix, uri) in &self.namespaces {
            builder.add_namespace(prefix.clone(), uri.clone());
        }
        let static_context = builder.build();
        let program = parse(static_context, source).map_err(|e| QueryError::Compile {
            source: source.to_string(),
            reason: format!("{e:?}"),
        })?;
        Ok(Query::new(Rc::from(source), program))
    }

    fn with_namespaces(&self, namespaces: &HashMap<String, String>) -> Box<dyn QueryParser> {
        let mut merged = self.namespaces.clone();
        merged.extend(namespaces.iter().map(|(k, v)| (k.clone(), v.clone())));
        Box::new(Self {
            binding: self.binding,
            namespaces: merged,
            custom_functions: self.custom_functions.clone(),
        })
    }

    fn with_custom_function(&self, function: CustomFunction) -> Result<Box<dyn QueryParser>> {
        if !self.binding.allows_custom_functions() {
            return Err(QueryError::Xpath1CustomFunctionUnsupported(format!(
                "{{{}}}{}",
                function.namespace_uri, function.local_name
            )));
        }
        let mut custom_functions = self.custom_functions.clone();
        custom_functions.push(function);
        Ok(Box::new(Self {
            binding: self.binding,
            namespaces: self.namespaces.clone(),
            custom_functions,
        }))
    }
}

/// Wraps any [`QueryParser`] and memoizes `parse(source)` keyed by the
/// exact source string, so that identical rule contexts / test expressions
/// compile once per validated document set.
pub struct CachingQueryParser {
    inner: Box<dyn QueryParser>,
    cache: RefCell<HashMap<String, Query>>,
}

impl CachingQueryParser {
    pub fn new(inner: Box<dyn QueryParser>) -> Self {
        Self {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }
}

impl QueryParser for CachingQueryParser {
    fn parse(&self, source: &str) -> Result<Query> {
        if let Some(cached) = self.cache.borrow().get(source) {
            return Ok(cached.clone());
        }
        let query = self.inner.parse(source)?;
        self.cache.borrow_mut().insert(source.to_string(), query.clone());
        Ok(query)
    }

    fn with_namespaces(&self, namespaces: &HashMap<String, String>) -> Box<dyn QueryParser> {
        Box::new(CachingQueryParser::new(self.inner.with_namespaces(namespaces)))
    }

    fn with_custom_function(&self, function: CustomFunction) -> Result<Box<dyn QueryParser>> {
        Ok(Box::new(CachingQueryParser::new(
            self.inner.with_custom_function(function)?,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xpath1_parser_rejects_custom_function() {
        let parser = XeeQueryParser::new(QueryBinding::Xpath1);
        let result = parser.with_custom_function(CustomFunction {
            namespace_uri: "urn:example".to_string(),
            local_name: "f".to_string(),
        });
        assert!(result.is_err());
    }

    #[test]
    fn xpath31_parser_accepts_custom_function() {
        let parser = XeeQueryParser::new(QueryBinding::Xpath31);
        let result = parser.with_custom_function(CustomFunction {
            namespace_uri: "urn:example".to_string(),
            local_name: "f".to_string(),
        });
        assert!(result.is_ok());
    }
}
