//! Inlines `<extends>`-referenced checks and variables into each rule, then
//! drops every non-concrete rule (abstract rules and external rules exist
//! only to be extended — see §4.2.1 of the design).

use std::collections::HashMap;

use schematron_ast::visitor::{id_mapping, AstNode};
use schematron_ast::{
    AbstractPattern, Check, ConcretePattern, Extends, ExtendsById, ExtendsExternal, Pattern, Rule,
    Schema, Variable,
};

use crate::error::{Result, TransformError};

pub fn resolve_extends(schema: &Schema) -> Result<Schema> {
    let id_map = id_mapping(&AstNode::Schema(schema.clone()));
    let mut cache: HashMap<String, Rule> = HashMap::new();

    let patterns = schema
        .patterns
        .iter()
        .map(|p| resolve_pattern(p, &id_map, &mut cache))
        .collect::<Result<Vec<_>>>()?;

    Ok(Schema {
        patterns: patterns.into(),
        ..schema.clone()
    })
}

fn resolve_pattern(
    pattern: &Pattern,
    id_map: &HashMap<String, AstNode>,
    cache: &mut HashMap<String, Rule>,
) -> Result<Pattern> {
    match pattern {
        Pattern::Concrete(p) => Ok(Pattern::Concrete(ConcretePattern {
            rules: resolve_rules(&p.rules, id_map, cache)?.into(),
            ..p.clone()
        })),
        Pattern::Abstract(p) => Ok(Pattern::Abstract(AbstractPattern {
            rules: resolve_rules(&p.rules, id_map, cache)?.into(),
            ..p.clone()
        })),
        Pattern::Instance(p) => Ok(Pattern::Instance(p.clone())),
    }
}

fn resolve_rules(
    rules: &[Rule],
    id_map: &HashMap<String, AstNode>,
    cache: &mut HashMap<String, Rule>,
) -> Result<Vec<Rule>> {
    let mut out = Vec::with_capacity(rules.len());
    for rule in rules {
        let resolved = resolve_rule(rule, id_map, cache)?;
        if matches!(resolved, Rule::Concrete(_)) {
            out.push(resolved);
        }
    }
    Ok(out)
}

/// A cache key for rules that may be extended by more than one extending
/// rule (an abstract rule id, or an external rule's source path).
fn rule_key(rule: &Rule) -> Option<String> {
    match rule {
        Rule::Abstract(r) => Some(format!("id:{}", r.id)),
        Rule::External(r) => r.source_path.as_ref().map(|p| format!("ext:{p}")),
        Rule::Concrete(_) => None,
    }
}

fn resolve_rule(
    rule: &Rule,
    id_map: &HashMap<String, AstNode>,
    cache: &mut HashMap<String, Rule>,
) -> Result<Rule> {
    let key = rule_key(rule);
    if let Some(key) = &key {
        if let Some(cached) = cache.get(key) {
            return Ok(cached.clone());
        }
    }

    let extends = rule.extends();
    if extends.is_empty() {
        let resolved = clear_extends(rule);
        if let Some(key) = key {
            cache.insert(key, resolved.clone());
        }
        return Ok(resolved);
    }

    let mut prepend_checks: Vec<Check> = Vec::new();
    let mut prepend_vars: Vec<Variable> = Vec::new();
    for ext in extends {
        let target = match ext {
            Extends::ById(ExtendsById { rule_id }) => {
                let node = id_map.get(rule_id.as_ref()).ok_or_else(|| {
                    TransformError::UnresolvedReference {
                        kind: "extends rule",
                        id: rule_id.to_string(),
                    }
                })?;
                match node {
                    AstNode::Rule(r) => r.clone(),
                    _ => {
                        return Err(TransformError::UnresolvedReference {
                            kind: "extends rule",
                            id: rule_id.to_string(),
                        })
                    }
                }
            }
            Extends::External(ExtendsExternal { rule, .. }) => Rule::External((**rule).clone()),
        };
        let resolved_target = resolve_rule(&target, id_map, cache)?;
        prepend_checks.extend(resolved_target.checks().iter().cloned());
        prepend_vars.extend(resolved_target.variables().iter().cloned());
    }

    let new_rule = with_inlined(rule, prepend_checks, prepend_vars);
    if let Some(key) = key {
        cache.insert(key, new_rule.clone());
    }
    Ok(new_rule)
}

fn clear_extends(rule: &Rule) -> Rule {
    match rule {
        Rule::Concrete(r) => Rule::Concrete(schematron_ast::ConcreteRule {
            extends: schematron_ast::Seq::from(vec![]),
            ..r.clone()
        }),
        Rule::Abstract(r) => Rule::Abstract(schematron_ast::AbstractRule {
            extends: schematron_ast::Seq::from(vec![]),
            ..r.clone()
        }),
        Rule::External(r) => Rule::External(schematron_ast::ExternalRule {
            extends: schematron_ast::Seq::from(vec![]),
            ..r.clone()
        }),
    }
}

/// Extended content precedes the rule's own content, so the rule's own
/// checks/variables can shadow extended ones by ordinary XPath last-wins
/// variable semantics.
fn with_inlined(rule: &Rule, mut checks: Vec<Check>, mut variables: Vec<Variable>) -> Rule {
    match rule {
        Rule::Concrete(r) => {
            checks.extend(r.checks.iter().cloned());
            variables.extend(r.variables.iter().cloned());
            Rule::Concrete(schematron_ast::ConcreteRule {
                checks: checks.into(),
                variables: variables.into(),
                extends: schematron_ast::Seq::from(vec![]),
                ..r.clone()
            })
        }
        Rule::Abstract(r) => {
            checks.extend(r.checks.iter().cloned());
            variables.extend(r.variables.iter().cloned());
            Rule::Abstract(schematron_ast::AbstractRule {
                checks: checks.into(),
                variables: variables.into(),
                extends: schematron_ast::Seq::from(vec![]),
                ..r.clone()
            })
        }
        Rule::External(r) => {
            checks.extend(r.checks.iter().cloned());
            variables.extend(r.variables.iter().cloned());
            Rule::External(schematron_ast::ExternalRule {
                checks: checks.into(),
                variables: variables.into(),
                extends: schematron_ast::Seq::from(vec![]),
                ..r.clone()
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schematron_ast::*;

    fn empty_schema(patterns: Vec<Pattern>) -> Schema {
        Schema {
            title: None,
            namespaces: Seq::from(vec![]),
            phases: Seq::from(vec![]),
            patterns: patterns.into(),
            diagnostics: None,
            properties: None,
            variables: Seq::from(vec![]),
            paragraphs: Seq::from(vec![]),
            default_phase: None,
            query_binding: None,
            schema_version: None,
            id: None,
            fpi: None,
            icon: None,
            see: None,
            xml_lang: None,
            xml_space: None,
        }
    }

    fn bare_rule_fields() -> (Seq<Check>, Seq<Variable>, Seq<Paragraph>, Seq<Extends>) {
        (Seq::from(vec![]), Seq::from(vec![]), Seq::from(vec![]), Seq::from(vec![]))
    }

    #[test]
    fn extends_idempotent() {
        let (checks, variables, paragraphs, _) = bare_rule_fields();
        let abstract_rule = Rule::Abstract(AbstractRule {
            id: "base".into(),
            checks: Seq::from(vec![Check::Assert(CheckBody {
                test: Query::new("true()"),
                content: Seq::from(vec![]),
                diagnostics: Seq::from(vec![]),
                properties: Seq::from(vec![]),
                flag: None,
                id: None,
                role: None,
                see: None,
                subject: None,
                fpi: None,
                icon: None,
                xml_lang: None,
                xml_space: None,
            })]),
            variables,
            paragraphs: paragraphs.clone(),
            extends: Seq::from(vec![]),
            flag: None,
            fpi: None,
            icon: None,
            role: None,
            see: None,
            subject: None,
            xml_lang: None,
            xml_space: None,
        });
        let concrete_rule = Rule::Concrete(ConcreteRule {
            context: Query::new("item"),
            id: None,
            checks,
            variables: Seq::from(vec![]),
            paragraphs,
            extends: Seq::from(vec![Extends::ById(ExtendsById {
                rule_id: "base".into(),
            })]),
            flag: None,
            fpi: None,
            icon: None,
            role: None,
            see: None,
            subject: None,
            xml_lang: None,
            xml_space: None,
        });
        let pattern = Pattern::Concrete(ConcretePattern {
            id: Some("p1".into()),
            title: None,
            rules: Seq::from(vec![abstract_rule, concrete_rule]),
            variables: Seq::from(vec![]),
            paragraphs: Seq::from(vec![]),
            documents: None,
            fpi: None,
            icon: None,
            see: None,
            xml_lang: None,
            xml_space: None,
        });
        let schema = empty_schema(vec![pattern]);

        let once = resolve_extends(&schema).unwrap();
        let twice = resolve_extends(&once).unwrap();
        assert_eq!(once, twice);

        let pattern = once.patterns[0].as_concrete().unwrap();
        assert_eq!(pattern.rules.len(), 1);
        let rule = pattern.rules[0].clone();
        assert_eq!(rule.checks().len(), 1);
        assert!(rule.extends().is_empty());
    }
}
