//! Instantiates `<pattern is-a="...">` against its `<pattern abstract="true">`
//! target via single-pass, simultaneous `$name` macro substitution over
//! every string field of the abstract pattern (see §4.2.2).

use std::collections::HashMap;

use regex::{Captures, Regex};
use schematron_ast::{
    AbstractPattern, CheckBody, ConcretePattern, InstancePattern, NameNode, Paragraph,
    PatternParameter, Pattern, Query, RichTextItem, Rule, Schema, Seq, Str, Title, ValueOf,
    Variable, XMLVariable, QueryVariable, XPathExpression,
};
use schematron_ast::Check;

use crate::error::{Result, TransformError};

pub fn resolve_abstract_patterns(schema: &Schema) -> Result<Schema> {
    let abstracts: HashMap<String, AbstractPattern> = schema
        .patterns
        .iter()
        .filter_map(|p| match p {
            Pattern::Abstract(a) => Some((a.id.to_string(), a.clone())),
            _ => None,
        })
        .collect();

    let mut patterns = Vec::with_capacity(schema.patterns.len());
    for pattern in schema.patterns.iter() {
        match pattern {
            Pattern::Abstract(_) => {}
            Pattern::Concrete(_) => patterns.push(pattern.clone()),
            Pattern::Instance(inst) => {
                let abstract_pattern = abstracts.get(inst.abstract_id_ref.as_ref()).ok_or_else(|| {
                    TransformError::UnresolvedReference {
                        kind: "pattern is-a",
                        id: inst.abstract_id_ref.to_string(),
                    }
                })?;
                patterns.push(Pattern::Concrete(instantiate(abstract_pattern, inst)));
            }
        }
    }

    Ok(Schema {
        patterns: patterns.into(),
        ..schema.clone()
    })
}

fn instantiate(ap: &AbstractPattern, inst: &InstancePattern) -> ConcretePattern {
    if inst.parameters.is_empty() {
        return ConcretePattern {
            id: inst.id.clone(),
            title: ap.title.clone(),
            rules: ap.rules.clone(),
            variables: ap.variables.clone(),
            paragraphs: ap.paragraphs.clone(),
            documents: ap.documents.clone(),
            fpi: ap.fpi.clone(),
            icon: ap.icon.clone(),
            see: ap.see.clone(),
            xml_lang: ap.xml_lang.clone(),
            xml_space: ap.xml_space.clone(),
        };
    }

    let re = macro_regex(&inst.parameters);
    let map: HashMap<String, String> = inst
        .parameters
        .iter()
        .map(|p| (p.name.to_string(), p.value.to_string()))
        .collect();

    ConcretePattern {
        id: inst.id.clone(),
        title: ap.title.as_ref().map(|t| expand_title(t, &re, &map)),
        rules: ap
            .rules
            .iter()
            .map(|r| expand_rule(r, &re, &map))
            .collect::<Vec<_>>()
            .into(),
        variables: ap
            .variables
            .iter()
            .map(|v| expand_variable(v, &re, &map))
            .collect::<Vec<_>>()
            .into(),
        paragraphs: ap
            .paragraphs
            .iter()
            .map(|p| expand_paragraph(p, &re, &map))
            .collect::<Vec<_>>()
            .into(),
        documents: ap.documents.as_ref().map(|q| expand_query(q, &re, &map)),
        fpi: expand_opt(&ap.fpi, &re, &map),
        icon: expand_opt(&ap.icon, &re, &map),
        see: expand_opt(&ap.see, &re, &map),
        xml_lang: expand_opt(&ap.xml_lang, &re, &map),
        xml_space: expand_opt(&ap.xml_space, &re, &map),
    }
}

/// `(macro1|macro2|...)\b`, matched against `$name` occurrences — see the
/// word-boundary example in DESIGN.md (`$a$ab` expands to `X$ab`, not `XX`).
fn macro_regex(params: &[PatternParameter]) -> Regex {
    let alts: Vec<String> = params.iter().map(|p| regex::escape(&p.name)).collect();
    Regex::new(&format!(r"\$({})\b", alts.join("|"))).unwrap()
}

fn expand(s: &str, re: &Regex, map: &HashMap<String, String>) -> String {
    re.replace_all(s, |caps: &Captures| {
        map.get(&caps[1]).cloned().unwrap_or_else(|| caps[0].to_string())
    })
    .into_owned()
}

fn expand_str(s: &Str, re: &Regex, map: &HashMap<String, String>) -> Str {
    expand(s, re, map).into()
}

fn expand_opt(s: &Option<Str>, re: &Regex, map: &HashMap<String, String>) -> Option<Str> {
    s.as_ref().map(|v| expand_str(v, re, map))
}

fn expand_query(q: &Query, re: &Regex, map: &HashMap<String, String>) -> Query {
    Query::new(expand(q.source(), re, map))
}

fn expand_xpath(x: &XPathExpression, re: &Regex, map: &HashMap<String, String>) -> XPathExpression {
    XPathExpression::new(expand(x.source(), re, map))
}

fn expand_rule(r: &Rule, re: &Regex, map: &HashMap<String, String>) -> Rule {
    // ResolveExtends already ran, so every rule reaching here is concrete.
    match r {
        Rule::Concrete(cr) => Rule::Concrete(schematron_ast::ConcreteRule {
            context: expand_query(&cr.context, re, map),
            id: expand_opt(&cr.id, re, map),
            checks: cr.checks.iter().map(|c| expand_check(c, re, map)).collect::<Vec<_>>().into(),
            variables: cr
                .variables
                .iter()
                .map(|v| expand_variable(v, re, map))
                .collect::<Vec<_>>()
                .into(),
            paragraphs: cr
                .paragraphs
                .iter()
                .map(|p| expand_paragraph(p, re, map))
                .collect::<Vec<_>>()
                .into(),
            extends: Seq::from(vec![]),
            flag: expand_opt(&cr.flag, re, map),
            fpi: expand_opt(&cr.fpi, re, map),
            icon: expand_opt(&cr.icon, re, map),
            role: expand_opt(&cr.role, re, map),
            see: expand_opt(&cr.see, re, map),
            subject: cr.subject.as_ref().map(|x| expand_xpath(x, re, map)),
            xml_lang: expand_opt(&cr.xml_lang, re, map),
            xml_space: expand_opt(&cr.xml_space, re, map),
        }),
        other => other.clone(),
    }
}

fn expand_check(c: &Check, re: &Regex, map: &HashMap<String, String>) -> Check {
    match c {
        Check::Assert(b) => Check::Assert(expand_checkbody(b, re, map)),
        Check::Report(b) => Check::Report(expand_checkbody(b, re, map)),
    }
}

fn expand_checkbody(b: &CheckBody, re: &Regex, map: &HashMap<String, String>) -> CheckBody {
    CheckBody {
        test: expand_query(&b.test, re, map),
        content: expand_richtext(&b.content, re, map),
        diagnostics: b.diagnostics.iter().map(|s| expand_str(s, re, map)).collect::<Vec<_>>().into(),
        properties: b.properties.iter().map(|s| expand_str(s, re, map)).collect::<Vec<_>>().into(),
        flag: expand_opt(&b.flag, re, map),
        id: expand_opt(&b.id, re, map),
        role: expand_opt(&b.role, re, map),
        see: expand_opt(&b.see, re, map),
        subject: b.subject.as_ref().map(|x| expand_xpath(x, re, map)),
        fpi: expand_opt(&b.fpi, re, map),
        icon: expand_opt(&b.icon, re, map),
        xml_lang: expand_opt(&b.xml_lang, re, map),
        xml_space: expand_opt(&b.xml_space, re, map),
    }
}

fn expand_variable(v: &Variable, re: &Regex, map: &HashMap<String, String>) -> Variable {
    match v {
        Variable::Query(q) => Variable::Query(QueryVariable {
            name: expand_str(&q.name, re, map),
            query: expand_query(&q.query, re, map),
        }),
        Variable::Xml(x) => Variable::Xml(XMLVariable {
            name: expand_str(&x.name, re, map),
            xml: expand_str(&x.xml, re, map),
        }),
    }
}

fn expand_richtext(seq: &Seq<RichTextItem>, re: &Regex, map: &HashMap<String, String>) -> Seq<RichTextItem> {
    seq.iter()
        .map(|item| match item {
            RichTextItem::Text(s) => RichTextItem::Text(expand_str(s, re, map)),
            RichTextItem::ValueOf(v) => RichTextItem::ValueOf(ValueOf {
                select: expand_query(&v.select, re, map),
            }),
            RichTextItem::Name(n) => RichTextItem::Name(NameNode {
                path: n.path.as_ref().map(|p| expand_query(p, re, map)),
            }),
        })
        .collect::<Vec<_>>()
        .into()
}

fn expand_paragraph(p: &Paragraph, re: &Regex, map: &HashMap<String, String>) -> Paragraph {
    Paragraph {
        content: expand_richtext(&p.content, re, map),
        id: expand_opt(&p.id, re, map),
        class: expand_opt(&p.class, re, map),
        icon: expand_opt(&p.icon, re, map),
        xml_lang: expand_opt(&p.xml_lang, re, map),
        xml_space: expand_opt(&p.xml_space, re, map),
    }
}

fn expand_title(t: &Title, re: &Regex, map: &HashMap<String, String>) -> Title {
    Title {
        content: expand_richtext(&t.content, re, map),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_boundary_prevents_cascading_match() {
        let params = vec![PatternParameter {
            name: "a".into(),
            value: "X".into(),
        }];
        let re = macro_regex(&params);
        let map: HashMap<String, String> = params.iter().map(|p| (p.name.to_string(), p.value.to_string())).collect();
        assert_eq!(expand("$a$ab", &re, &map), "X$ab");
    }

    #[test]
    fn leaves_no_abstracts_or_instances() {
        let abstract_pattern = AbstractPattern {
            id: "base".into(),
            title: None,
            rules: Seq::from(vec![]),
            variables: Seq::from(vec![]),
            paragraphs: Seq::from(vec![]),
            documents: None,
            fpi: None,
            icon: None,
            see: None,
            xml_lang: None,
            xml_space: None,
        };
        let instance = InstancePattern {
            id: Some("inst1".into()),
            abstract_id_ref: "base".into(),
            parameters: Seq::from(vec![]),
            documents: None,
            fpi: None,
            icon: None,
            see: None,
            xml_lang: None,
            xml_space: None,
        };
        let schema = Schema {
            title: None,
            namespaces: Seq::from(vec![]),
            phases: Seq::from(vec![]),
            patterns: Seq::from(vec![Pattern::Abstract(abstract_pattern), Pattern::Instance(instance)]),
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
        };
        let reduced = resolve_abstract_patterns(&schema).unwrap();
        assert_eq!(reduced.patterns.len(), 1);
        assert!(reduced.patterns[0].as_concrete().is_some());
    }
}
