//! Result model (§3.2): the full tree of per-node, per-pattern, per-rule and
//! per-check outcomes produced by one `validate_xml` call.

use std::rc::Rc;

use schematron_ast::{Check, Schema};

use crate::node::XmlNodeDescriptor;

pub struct XMLDocumentValidationResult {
    pub schema: Rc<Schema>,
    pub document_path: Option<String>,
    pub schema_path: Option<String>,
    pub phase: Option<String>,
    pub node_results: Vec<FullNodeResult>,
}

impl XMLDocumentValidationResult {
    /// Valid iff no check across all fired rules has a derived "fail or
    /// fire" outcome (§4.5).
    pub fn is_valid(&self) -> bool {
        self.node_results.iter().all(FullNodeResult::is_valid)
    }
}

pub struct FullNodeResult {
    pub node: XmlNodeDescriptor,
    pub pattern_results: Vec<PatternResult>,
}

impl FullNodeResult {
    pub fn is_valid(&self) -> bool {
        self.pattern_results.iter().all(PatternResult::is_valid)
    }
}

pub struct PatternResult {
    pub pattern_id: Option<String>,
    pub rule_results: Vec<RuleResult>,
}

impl PatternResult {
    pub fn is_valid(&self) -> bool {
        self.rule_results.iter().all(RuleResult::is_valid)
    }

    /// Whether any rule in this pattern result fired on this node — the
    /// SVRL builder only emits `active-pattern` for patterns that did.
    pub fn has_fired_rule(&self) -> bool {
        self.rule_results.iter().any(|r| matches!(r, RuleResult::Fired(_)))
    }
}

pub enum RuleResult {
    Skipped,
    Fired(FiredRuleResult),
    Suppressed(SuppressedRuleResult),
}

impl RuleResult {
    pub fn is_valid(&self) -> bool {
        match self {
            RuleResult::Fired(fired) => fired.checks.iter().all(|c| !c.fails_or_fires()),
            _ => true,
        }
    }
}

pub struct FiredRuleResult {
    pub context: String,
    pub id: Option<String>,
    pub role: Option<String>,
    pub checks: Vec<CheckResult>,
    pub subject_node: Option<XmlNodeDescriptor>,
}

pub struct SuppressedRuleResult {
    pub context: String,
    pub id: Option<String>,
    pub role: Option<String>,
}

pub struct CheckResult {
    pub check: Check,
    pub test_result: bool,
    pub text: String,
    pub subject_node: Option<XmlNodeDescriptor>,
    pub properties: Vec<PropertyResult>,
    pub diagnostics: Vec<DiagnosticResult>,
}

impl CheckResult {
    /// The check polarity table (§4.5): an assert fails when its test is
    /// false; a report fires when its test is true. Both are "events".
    pub fn fails_or_fires(&self) -> bool {
        match &self.check {
            Check::Assert(_) => !self.test_result,
            Check::Report(_) => self.test_result,
        }
    }
}

pub struct PropertyResult {
    pub id: String,
    pub role: Option<String>,
    pub text: String,
}

pub struct DiagnosticResult {
    pub id: String,
    pub text: String,
}
