//! Ordered rule registry and per-node dispatch.

use crate::analyzer::{AnalyzerError, RulePhase};
use crate::ast::{CallExprView, MethodDeclView};
use crate::rule::{RuleBox, VisitFlow};
use crate::types::DiagnosticSink;
use tracing::warn;

/// One registered rule plus its name snapshot for error attribution.
struct RuleEntry {
    name: String,
    rule: RuleBox,
}

/// Owns the ordered rule collection and fans each visited node out to every
/// registered rule.
///
/// Registration order determines dispatch order, which in turn fixes the
/// order diagnostics are emitted for a single source location; it never
/// changes which diagnostics exist. A registry (and the rules it owns) serves
/// exactly one analysis run.
#[derive(Default)]
pub struct RuleRegistry {
    entries: Vec<RuleEntry>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule.
    ///
    /// Duplicate names are permitted and dispatched independently; a warning
    /// is logged since duplicates usually indicate a host wiring mistake.
    pub fn register(&mut self, rule: RuleBox) {
        let name = rule.name().to_string();
        if self.entries.iter().any(|e| e.name == name) {
            warn!(rule = %name, "duplicate rule name registered");
        }
        self.entries.push(RuleEntry { name, rule });
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of the registered rules, in registration order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Calls `initialize` on every rule in registration order.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule's error, attributed to that rule.
    pub fn run_initialize(&mut self) -> Result<(), AnalyzerError> {
        for entry in &mut self.entries {
            entry
                .rule
                .initialize()
                .map_err(|source| AnalyzerError::Rule {
                    rule: entry.name.clone(),
                    phase: RulePhase::Initialize,
                    source,
                })?;
        }
        Ok(())
    }

    /// Calls `finalize` on every rule in registration order.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule's error, attributed to that rule.
    pub fn run_finalize(&mut self, sink: &mut dyn DiagnosticSink) -> Result<(), AnalyzerError> {
        for entry in &mut self.entries {
            entry
                .rule
                .finalize(sink)
                .map_err(|source| AnalyzerError::Rule {
                    rule: entry.name.clone(),
                    phase: RulePhase::Finalize,
                    source,
                })?;
        }
        Ok(())
    }

    /// Dispatches a method declaration to every rule.
    ///
    /// The aggregate result is the logical AND across rules: children are
    /// visited only if every rule said continue. Every rule still sees the
    /// node itself even when an earlier rule asked to skip.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule's error, attributed to that rule.
    pub fn dispatch_method_decl(
        &mut self,
        view: &MethodDeclView<'_>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<VisitFlow, AnalyzerError> {
        let mut flow = VisitFlow::Continue;
        for entry in &mut self.entries {
            let rule_flow = entry
                .rule
                .visit_method_decl(view, sink)
                .map_err(|source| AnalyzerError::Rule {
                    rule: entry.name.clone(),
                    phase: RulePhase::Visit,
                    source,
                })?;
            if rule_flow == VisitFlow::SkipChildren {
                flow = VisitFlow::SkipChildren;
            }
        }
        Ok(flow)
    }

    /// Dispatches a call expression to every rule.
    ///
    /// Aggregation behaves as in [`Self::dispatch_method_decl`].
    ///
    /// # Errors
    ///
    /// Returns the first failing rule's error, attributed to that rule.
    pub fn dispatch_call_expr(
        &mut self,
        view: &CallExprView<'_>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<VisitFlow, AnalyzerError> {
        let mut flow = VisitFlow::Continue;
        for entry in &mut self.entries {
            let rule_flow = entry
                .rule
                .visit_call_expr(view, sink)
                .map_err(|source| AnalyzerError::Rule {
                    rule: entry.name.clone(),
                    phase: RulePhase::Visit,
                    source,
                })?;
            if rule_flow == VisitFlow::SkipChildren {
                flow = VisitFlow::SkipChildren;
            }
        }
        Ok(flow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{CallExpr, CallExprView};
    use crate::rule::{Rule, RuleError};
    use crate::signature::MethodSignature;
    use crate::types::{MemorySink, SourceLocation};

    struct FixedFlowRule {
        name: &'static str,
        flow: VisitFlow,
    }

    impl FixedFlowRule {
        fn new(name: &'static str, flow: VisitFlow) -> Self {
            Self { name, flow }
        }
    }

    impl Rule for FixedFlowRule {
        fn name(&self) -> &'static str {
            self.name
        }
        fn code(&self) -> &'static str {
            "TEST000"
        }

        fn visit_call_expr(
            &mut self,
            _view: &CallExprView<'_>,
            _sink: &mut dyn DiagnosticSink,
        ) -> Result<VisitFlow, RuleError> {
            Ok(self.flow)
        }
    }

    struct FailingRule;

    impl Rule for FailingRule {
        fn name(&self) -> &'static str {
            "failing-rule"
        }
        fn code(&self) -> &'static str {
            "TEST999"
        }

        fn initialize(&mut self) -> Result<(), RuleError> {
            Err(RuleError::Message("bad pattern table".to_string()))
        }
    }

    fn sample_call() -> CallExpr {
        CallExpr::on_class(
            "NSFileManager",
            MethodSignature::parse("fileExistsAtPath:").expect("parse"),
            SourceLocation::new(1, 1),
        )
    }

    #[test]
    fn dispatch_is_and_aggregated() {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(FixedFlowRule::new("a", VisitFlow::Continue)));
        registry.register(Box::new(FixedFlowRule::new("b", VisitFlow::SkipChildren)));
        registry.register(Box::new(FixedFlowRule::new("c", VisitFlow::Continue)));

        let call = sample_call();
        let view = CallExprView::new(&call, None);
        let mut sink = MemorySink::new();
        let flow = registry
            .dispatch_call_expr(&view, &mut sink)
            .expect("dispatch");
        assert_eq!(flow, VisitFlow::SkipChildren);
    }

    #[test]
    fn all_continue_yields_continue() {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(FixedFlowRule::new("a", VisitFlow::Continue)));
        registry.register(Box::new(FixedFlowRule::new("b", VisitFlow::Continue)));

        let call = sample_call();
        let view = CallExprView::new(&call, None);
        let mut sink = MemorySink::new();
        let flow = registry
            .dispatch_call_expr(&view, &mut sink)
            .expect("dispatch");
        assert_eq!(flow, VisitFlow::Continue);
    }

    #[test]
    fn empty_registry_dispatch_is_noop() {
        let mut registry = RuleRegistry::new();
        assert!(registry.is_empty());

        let call = sample_call();
        let view = CallExprView::new(&call, None);
        let mut sink = MemorySink::new();
        let flow = registry
            .dispatch_call_expr(&view, &mut sink)
            .expect("dispatch");
        assert_eq!(flow, VisitFlow::Continue);
        assert!(sink.diagnostics.is_empty());
    }

    #[test]
    fn duplicate_names_are_both_registered() {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(FixedFlowRule::new("dup", VisitFlow::Continue)));
        registry.register(Box::new(FixedFlowRule::new("dup", VisitFlow::Continue)));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.rule_names(), vec!["dup", "dup"]);
    }

    #[test]
    fn initialize_failure_is_attributed() {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(FailingRule));

        let err = registry.run_initialize().expect_err("must fail");
        let message = err.to_string();
        assert!(message.contains("failing-rule"));
        assert!(message.contains("initialize"));
        assert!(message.contains("bad pattern table"));
    }
}
