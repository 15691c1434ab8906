//! The rule trait implemented by every unit of analysis.

use crate::ast::{CallExprView, MethodDeclView};
use crate::signature::SelectorError;
use crate::types::DiagnosticSink;
use thiserror::Error;

/// Errors a rule may raise from its lifecycle or visit hooks.
///
/// Any of these is fatal to the current run: the analyzer propagates the
/// failure and aborts analysis of the translation unit rather than
/// continuing with a partially-working rule set.
#[derive(Debug, Error)]
pub enum RuleError {
    /// A target selector in the rule's pattern table was malformed.
    #[error("invalid target selector: {0}")]
    InvalidSelector(#[from] SelectorError),

    /// Any other rule-specific failure.
    #[error("{0}")]
    Message(String),
}

/// Whether the walker should descend into the visited node's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitFlow {
    /// Visit the node's children.
    Continue,
    /// Skip the node's children.
    SkipChildren,
}

/// A stateful, named unit of analysis.
///
/// A rule registers interest in node kinds by overriding the visit hooks; the
/// dispatcher fans every matching node out to every registered rule during a
/// single traversal. Rules may keep private state between visits and emit
/// diagnostics through the sink, but must not outlive one analysis run:
/// `initialize` repopulates rule-local state, so a reused instance would
/// accumulate stale pattern tables.
///
/// # Example
///
/// ```ignore
/// use launch_guard_core::{CallExprView, DiagnosticSink, Rule, RuleError, VisitFlow};
///
/// struct CountCalls {
///     seen: usize,
/// }
///
/// impl Rule for CountCalls {
///     fn name(&self) -> &'static str { "count-calls" }
///     fn code(&self) -> &'static str { "EX001" }
///
///     fn visit_call_expr(
///         &mut self,
///         _view: &CallExprView<'_>,
///         _sink: &mut dyn DiagnosticSink,
///     ) -> Result<VisitFlow, RuleError> {
///         self.seen += 1;
///         Ok(VisitFlow::Continue)
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "sync-sdk-init").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "LG001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Called exactly once before traversal begins.
    ///
    /// Rules populate their target pattern tables here; the tables are
    /// treated as read-only for the rest of the run.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError`] if the rule cannot build its pattern table;
    /// this aborts the run.
    fn initialize(&mut self) -> Result<(), RuleError> {
        Ok(())
    }

    /// Called exactly once after traversal completes, for summary reporting.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError`] on failure; this aborts the run.
    fn finalize(&mut self, sink: &mut dyn DiagnosticSink) -> Result<(), RuleError> {
        let _ = sink;
        Ok(())
    }

    /// Invoked for every method declaration, before its body is visited.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError`] on failure; this aborts the run.
    fn visit_method_decl(
        &mut self,
        view: &MethodDeclView<'_>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<VisitFlow, RuleError> {
        let _ = (view, sink);
        Ok(VisitFlow::Continue)
    }

    /// Invoked for every call expression, before its receiver and arguments
    /// are visited.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError`] on failure; this aborts the run.
    fn visit_call_expr(
        &mut self,
        view: &CallExprView<'_>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<VisitFlow, RuleError> {
        let _ = (view, sink);
        Ok(VisitFlow::Continue)
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
