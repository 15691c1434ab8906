//! Analyzer lifecycle: initialize, traverse, finalize.

use crate::ast::TranslationUnit;
use crate::registry::RuleRegistry;
use crate::rule::{Rule, RuleBox, RuleError};
use crate::types::DiagnosticSink;
use crate::walker::Walker;

use thiserror::Error;
use tracing::{debug, info, warn};

/// Lifecycle phase in which a rule failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulePhase {
    /// The rule's `initialize` hook.
    Initialize,
    /// One of the rule's visit hooks.
    Visit,
    /// The rule's `finalize` hook.
    Finalize,
}

impl std::fmt::Display for RulePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialize => write!(f, "initialize"),
            Self::Visit => write!(f, "visit"),
            Self::Finalize => write!(f, "finalize"),
        }
    }
}

/// Errors that abort analysis of a translation unit.
///
/// A failing rule is fatal to the whole run; there is no partial-rule
/// isolation, so the failure is propagated rather than swallowed.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// A rule hook failed.
    #[error("rule `{rule}` failed during {phase}: {source}")]
    Rule {
        /// Name of the failing rule.
        rule: String,
        /// Lifecycle phase that failed.
        phase: RulePhase,
        /// The underlying rule error.
        source: RuleError,
    },
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    rules: Vec<RuleBox>,
    args: Vec<String>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with no rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds a host-supplied argument string.
    ///
    /// Arguments are currently unused by the built-in rules; they are
    /// retained for future selective rule enabling.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Adds multiple host-supplied argument strings.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Builds the analyzer.
    #[must_use]
    pub fn build(self) -> Analyzer {
        let mut registry = RuleRegistry::new();
        for rule in self.rules {
            debug!(rule = rule.name(), code = rule.code(), "registering rule");
            registry.register(rule);
        }
        for arg in &self.args {
            debug!(%arg, "host argument (reserved, unused)");
        }
        Analyzer {
            registry,
            args: self.args,
        }
    }
}

/// Runs the registered rules over exactly one translation unit.
///
/// The host constructs one analyzer per unit; [`Analyzer::run_on_translation_unit`]
/// consumes the analyzer, so rule state accumulated during a run can never
/// leak into the analysis of another unit.
pub struct Analyzer {
    registry: RuleRegistry,
    args: Vec<String>,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.registry.len()
    }

    /// Host-supplied argument strings, in the order given.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Analyzes one translation unit: rule initialization, a single pre-order
    /// traversal with dispatch, then rule finalization.
    ///
    /// Diagnostics are forwarded to `sink` as rules emit them.
    ///
    /// # Errors
    ///
    /// Propagates the first rule failure from any lifecycle phase; the run
    /// for this unit is aborted at that point.
    pub fn run_on_translation_unit(
        mut self,
        unit: &TranslationUnit,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<(), AnalyzerError> {
        if self.registry.is_empty() {
            warn!("no rules registered; analysis will produce no diagnostics");
        }
        info!(
            rules = self.registry.len(),
            decls = unit.decls.len(),
            "starting translation unit analysis"
        );

        self.registry.run_initialize()?;
        Walker::new(&mut self.registry, sink).walk(unit)?;
        self.registry.run_finalize(sink)?;

        info!("translation unit analysis complete");
        Ok(())
    }
}
