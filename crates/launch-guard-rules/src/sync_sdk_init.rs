//! Rule to flag known synchronous third-party SDK initialization calls.
//!
//! # Rationale
//!
//! Crash-reporting and analytics SDKs commonly expose a synchronous setup
//! entry point that apps call during launch. When that call runs on the main
//! thread it blocks the first frame. The rule points every such call site out
//! so the developer can confirm the thread context.
//!
//! # Detected Patterns
//!
//! Any call matching a configured `(receiver type, selector)` pair, anywhere
//! in the file — inside any method or at file scope. Default table:
//!
//! - `Bugly startWithAppId:`
//!
//! # Limitations
//!
//! Purely structural: the rule does not verify which thread the call actually
//! runs on, and deliberately never will — thread analysis is a different tool.

use launch_guard_core::{
    CallExprView, Diagnostic, DiagnosticSink, MethodSignature, Rule, RuleError, Severity,
    VisitFlow,
};
use tracing::debug;

/// Rule code for sync-sdk-init.
pub const CODE: &str = "LG002";

/// Rule name for sync-sdk-init.
pub const NAME: &str = "sync-sdk-init";

/// Default `(receiver type, selector)` pairs to flag.
const DEFAULT_TARGETS: &[(&str, &str)] = &[("Bugly", "startWithAppId:")];

/// Flags known synchronous SDK initialization entry points.
#[derive(Debug, Clone)]
pub struct SyncSdkInit {
    extra_targets: Vec<(String, String)>,
    severity: Severity,
    targets: Vec<(String, MethodSignature)>,
    matches: usize,
}

impl Default for SyncSdkInit {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncSdkInit {
    /// Creates the rule with the default target table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            extra_targets: Vec::new(),
            severity: Severity::Warning,
            targets: Vec::new(),
            matches: 0,
        }
    }

    /// Adds a `(receiver type, selector)` pair beyond the built-in defaults.
    #[must_use]
    pub fn target(
        mut self,
        receiver_type: impl Into<String>,
        selector: impl Into<String>,
    ) -> Self {
        self.extra_targets
            .push((receiver_type.into(), selector.into()));
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for SyncSdkInit {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags synchronous third-party SDK initialization calls"
    }

    fn initialize(&mut self) -> Result<(), RuleError> {
        self.targets.clear();
        self.matches = 0;
        for (receiver, selector) in DEFAULT_TARGETS {
            self.targets
                .push(((*receiver).to_string(), MethodSignature::parse(selector)?));
        }
        for (receiver, selector) in &self.extra_targets {
            self.targets
                .push((receiver.clone(), MethodSignature::parse(selector)?));
        }
        Ok(())
    }

    fn finalize(&mut self, _sink: &mut dyn DiagnosticSink) -> Result<(), RuleError> {
        debug!(rule = NAME, matches = self.matches, "finalized");
        Ok(())
    }

    fn visit_call_expr(
        &mut self,
        view: &CallExprView<'_>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<VisitFlow, RuleError> {
        let Some(receiver) = view.receiver_type_name() else {
            return Ok(VisitFlow::Continue);
        };

        for (target_type, target_sig) in &self.targets {
            if receiver == target_type && view.signature() == target_sig {
                self.matches += 1;
                let form = if view.is_class_receiver() { "+" } else { "-" };
                sink.report(
                    Diagnostic::new(
                        CODE,
                        NAME,
                        self.severity,
                        view.location(),
                        format!(
                            "synchronous SDK initialization `{receiver} {form}{target_sig}` detected"
                        ),
                    )
                    .with_help(
                        "confirm this call does not run on the main thread during launch",
                    ),
                );
                break;
            }
        }

        Ok(VisitFlow::Continue)
    }
}
