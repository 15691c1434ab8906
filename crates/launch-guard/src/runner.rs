//! One-call entry point running the default rule set.

use launch_guard_core::{Analyzer, AnalyzerError, DiagnosticSink, TranslationUnit};

/// Runs the default launch-guard rules over one translation unit.
///
/// Builds a fresh analyzer (and fresh rule instances) for the unit, so
/// repeated calls are fully independent.
///
/// # Errors
///
/// Propagates the first rule failure; see [`AnalyzerError`].
pub fn check_translation_unit(
    unit: &TranslationUnit,
    sink: &mut dyn DiagnosticSink,
) -> Result<(), AnalyzerError> {
    let mut builder = Analyzer::builder();
    for rule in launch_guard_rules::default_rules() {
        builder = builder.rule_box(rule);
    }
    builder.build().run_on_translation_unit(unit, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use launch_guard_core::ast::{CallExpr, Expr};
    use launch_guard_core::{MemorySink, MethodSignature, SourceLocation};

    #[test]
    fn default_rules_run_end_to_end() {
        let unit = TranslationUnit::new().with_expr(Expr::Call(CallExpr::on_class(
            "Bugly",
            MethodSignature::parse("startWithAppId:").expect("parse"),
            SourceLocation::new(1, 1),
        )));
        let mut sink = MemorySink::new();
        check_translation_unit(&unit, &mut sink).expect("run");
        assert_eq!(sink.diagnostics.len(), 1);
        assert_eq!(sink.diagnostics[0].rule, "sync-sdk-init");
    }
}
