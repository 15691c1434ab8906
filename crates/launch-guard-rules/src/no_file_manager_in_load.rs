//! Rule to flag blocking filesystem calls inside `+load`.
//!
//! # Rationale
//!
//! The runtime invokes every class-level `+load` method while the binary is
//! still being mapped in, before `main` runs. Filesystem probes or directory
//! creation there execute on every launch and directly lengthen startup time.
//!
//! # Detected Patterns
//!
//! Inside a class-level `load` method, on the filesystem-manager type
//! (`NSFileManager` by default), via class or typed-instance receiver:
//!
//! - `fileExistsAtPath:`
//! - `createDirectoryAtPath:withIntermediateDirectories:attributes:error:`
//!
//! # Not Detected
//!
//! The same calls in any other method, or on any other receiver type. The
//! rule matches call sites structurally; it does not compute reachability.

use launch_guard_core::{
    CallExprView, Diagnostic, DiagnosticSink, MethodSignature, Rule, RuleError, Severity,
    VisitFlow,
};
use tracing::debug;

/// Rule code for no-file-manager-in-load.
pub const CODE: &str = "LG001";

/// Rule name for no-file-manager-in-load.
pub const NAME: &str = "no-file-manager-in-load";

/// The reserved run-at-load-time method name.
const LOAD_METHOD: &str = "load";

/// Default filesystem-manager receiver type.
const DEFAULT_RECEIVER_TYPE: &str = "NSFileManager";

/// Default blocking filesystem selectors to flag.
const DEFAULT_TARGET_SELECTORS: &[&str] = &[
    "fileExistsAtPath:",
    "createDirectoryAtPath:withIntermediateDirectories:attributes:error:",
];

/// Flags blocking filesystem-manager calls inside class-level `+load`.
#[derive(Debug, Clone)]
pub struct NoFileManagerInLoad {
    receiver_type: String,
    extra_selectors: Vec<String>,
    severity: Severity,
    load_signature: MethodSignature,
    targets: Vec<MethodSignature>,
    matches: usize,
}

impl Default for NoFileManagerInLoad {
    fn default() -> Self {
        Self::new()
    }
}

impl NoFileManagerInLoad {
    /// Creates the rule with the default receiver type and target selectors.
    #[must_use]
    pub fn new() -> Self {
        Self {
            receiver_type: DEFAULT_RECEIVER_TYPE.to_string(),
            extra_selectors: Vec::new(),
            severity: Severity::Warning,
            load_signature: MethodSignature::nullary(LOAD_METHOD),
            targets: Vec::new(),
            matches: 0,
        }
    }

    /// Overrides the filesystem-manager receiver type name.
    #[must_use]
    pub fn receiver_type(mut self, type_name: impl Into<String>) -> Self {
        self.receiver_type = type_name.into();
        self
    }

    /// Adds a target selector beyond the built-in defaults.
    #[must_use]
    pub fn target_selector(mut self, selector: impl Into<String>) -> Self {
        self.extra_selectors.push(selector.into());
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Whether the call sits lexically inside a class-level `+load` method,
    /// decided solely by ancestor lookup from the call site.
    fn is_inside_load(&self, view: &CallExprView<'_>) -> bool {
        view.ancestor_method().is_some_and(|method| {
            method.is_class_level() && *method.signature() == self.load_signature
        })
    }
}

impl Rule for NoFileManagerInLoad {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags blocking filesystem calls inside class-level +load methods"
    }

    fn initialize(&mut self) -> Result<(), RuleError> {
        // Repopulate from scratch so a table from a prior (misused) run
        // cannot accumulate.
        self.targets.clear();
        self.matches = 0;
        for selector in DEFAULT_TARGET_SELECTORS {
            self.targets.push(MethodSignature::parse(selector)?);
        }
        for selector in &self.extra_selectors {
            self.targets.push(MethodSignature::parse(selector)?);
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
        if !self.is_inside_load(view) {
            return Ok(VisitFlow::Continue);
        }

        let Some(receiver) = view.receiver_type_name() else {
            return Ok(VisitFlow::Continue);
        };
        if receiver != self.receiver_type {
            return Ok(VisitFlow::Continue);
        }

        for target in &self.targets {
            if view.signature() == target {
                self.matches += 1;
                sink.report(
                    Diagnostic::new(
                        CODE,
                        NAME,
                        self.severity,
                        view.location(),
                        format!(
                            "`{receiver}` call `{target}` inside `+load` may slow application startup"
                        ),
                    )
                    .with_help(
                        "move the filesystem work off the load path, e.g. defer it to first use",
                    ),
                );
                // At most one diagnostic per call site from this rule.
                break;
            }
        }

        Ok(VisitFlow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launch_guard_core::ast::{CallExpr, ClassDecl, Expr, MethodDecl};
    use launch_guard_core::{Analyzer, MemorySink, SourceLocation, TranslationUnit};

    fn sig(selector: &str) -> MethodSignature {
        MethodSignature::parse(selector).expect("parse")
    }

    fn loc(line: usize) -> SourceLocation {
        SourceLocation::new(line, 5)
    }

    fn check(unit: &TranslationUnit) -> Vec<Diagnostic> {
        let analyzer = Analyzer::builder().rule(NoFileManagerInLoad::new()).build();
        let mut sink = MemorySink::new();
        analyzer
            .run_on_translation_unit(unit, &mut sink)
            .expect("run");
        sink.into_diagnostics()
    }

    fn unit_with_load_body(call: CallExpr) -> TranslationUnit {
        TranslationUnit::new().with_class(
            ClassDecl::new("AppDelegate").with_method(
                MethodDecl::class_level(MethodSignature::nullary("load"), loc(1))
                    .with_body_expr(Expr::Call(call)),
            ),
        )
    }

    #[test]
    fn flags_file_exists_in_load_on_class_receiver() {
        let unit = unit_with_load_body(CallExpr::on_class(
            "NSFileManager",
            sig("fileExistsAtPath:"),
            loc(2),
        ));
        let diagnostics = check(&unit);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, CODE);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert_eq!(diagnostics[0].location.line, 2);
        assert!(diagnostics[0].message.contains("fileExistsAtPath:"));
        assert!(diagnostics[0].message.contains("NSFileManager"));
    }

    #[test]
    fn flags_create_directory_in_load() {
        let unit = unit_with_load_body(CallExpr::on_instance_of(
            "NSFileManager",
            sig("createDirectoryAtPath:withIntermediateDirectories:attributes:error:"),
            loc(3),
        ));
        let diagnostics = check(&unit);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn ignores_call_in_other_class_level_method() {
        let unit = TranslationUnit::new().with_class(
            ClassDecl::new("AppDelegate").with_method(
                MethodDecl::class_level(MethodSignature::nullary("initialize"), loc(1))
                    .with_body_expr(Expr::Call(CallExpr::on_class(
                        "NSFileManager",
                        sig("fileExistsAtPath:"),
                        loc(2),
                    ))),
            ),
        );
        assert!(check(&unit).is_empty());
    }

    #[test]
    fn ignores_instance_level_load_method() {
        let unit = TranslationUnit::new().with_class(
            ClassDecl::new("AppDelegate").with_method(
                MethodDecl::instance_level(MethodSignature::nullary("load"), loc(1))
                    .with_body_expr(Expr::Call(CallExpr::on_class(
                        "NSFileManager",
                        sig("fileExistsAtPath:"),
                        loc(2),
                    ))),
            ),
        );
        assert!(check(&unit).is_empty());
    }

    #[test]
    fn ignores_other_receiver_type_in_load() {
        let unit = unit_with_load_body(CallExpr::on_class(
            "MyCache",
            sig("fileExistsAtPath:"),
            loc(2),
        ));
        assert!(check(&unit).is_empty());
    }

    #[test]
    fn ignores_file_scope_call() {
        let unit = TranslationUnit::new().with_expr(Expr::Call(CallExpr::on_class(
            "NSFileManager",
            sig("fileExistsAtPath:"),
            loc(1),
        )));
        assert!(check(&unit).is_empty());
    }

    #[test]
    fn arity_prefix_does_not_match() {
        // createDirectoryAtPath: alone is not the four-part target.
        let unit = unit_with_load_body(CallExpr::on_class(
            "NSFileManager",
            sig("createDirectoryAtPath:"),
            loc(2),
        ));
        assert!(check(&unit).is_empty());
    }

    #[test]
    fn one_diagnostic_per_call_site() {
        let rule = NoFileManagerInLoad::new().target_selector("fileExistsAtPath:");
        let unit = unit_with_load_body(CallExpr::on_class(
            "NSFileManager",
            sig("fileExistsAtPath:"),
            loc(2),
        ));
        // The duplicate target entry must not produce a second diagnostic.
        let analyzer = Analyzer::builder().rule(rule).build();
        let mut sink = MemorySink::new();
        analyzer
            .run_on_translation_unit(&unit, &mut sink)
            .expect("run");
        assert_eq!(sink.diagnostics.len(), 1);
    }

    #[test]
    fn later_method_after_load_is_not_tainted() {
        // Matching must key off the call's own ancestor, not off having
        // previously entered +load.
        let unit = TranslationUnit::new().with_class(
            ClassDecl::new("AppDelegate")
                .with_method(
                    MethodDecl::class_level(MethodSignature::nullary("load"), loc(1))
                        .with_body_expr(Expr::Opaque),
                )
                .with_method(
                    MethodDecl::instance_level(sig("viewDidLoad"), loc(5)).with_body_expr(
                        Expr::Call(CallExpr::on_class(
                            "NSFileManager",
                            sig("fileExistsAtPath:"),
                            loc(6),
                        )),
                    ),
                ),
        );
        assert!(check(&unit).is_empty());
    }

    #[test]
    fn custom_receiver_type_is_honored() {
        let rule = NoFileManagerInLoad::new().receiver_type("MyFileManager");
        let unit = unit_with_load_body(CallExpr::on_class(
            "MyFileManager",
            sig("fileExistsAtPath:"),
            loc(2),
        ));
        let analyzer = Analyzer::builder().rule(rule).build();
        let mut sink = MemorySink::new();
        analyzer
            .run_on_translation_unit(&unit, &mut sink)
            .expect("run");
        assert_eq!(sink.diagnostics.len(), 1);
    }

    #[test]
    fn malformed_extra_selector_fails_initialize() {
        let rule = NoFileManagerInLoad::new().target_selector("");
        let analyzer = Analyzer::builder().rule(rule).build();
        let mut sink = MemorySink::new();
        let err = analyzer
            .run_on_translation_unit(&TranslationUnit::new(), &mut sink)
            .expect_err("must fail");
        let message = err.to_string();
        assert!(message.contains(NAME));
        assert!(message.contains("initialize"));
    }
}
