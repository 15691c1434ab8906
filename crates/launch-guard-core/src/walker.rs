//! Single-pass pre-order traversal of a translation unit.

use crate::analyzer::AnalyzerError;
use crate::ast::{
    CallExprView, ClassDecl, Decl, Expr, MethodDeclView, Receiver, TranslationUnit,
};
use crate::registry::RuleRegistry;
use crate::rule::VisitFlow;
use crate::types::DiagnosticSink;

/// Walks one translation unit, dispatching nodes of interest to the registry.
///
/// The traversal is pre-order depth-first: a method declaration is dispatched
/// before its body, and a call expression before its receiver and arguments.
/// The nearest enclosing method view is threaded down the recursion so every
/// call view can answer ancestor lookups from its lexical position alone.
///
/// A walker is single-use; restarting means constructing a new walker over a
/// new tree.
pub struct Walker<'a> {
    registry: &'a mut RuleRegistry,
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> Walker<'a> {
    /// Creates a walker over the given registry and sink.
    pub fn new(registry: &'a mut RuleRegistry, sink: &'a mut dyn DiagnosticSink) -> Self {
        Self { registry, sink }
    }

    /// Traverses the translation unit start to finish.
    ///
    /// # Errors
    ///
    /// Propagates the first rule failure encountered during dispatch.
    pub fn walk(mut self, unit: &TranslationUnit) -> Result<(), AnalyzerError> {
        for decl in &unit.decls {
            match decl {
                Decl::Class(class) => self.walk_class(class)?,
                Decl::Expr(expr) => self.walk_expr(expr, None)?,
            }
        }
        Ok(())
    }

    fn walk_class(&mut self, class: &ClassDecl) -> Result<(), AnalyzerError> {
        for method in &class.methods {
            let view = MethodDeclView::new(method, class);
            let flow = self.registry.dispatch_method_decl(&view, &mut *self.sink)?;
            if flow == VisitFlow::SkipChildren {
                continue;
            }
            for expr in &method.body {
                self.walk_expr(expr, Some(view))?;
            }
        }
        Ok(())
    }

    fn walk_expr<'ast>(
        &mut self,
        expr: &'ast Expr,
        enclosing: Option<MethodDeclView<'ast>>,
    ) -> Result<(), AnalyzerError> {
        match expr {
            Expr::Call(call) => {
                let view = CallExprView::new(call, enclosing);
                let flow = self.registry.dispatch_call_expr(&view, &mut *self.sink)?;
                if flow == VisitFlow::SkipChildren {
                    return Ok(());
                }
                if let Receiver::Instance {
                    expr: Some(receiver),
                    ..
                } = &call.receiver
                {
                    self.walk_expr(receiver, enclosing)?;
                }
                for arg in &call.args {
                    self.walk_expr(arg, enclosing)?;
                }
                Ok(())
            }
            Expr::Opaque => Ok(()),
        }
    }
}
