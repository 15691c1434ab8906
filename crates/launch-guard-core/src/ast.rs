//! Input AST for one translation unit, plus the read-only node views
//! handed to rules.
//!
//! The engine never parses source text. A host frontend lowers its own
//! syntax tree into these types (directly or via serde) and hands the
//! [`TranslationUnit`] to the analyzer.

use crate::signature::MethodSignature;
use crate::types::SourceLocation;
use serde::{Deserialize, Serialize};

/// One source file's fully parsed AST, the unit of analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslationUnit {
    /// Top-level declarations and file-scope expressions, in source order.
    pub decls: Vec<Decl>,
}

impl TranslationUnit {
    /// Creates an empty translation unit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a class declaration.
    #[must_use]
    pub fn with_class(mut self, class: ClassDecl) -> Self {
        self.decls.push(Decl::Class(class));
        self
    }

    /// Appends a file-scope expression.
    #[must_use]
    pub fn with_expr(mut self, expr: Expr) -> Self {
        self.decls.push(Decl::Expr(expr));
        self
    }
}

/// A top-level item in a translation unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decl {
    /// A class declaration with its methods.
    Class(ClassDecl),
    /// A file-scope expression outside any method.
    Expr(Expr),
}

/// A class declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDecl {
    /// Declared class name.
    pub name: String,
    /// Methods in source order.
    pub methods: Vec<MethodDecl>,
}

impl ClassDecl {
    /// Creates a class declaration with no methods.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    /// Appends a method.
    #[must_use]
    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }
}

/// A method declaration inside a class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodDecl {
    /// Whether this is a class-level (`+`) method rather than an
    /// instance-level (`-`) one.
    pub is_class_level: bool,
    /// The method's signature.
    pub signature: MethodSignature,
    /// Position of the declaration.
    pub location: SourceLocation,
    /// Body expressions in source order.
    pub body: Vec<Expr>,
}

impl MethodDecl {
    /// Creates a class-level method with an empty body.
    #[must_use]
    pub fn class_level(signature: MethodSignature, location: SourceLocation) -> Self {
        Self {
            is_class_level: true,
            signature,
            location,
            body: Vec::new(),
        }
    }

    /// Creates an instance-level method with an empty body.
    #[must_use]
    pub fn instance_level(signature: MethodSignature, location: SourceLocation) -> Self {
        Self {
            is_class_level: false,
            signature,
            location,
            body: Vec::new(),
        }
    }

    /// Appends a body expression.
    #[must_use]
    pub fn with_body_expr(mut self, expr: Expr) -> Self {
        self.body.push(expr);
        self
    }
}

/// An expression node.
///
/// Only call expressions are of interest to the engine; everything else a
/// frontend lowers is represented as [`Expr::Opaque`] and skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// A call (message send).
    Call(CallExpr),
    /// Any other expression, not inspected.
    Opaque,
}

/// The receiver of a call expression.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Receiver {
    /// The call is sent to the class itself (e.g. `[NSFileManager ...]`).
    Class(String),
    /// The call is sent to an instance expression.
    Instance {
        /// The statically declared type of the instance, when the frontend
        /// could resolve it.
        type_name: Option<String>,
        /// The receiver expression itself (e.g. a chained call), when present.
        expr: Option<Box<Expr>>,
    },
}

/// A call expression (message send).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallExpr {
    /// What the call is sent to.
    pub receiver: Receiver,
    /// The invoked method's signature.
    pub signature: MethodSignature,
    /// Position of the call.
    pub location: SourceLocation,
    /// Argument expressions in source order.
    pub args: Vec<Expr>,
}

impl CallExpr {
    /// Creates a call on a class receiver.
    #[must_use]
    pub fn on_class(
        class_name: impl Into<String>,
        signature: MethodSignature,
        location: SourceLocation,
    ) -> Self {
        Self {
            receiver: Receiver::Class(class_name.into()),
            signature,
            location,
            args: Vec::new(),
        }
    }

    /// Creates a call on an instance receiver of a known declared type.
    #[must_use]
    pub fn on_instance_of(
        type_name: impl Into<String>,
        signature: MethodSignature,
        location: SourceLocation,
    ) -> Self {
        Self {
            receiver: Receiver::Instance {
                type_name: Some(type_name.into()),
                expr: None,
            },
            signature,
            location,
            args: Vec::new(),
        }
    }

    /// Sets the receiver expression for an instance call.
    ///
    /// No-op for class receivers.
    #[must_use]
    pub fn with_receiver_expr(mut self, receiver: Expr) -> Self {
        if let Receiver::Instance { expr, .. } = &mut self.receiver {
            *expr = Some(Box::new(receiver));
        }
        self
    }

    /// Appends an argument expression.
    #[must_use]
    pub fn with_arg(mut self, arg: Expr) -> Self {
        self.args.push(arg);
        self
    }
}

/// Read-only view of a method declaration, presented to rules.
///
/// Valid for the duration of one traversal.
#[derive(Debug, Clone, Copy)]
pub struct MethodDeclView<'ast> {
    decl: &'ast MethodDecl,
    class: &'ast ClassDecl,
}

impl<'ast> MethodDeclView<'ast> {
    pub(crate) fn new(decl: &'ast MethodDecl, class: &'ast ClassDecl) -> Self {
        Self { decl, class }
    }

    /// Whether this is a class-level method.
    #[must_use]
    pub fn is_class_level(&self) -> bool {
        self.decl.is_class_level
    }

    /// The method's signature.
    #[must_use]
    pub fn signature(&self) -> &'ast MethodSignature {
        &self.decl.signature
    }

    /// Name of the enclosing class.
    #[must_use]
    pub fn class_name(&self) -> &'ast str {
        &self.class.name
    }

    /// Position of the declaration.
    #[must_use]
    pub fn location(&self) -> SourceLocation {
        self.decl.location
    }
}

/// Read-only view of a call expression, presented to rules.
///
/// Valid for the duration of one traversal. The nearest enclosing method is
/// resolved by the walker from the call's lexical ancestor chain; it is a
/// pure function of the call's position in the tree, never of traversal
/// history, so matching cannot be corrupted by calls visited after a method
/// body ends.
#[derive(Debug, Clone, Copy)]
pub struct CallExprView<'ast> {
    call: &'ast CallExpr,
    enclosing_method: Option<MethodDeclView<'ast>>,
}

impl<'ast> CallExprView<'ast> {
    pub(crate) fn new(call: &'ast CallExpr, enclosing_method: Option<MethodDeclView<'ast>>) -> Self {
        Self {
            call,
            enclosing_method,
        }
    }

    /// The invoked method's signature.
    #[must_use]
    pub fn signature(&self) -> &'ast MethodSignature {
        &self.call.signature
    }

    /// Position of the call.
    #[must_use]
    pub fn location(&self) -> SourceLocation {
        self.call.location
    }

    /// The declared type the call is sent to, for class receivers and for
    /// instance receivers whose type the frontend resolved.
    #[must_use]
    pub fn receiver_type_name(&self) -> Option<&'ast str> {
        match &self.call.receiver {
            Receiver::Class(name) => Some(name),
            Receiver::Instance { type_name, .. } => type_name.as_deref(),
        }
    }

    /// Whether the call is sent to the class itself rather than an instance.
    #[must_use]
    pub fn is_class_receiver(&self) -> bool {
        matches!(self.call.receiver, Receiver::Class(_))
    }

    /// Nearest enclosing method declaration, or `None` for file-scope calls.
    #[must_use]
    pub fn ancestor_method(&self) -> Option<MethodDeclView<'ast>> {
        self.enclosing_method
    }
}
