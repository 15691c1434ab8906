//! # launch-guard-core
//!
//! Core framework for launch-path linting over a host-supplied AST.
//!
//! This crate provides the foundational traits and types for building
//! startup-performance checkers. It includes:
//!
//! - [`Rule`] trait for stateful, per-node-kind analysis units
//! - [`RuleRegistry`] for ordered, fan-out dispatch over one traversal
//! - [`Analyzer`] for the initialize → traverse → finalize lifecycle
//! - [`Diagnostic`] for representing findings, forwarded to a
//!   host-supplied [`DiagnosticSink`]
//!
//! The engine never parses source text: a frontend lowers one translation
//! unit into the [`ast`] input types and the host receives diagnostics
//! through its sink.
//!
//! ## Example
//!
//! ```ignore
//! use launch_guard_core::{Analyzer, MemorySink};
//!
//! let analyzer = Analyzer::builder().rule(MyRule::new()).build();
//! let mut sink = MemorySink::new();
//! analyzer.run_on_translation_unit(&unit, &mut sink)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod registry;
mod rule;
mod signature;
mod types;
mod walker;

/// Input AST and node views.
pub mod ast;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError, RulePhase};
pub use ast::{CallExprView, MethodDeclView, TranslationUnit};
pub use registry::RuleRegistry;
pub use rule::{Rule, RuleBox, RuleError, VisitFlow};
pub use signature::{MethodSignature, SelectorError};
pub use types::{Diagnostic, DiagnosticReport, DiagnosticSink, MemorySink, Severity, SourceLocation};
pub use walker::Walker;
