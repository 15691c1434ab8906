//! # launch-guard
//!
//! Launch-path linter: flags calls in one translation unit's AST that are
//! likely to slow application startup.
//!
//! This is the facade crate re-exporting the engine and the built-in rules.
//! A host frontend lowers its syntax tree into [`TranslationUnit`] and
//! supplies a [`DiagnosticSink`]; launch-guard forwards each finding to the
//! sink during a single traversal.
//!
//! ## Quick Start
//!
//! ```ignore
//! use launch_guard::{check_translation_unit, MemorySink};
//!
//! let mut sink = MemorySink::new();
//! check_translation_unit(&unit, &mut sink)?;
//! for diagnostic in &sink.diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//! ```
//!
//! ## Custom rule sets
//!
//! ```ignore
//! use launch_guard::Analyzer;
//! use launch_guard::rules::{NoFileManagerInLoad, SyncSdkInit};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(NoFileManagerInLoad::new().receiver_type("MyFileManager"))
//!     .rule(SyncSdkInit::new().target("UMConfigure", "initWithAppkey:channel:"))
//!     .build();
//! ```

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use launch_guard_core::*;

/// Built-in rules and the default rule set.
pub mod rules {
    pub use launch_guard_rules::*;
}

mod runner;

pub use runner::check_translation_unit;
