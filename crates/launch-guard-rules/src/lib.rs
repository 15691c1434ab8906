//! # launch-guard-rules
//!
//! Built-in rules for launch-guard.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | LG001 | `no-file-manager-in-load` | Flags blocking filesystem calls inside class-level `+load` methods |
//! | LG002 | `sync-sdk-init` | Flags synchronous third-party SDK initialization calls |
//!
//! ## Usage
//!
//! ```ignore
//! use launch_guard_core::Analyzer;
//! use launch_guard_rules::{NoFileManagerInLoad, SyncSdkInit};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(NoFileManagerInLoad::new())
//!     .rule(SyncSdkInit::new())
//!     .build();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod no_file_manager_in_load;
mod presets;
mod sync_sdk_init;

pub use no_file_manager_in_load::NoFileManagerInLoad;
pub use presets::default_rules;
pub use sync_sdk_init::SyncSdkInit;

/// Re-export core types for convenience.
pub use launch_guard_core::{Diagnostic, Rule, Severity};
