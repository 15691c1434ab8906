//! Default rule set.

use crate::{NoFileManagerInLoad, SyncSdkInit};
use launch_guard_core::RuleBox;

/// Returns the default rule set, in dispatch order.
///
/// Includes:
/// - `no-file-manager-in-load` (LG001) - Blocking filesystem calls in `+load`
/// - `sync-sdk-init` (LG002) - Synchronous SDK initialization entry points
#[must_use]
pub fn default_rules() -> Vec<RuleBox> {
    vec![
        Box::new(NoFileManagerInLoad::new()),
        Box::new(SyncSdkInit::new()),
    ]
}
