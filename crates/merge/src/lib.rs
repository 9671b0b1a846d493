//! # Merge - Override Folding
//!
//! Folds override tables from independent contributors into one running
//! table, one contributor at a time.
//!
//! ```text
//!   set_original(baseline)
//!         │
//!         ▼
//!   ┌───────────┐   fold_override(A)   ┌───────────┐   fold_override(B)
//!   │ final = B0│ ───────────────────▶ │ final = F1│ ─────────────────▶ ...
//!   └───────────┘                      └───────────┘
//! ```
//!
//! ## Fold rules
//!
//! 1. Duplicate keys inside `final`, `original` and the incoming table are
//!    each collapsed **last-wins** before anything is compared.
//! 2. An incoming record that is value-identical to the *original* baseline
//!    record with the same key is skipped. Contributors often ship an
//!    untouched copy of the stock file, and those copies must not clobber a
//!    change folded in earlier.
//! 3. Every other incoming record is written into `final`, adding new keys
//!    and replacing existing ones.
//! 4. `final` is rebuilt in ascending key order.
//!
//! The skip in rule 2 is relative to the original baseline, not to the
//! current `final`: re-shipping a stock value after another contributor
//! changed it leaves that change in place.
//!
//! Folding order across contributors is significant and is the caller's
//! responsibility.

mod session;

use thiserror::Error;

pub use session::{FoldSummary, MergeSession};

/// Errors returned by [`MergeSession`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    /// A fold was attempted before [`MergeSession::set_original`].
    #[error("{kind} merge session not initialized: set the original baseline before folding overrides")]
    NotInitialized { kind: &'static str },
}
