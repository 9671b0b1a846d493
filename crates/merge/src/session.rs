use record::Record;
use table::last_wins;
use tracing::{debug, trace};

use crate::MergeError;

/// What a single fold did, for diagnostics only.
///
/// Whether a key counted as `modified` or `added` has no effect on the
/// resulting table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldSummary<K> {
    /// Incoming keys that replaced a record already in `final`.
    pub modified: usize,
    /// Incoming keys that were not in `final` yet.
    pub added: usize,
    /// Incoming keys dropped because they matched the original baseline.
    pub skipped: Vec<K>,
}

impl<K> Default for FoldSummary<K> {
    fn default() -> Self {
        Self {
            modified: 0,
            added: 0,
            skipped: Vec::new(),
        }
    }
}

impl<K> FoldSummary<K> {
    /// Returns `true` if the fold wrote nothing into `final`.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.modified == 0 && self.added == 0
    }
}

/// Merge state for one record kind.
///
/// The session is owned by whoever sequences the folds. `fold_override`
/// takes `&mut self`, so two folds against the same state can never
/// interleave; share a session across threads behind a `Mutex`.
#[derive(Debug, Clone)]
pub struct MergeSession<R: Record> {
    /// Untouched baseline, used only for the skip decision.
    original: Option<Vec<R>>,
    /// Running merge result. `None` until the session is initialized.
    final_records: Option<Vec<R>>,
}

impl<R: Record> Default for MergeSession<R> {
    fn default() -> Self {
        Self {
            original: None,
            final_records: None,
        }
    }
}

impl<R: Record> MergeSession<R> {
    /// Creates an uninitialized session. Folding fails until a baseline is set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots `entries` as both the original baseline and the starting
    /// `final` table. Replaces any previous state.
    pub fn set_original(&mut self, entries: &[R]) {
        self.original = Some(entries.to_vec());
        self.final_records = Some(entries.to_vec());
    }

    /// Starts `final` from `entries` without capturing an original baseline.
    ///
    /// Folds on such a session never skip anything, since there is no
    /// baseline to compare against.
    pub fn set_final(&mut self, entries: &[R]) {
        self.original = None;
        self.final_records = Some(entries.to_vec());
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.final_records.is_some()
    }

    /// The original baseline, if one was captured.
    pub fn original_records(&self) -> Option<&[R]> {
        self.original.as_deref()
    }

    /// The current merged table, if the session is initialized.
    ///
    /// After at least one non-empty fold this is sorted by key with no
    /// duplicates. Before that it is the baseline exactly as supplied.
    pub fn final_records(&self) -> Option<&[R]> {
        self.final_records.as_deref()
    }

    /// Merges one contributor's records into `final`.
    ///
    /// # Steps
    ///
    /// 1. An empty `incoming` leaves `final` untouched.
    /// 2. `final`, `original` and `incoming` are each collapsed last-wins.
    /// 3. Incoming records value-identical to the original record with the
    ///    same key are skipped; all others are written into `final`.
    /// 4. `final` is rebuilt in ascending key order.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::NotInitialized`] if neither
    /// [`set_original`](Self::set_original) nor [`set_final`](Self::set_final)
    /// has been called. This is checked before the empty-input shortcut.
    pub fn fold_override(&mut self, incoming: &[R]) -> Result<FoldSummary<R::Key>, MergeError> {
        let current = self
            .final_records
            .as_deref()
            .ok_or(MergeError::NotInitialized { kind: R::NAME })?;

        let mut summary = FoldSummary::default();
        if incoming.is_empty() {
            return Ok(summary);
        }

        let mut merged = last_wins(current);
        let original = self.original.as_deref().map(last_wins).unwrap_or_default();

        for (key, entry) in last_wins(incoming) {
            if let Some(orig) = original.get(&key) {
                if entry.values_equal(orig) {
                    trace!(table = R::NAME, %key, "skipping record identical to original");
                    summary.skipped.push(key);
                    continue;
                }
            }

            if merged.insert(key, entry).is_some() {
                summary.modified += 1;
            } else {
                summary.added += 1;
            }
        }

        // BTreeMap yields values in key order.
        self.final_records = Some(merged.into_values().collect());

        debug!(
            table = R::NAME,
            modified = summary.modified,
            added = summary.added,
            skipped = summary.skipped.len(),
            total = self.final_records.as_ref().map_or(0, Vec::len),
            "folded override"
        );

        Ok(summary)
    }
}
