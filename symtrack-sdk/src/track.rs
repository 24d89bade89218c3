//! Per-module report history for a single symptom.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use symtrack_types::{SimTime, SourceHistory, SymptomRecord};

/// One module's live reporting state for one symptom.
///
/// A track is created lazily the first time its module reports, and lives as
/// long as the owning [`SymptomTracker`]. The history is append-only: records
/// are never reordered or pruned, and "current" always means the last record
/// appended. Timestamp ordering and value ranges are not validated - the
/// engine may replay, backdate, or duplicate timestamps freely.
///
/// Reads are safe from any thread. Writes (`record`, `resolve`, `activate`)
/// take the individual lock or atomic but are not coordinated beyond that;
/// the engine keeps a single writer per module identifier.
///
/// [`SymptomTracker`]: crate::SymptomTracker
pub struct SourceTrack {
    /// The reporting module.
    module: String,
    /// The symptom this track belongs to. A plain identifier, not a
    /// reference to the owning tracker, and never part of exported output
    /// (the snapshot schema keys sources under the symptom already).
    symptom: String,
    resolved: AtomicBool,
    history: RwLock<Vec<SymptomRecord>>,
}

impl SourceTrack {
    pub(crate) fn new(module: &str, symptom: &str) -> Self {
        Self {
            module: module.to_string(),
            symptom: symptom.to_string(),
            resolved: AtomicBool::new(false),
            history: RwLock::new(Vec::new()),
        }
    }

    /// The module this track records reports from.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// The symptom this track contributes to.
    pub fn symptom(&self) -> &str {
        &self.symptom
    }

    /// Append a report and store its resolved flag.
    ///
    /// Every report carries its own resolution state, so a module can
    /// declare itself resolved in the same call that delivers a value, and
    /// a later report with `resolved = false` reactivates it.
    pub fn record(&self, time: SimTime, value: i32, resolved: bool) {
        self.history.write().push(SymptomRecord::new(value, time));
        self.resolved.store(resolved, Ordering::Relaxed);
    }

    /// Mark this module's contribution resolved. Idempotent.
    pub fn resolve(&self) {
        self.resolved.store(true, Ordering::Relaxed);
    }

    /// Mark this module's contribution active again. Idempotent.
    pub fn activate(&self) {
        self.resolved.store(false, Ordering::Relaxed);
    }

    /// Whether the module currently considers its contribution resolved.
    pub fn is_resolved(&self) -> bool {
        self.resolved.load(Ordering::Relaxed)
    }

    /// The most recently reported value, or `None` before the first report.
    pub fn current_value(&self) -> Option<i32> {
        self.history.read().last().map(|r| r.value)
    }

    /// When the most recent report was made, or `None` before the first.
    pub fn last_update(&self) -> Option<SimTime> {
        self.history.read().last().map(|r| r.time)
    }

    /// The value of the first report made at exactly `time`, if any.
    ///
    /// Scans in append order; when several reports share a timestamp the
    /// earliest one wins.
    pub fn value_at(&self, time: SimTime) -> Option<i32> {
        self.history
            .read()
            .iter()
            .find(|r| r.time == time)
            .map(|r| r.value)
    }

    /// A call-time copy of the full history, in report order.
    pub fn records(&self) -> Vec<SymptomRecord> {
        self.history.read().clone()
    }

    /// Flatten this track into its export form.
    ///
    /// The symptom back-reference is dropped here: a [`SourceHistory`] only
    /// carries the resolved flag and the records.
    pub fn collect(&self) -> SourceHistory {
        SourceHistory {
            resolved: self.is_resolved(),
            records: self.records(),
        }
    }
}

impl Clone for SourceTrack {
    /// Duplicate this track: same module and symptom, same resolved flag,
    /// and a history holding the same records. Records are immutable `Copy`
    /// values, so the copies are indistinguishable from shared references.
    fn clone(&self) -> Self {
        Self {
            module: self.module.clone(),
            symptom: self.symptom.clone(),
            resolved: AtomicBool::new(self.is_resolved()),
            history: RwLock::new(self.records()),
        }
    }
}

impl std::fmt::Debug for SourceTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceTrack")
            .field("module", &self.module)
            .field("symptom", &self.symptom)
            .field("resolved", &self.is_resolved())
            .field("reports", &self.history.read().len())
            .finish()
    }
}
