//! Snapshot - a point-in-time view of one symptom's reported state.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::{SchemaVersion, SimTime, SymptomRecord};

/// One module's exported contribution to a symptom.
///
/// This is the flattened form of a live source track: the full report
/// history in insertion order plus the resolved flag. It deliberately does
/// not name the symptom that owns it - the owning [`SymptomSnapshot`] keys
/// sources by module, and repeating the symptom here would reintroduce the
/// back-reference that exports must not emit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "minicbor", derive(minicbor::Encode, minicbor::Decode))]
pub struct SourceHistory {
    /// Whether the module has declared this contribution resolved.
    #[cfg_attr(feature = "minicbor", n(0))]
    pub resolved: bool,

    /// Every report from this module, in the order it was made.
    #[cfg_attr(feature = "minicbor", n(1))]
    pub records: Vec<SymptomRecord>,
}

impl SourceHistory {
    /// Create an empty, unresolved history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for a source history.
    pub fn builder() -> SourceHistoryBuilder {
        SourceHistoryBuilder::new()
    }

    /// Check whether this module has reported anything.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recently reported value, if any.
    pub fn current_value(&self) -> Option<i32> {
        self.records.last().map(|r| r.value)
    }

    /// When the most recent report was made, if any.
    pub fn last_update(&self) -> Option<SimTime> {
        self.records.last().map(|r| r.time)
    }

    /// The value of the first report made at exactly `time`, if any.
    ///
    /// Reports are scanned in insertion order; when several share a
    /// timestamp, the earliest-appended one wins.
    pub fn value_at(&self, time: SimTime) -> Option<i32> {
        self.records.iter().find(|r| r.time == time).map(|r| r.value)
    }
}

/// A point-in-time view of everything reported for one symptom.
///
/// This is the top-level export type: the simulation engine flattens a live
/// tracker into one of these whenever results are written out. Snapshots are
/// plain data - mutating one never affects the tracker it came from.
///
/// # Example
///
/// ```rust
/// use symtrack_types::{SimTime, SymptomSnapshot};
///
/// let snapshot = SymptomSnapshot::builder("cough")
///     .source("bronchitis", |s| s.record(6, SimTime::from_millis(100)))
///     .source("smoking", |s| s.record(2, SimTime::from_millis(80)))
///     .build();
///
/// assert_eq!(snapshot.peak_value(), 6);
/// assert_eq!(snapshot.dominant_source(), Some("bronchitis"));
///
/// // Serialize with serde (requires "serde" feature)
/// // let json = serde_json::to_string(&snapshot)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "minicbor", derive(minicbor::Encode, minicbor::Decode))]
pub struct SymptomSnapshot {
    /// Schema version for forward compatibility.
    #[cfg_attr(feature = "minicbor", n(0))]
    pub version: SchemaVersion,

    /// The symptom this snapshot describes.
    #[cfg_attr(feature = "minicbor", n(1))]
    pub symptom: String,

    /// Per-module report histories, keyed by module identifier.
    #[cfg_attr(feature = "minicbor", n(2))]
    pub sources: BTreeMap<String, SourceHistory>,
}

impl SymptomSnapshot {
    /// Create an empty snapshot for a symptom.
    pub fn new(symptom: impl Into<String>) -> Self {
        Self {
            version: SchemaVersion::current(),
            symptom: symptom.into(),
            sources: BTreeMap::new(),
        }
    }

    /// Create a builder for constructing snapshots.
    pub fn builder(symptom: impl Into<String>) -> SymptomSnapshotBuilder {
        SymptomSnapshotBuilder::new(symptom)
    }

    /// Check if the snapshot is empty (no sources).
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Number of sources in the snapshot.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Get the history for a specific module.
    pub fn get(&self, module: &str) -> Option<&SourceHistory> {
        self.sources.get(module)
    }

    /// Iterate over all sources.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &SourceHistory)> {
        self.sources.iter()
    }

    /// The observed symptom value at the moment of the snapshot.
    ///
    /// This is the maximum current value across unresolved sources, and 0
    /// when no unresolved source has reported. A legitimately reported 0 is
    /// indistinguishable from "nothing reported"; use [`dominant_source`]
    /// when that distinction matters.
    ///
    /// [`dominant_source`]: Self::dominant_source
    pub fn peak_value(&self) -> i32 {
        let mut max = 0;
        for history in self.sources.values() {
            if history.resolved {
                continue;
            }
            if let Some(value) = history.current_value() {
                if value > max {
                    max = value;
                }
            }
        }
        max
    }

    /// The module holding the highest unresolved value, if any.
    ///
    /// Ties keep the first source encountered.
    pub fn dominant_source(&self) -> Option<&str> {
        let mut result: Option<&str> = None;
        let mut max = 0;
        for (module, history) in self.sources.iter() {
            if history.resolved {
                continue;
            }
            let Some(value) = history.current_value() else {
                continue;
            };
            if result.is_none() || value > max {
                result = Some(module);
                max = value;
            }
        }
        result
    }
}

/// Builder for constructing `SymptomSnapshot` instances.
#[derive(Debug)]
pub struct SymptomSnapshotBuilder {
    symptom: String,
    sources: BTreeMap<String, SourceHistory>,
}

impl SymptomSnapshotBuilder {
    /// Create a new builder for a symptom.
    pub fn new(symptom: impl Into<String>) -> Self {
        Self {
            symptom: symptom.into(),
            sources: BTreeMap::new(),
        }
    }

    /// Add a source with a history built using a closure.
    pub fn source<F>(mut self, module: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(SourceHistoryBuilder) -> SourceHistoryBuilder,
    {
        let history = f(SourceHistoryBuilder::new()).build();
        self.sources.insert(module.into(), history);
        self
    }

    /// Add a source with a pre-built history.
    pub fn source_history(mut self, module: impl Into<String>, history: SourceHistory) -> Self {
        self.sources.insert(module.into(), history);
        self
    }

    /// Build the snapshot.
    pub fn build(self) -> SymptomSnapshot {
        SymptomSnapshot {
            version: SchemaVersion::current(),
            symptom: self.symptom,
            sources: self.sources,
        }
    }
}

/// Builder for `SourceHistory`.
#[derive(Debug, Default)]
pub struct SourceHistoryBuilder {
    resolved: bool,
    records: Vec<SymptomRecord>,
}

impl SourceHistoryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a report.
    pub fn record(mut self, value: i32, time: SimTime) -> Self {
        self.records.push(SymptomRecord::new(value, time));
        self
    }

    /// Set the resolved flag.
    pub fn resolved(mut self, resolved: bool) -> Self {
        self.resolved = resolved;
        self
    }

    /// Build the history.
    pub fn build(self) -> SourceHistory {
        SourceHistory {
            resolved: self.resolved,
            records: self.records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // SourceHistory Tests
    // ========================================================================

    #[test]
    fn empty_history_has_no_values() {
        let h = SourceHistory::new();
        assert!(h.is_empty());
        assert!(h.current_value().is_none());
        assert!(h.last_update().is_none());
        assert!(h.value_at(SimTime::from_millis(0)).is_none());
    }

    #[test]
    fn current_value_is_last_appended() {
        let h = SourceHistory::builder()
            .record(3, SimTime::from_millis(10))
            .record(5, SimTime::from_millis(20))
            .build();

        assert_eq!(h.current_value(), Some(5));
        assert_eq!(h.last_update(), Some(SimTime::from_millis(20)));
    }

    #[test]
    fn value_at_returns_first_match() {
        // Duplicate timestamps are kept; the earliest-appended one wins
        let h = SourceHistory::builder()
            .record(3, SimTime::from_millis(10))
            .record(9, SimTime::from_millis(10))
            .build();

        assert_eq!(h.value_at(SimTime::from_millis(10)), Some(3));
    }

    #[test]
    fn value_at_unknown_time_is_none() {
        let h = SourceHistory::builder()
            .record(3, SimTime::from_millis(10))
            .build();

        assert!(h.value_at(SimTime::from_millis(11)).is_none());
    }

    #[test]
    fn history_preserves_insertion_order() {
        // Timestamps out of order stay in report order
        let h = SourceHistory::builder()
            .record(1, SimTime::from_millis(30))
            .record(2, SimTime::from_millis(10))
            .record(3, SimTime::from_millis(20))
            .build();

        let values: Vec<i32> = h.records.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![1, 2, 3]);
        assert_eq!(h.current_value(), Some(3));
    }

    #[test]
    fn default_is_unresolved_and_empty() {
        let h = SourceHistory::default();
        assert!(!h.resolved);
        assert!(h.is_empty());
    }

    // ========================================================================
    // SymptomSnapshot Tests
    // ========================================================================

    #[test]
    fn test_snapshot_builder() {
        let snapshot = SymptomSnapshot::builder("fever")
            .source("flu", |s| s.record(3, SimTime::from_millis(10)))
            .source("cold", |s| s.record(5, SimTime::from_millis(10)))
            .build();

        assert_eq!(snapshot.symptom, "fever");
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.peak_value(), 5);
        assert_eq!(snapshot.dominant_source(), Some("cold"));
    }

    #[test]
    fn resolved_sources_do_not_contribute() {
        let snapshot = SymptomSnapshot::builder("fever")
            .source("flu", |s| s.record(3, SimTime::from_millis(10)))
            .source("cold", |s| s.record(5, SimTime::from_millis(10)).resolved(true))
            .build();

        assert_eq!(snapshot.peak_value(), 3);
        assert_eq!(snapshot.dominant_source(), Some("flu"));
    }

    #[test]
    fn empty_snapshot_peaks_at_zero() {
        let snapshot = SymptomSnapshot::new("fever");
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.peak_value(), 0);
        assert_eq!(snapshot.dominant_source(), None);
    }

    #[test]
    fn all_resolved_peaks_at_zero() {
        let snapshot = SymptomSnapshot::builder("fever")
            .source("flu", |s| s.record(3, SimTime::from_millis(10)).resolved(true))
            .build();

        assert_eq!(snapshot.peak_value(), 0);
        assert_eq!(snapshot.dominant_source(), None);
    }

    #[test]
    fn sources_without_reports_are_skipped() {
        let snapshot = SymptomSnapshot::builder("fever")
            .source("flu", |s| s)
            .source("cold", |s| s.record(2, SimTime::from_millis(5)))
            .build();

        assert_eq!(snapshot.peak_value(), 2);
        assert_eq!(snapshot.dominant_source(), Some("cold"));
    }

    #[test]
    fn negative_values_never_raise_the_peak() {
        let snapshot = SymptomSnapshot::builder("fever")
            .source("flu", |s| s.record(-4, SimTime::from_millis(10)))
            .build();

        // The aggregate floors at 0, but the source still dominates
        assert_eq!(snapshot.peak_value(), 0);
        assert_eq!(snapshot.dominant_source(), Some("flu"));
    }

    #[test]
    fn dominant_source_tie_keeps_first_encountered() {
        let snapshot = SymptomSnapshot::builder("fever")
            .source("alpha", |s| s.record(5, SimTime::from_millis(10)))
            .source("beta", |s| s.record(5, SimTime::from_millis(10)))
            .build();

        assert_eq!(snapshot.dominant_source(), Some("alpha"));
    }

    #[test]
    fn get_and_iter() {
        let snapshot = SymptomSnapshot::builder("fever")
            .source("flu", |s| s.record(3, SimTime::from_millis(10)))
            .build();

        assert!(snapshot.get("flu").is_some());
        assert!(snapshot.get("unknown").is_none());
        assert_eq!(snapshot.iter().count(), 1);
    }

    #[test]
    fn duplicate_source_overwrites() {
        let snapshot = SymptomSnapshot::builder("fever")
            .source("flu", |s| s.record(1, SimTime::from_millis(10)))
            .source("flu", |s| s.record(2, SimTime::from_millis(20)))
            .build();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("flu").unwrap().current_value(), Some(2));
    }

    #[test]
    fn snapshot_version_is_current() {
        let snapshot = SymptomSnapshot::new("fever");
        assert!(snapshot.version.is_compatible());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let snapshot = SymptomSnapshot::builder("fever")
            .source("flu", |s| s.record(3, SimTime::from_millis(10)).resolved(true))
            .build();

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: SymptomSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(snapshot, parsed);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialized_form_never_names_the_symptom_per_source() {
        // The owning symptom appears exactly once, at the top level
        let snapshot = SymptomSnapshot::builder("fever")
            .source("flu", |s| s.record(3, SimTime::from_millis(10)))
            .build();

        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json.matches("fever").count(), 1);
    }

    #[cfg(feature = "minicbor")]
    #[test]
    fn test_minicbor_roundtrip() {
        let snapshot = SymptomSnapshot::builder("fever")
            .source("flu", |s| s.record(3, SimTime::from_millis(10)))
            .build();

        let bytes = minicbor::to_vec(&snapshot).unwrap();
        let parsed: SymptomSnapshot = minicbor::decode(&bytes).unwrap();

        assert_eq!(snapshot, parsed);
    }
}
