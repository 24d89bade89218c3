//! A single reported symptom observation.

use crate::SimTime;

/// One report of a symptom value from one module at one simulated instant.
///
/// Records are immutable once created: a module that changes its assessment
/// appends a new record rather than rewriting an old one, so a sequence of
/// records is a faithful history of what was reported and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "minicbor", derive(minicbor::Encode, minicbor::Decode))]
pub struct SymptomRecord {
    /// The reported symptom value.
    #[cfg_attr(feature = "minicbor", n(0))]
    pub value: i32,

    /// When the report was made, on the simulation clock.
    #[cfg_attr(feature = "minicbor", n(1))]
    pub time: SimTime,
}

impl SymptomRecord {
    /// Create a new record for the supplied value and time.
    pub const fn new(value: i32, time: SimTime) -> Self {
        Self { value, time }
    }
}
