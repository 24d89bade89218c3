//! Simulation-clock representation for serialization.
//!
//! The simulation clock is a plain counter of simulated milliseconds. Keeping
//! it behind a transparent newtype pins the unit at the schema boundary so
//! every format serializes timestamps the same way.

/// A point on the simulation clock, in simulated milliseconds.
///
/// `SimTime` carries no relation to wall-clock time: the engine advances it
/// as the simulated world progresses. A `u64` of milliseconds covers
/// ~584 million years of simulated time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[cfg_attr(feature = "minicbor", derive(minicbor::Encode, minicbor::Decode))]
#[cfg_attr(feature = "minicbor", cbor(transparent))]
pub struct SimTime(#[cfg_attr(feature = "minicbor", n(0))] pub u64);

impl SimTime {
    /// Create from simulated milliseconds.
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Create from simulated seconds.
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs * 1000)
    }

    /// Get the value in simulated milliseconds.
    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// Get the value in simulated seconds (truncated).
    pub const fn as_secs(&self) -> u64 {
        self.0 / 1000
    }
}

impl From<u64> for SimTime {
    fn from(millis: u64) -> Self {
        Self(millis)
    }
}

impl From<SimTime> for u64 {
    fn from(t: SimTime) -> Self {
        t.0
    }
}
