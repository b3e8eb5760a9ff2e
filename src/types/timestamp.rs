//! Packet timestamp type

use serde::{Deserialize, Serialize};

/// Monotonic microsecond timestamp attached to every packet.
///
/// Packets constructed without an explicit timestamp carry the
/// [`Timestamp::UNSET`] sentinel. Stream-ordering semantics (what "monotonic"
/// means across a stream) belong to the consuming engine, not to the packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Sentinel reported by packets created without an explicit timestamp.
    pub const UNSET: Timestamp = Timestamp(i64::MIN);

    /// Create a timestamp from a microsecond count.
    pub const fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    /// Microsecond count. The sentinel reports `i64::MIN`.
    pub const fn micros(&self) -> i64 {
        self.0
    }

    /// Whether this is the unset sentinel.
    pub const fn is_unset(&self) -> bool {
        self.0 == i64::MIN
    }
}

impl From<i64> for Timestamp {
    fn from(micros: i64) -> Self {
        Timestamp(micros)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unset() { f.write_str("unset") } else { write!(f, "{}us", self.0) }
    }
}
