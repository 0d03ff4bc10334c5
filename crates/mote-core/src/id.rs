//! Strongly-typed identifiers.

use std::fmt;

/// Monotonically increasing step counter.
///
/// Incremented each time the simulation advances one step. `TickId(0)`
/// is the freshly-constructed (or freshly-reset) state, before any
/// step has run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
