use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Absolute simulation time, counted in whole time units.
///
/// The wall-clock length of one unit is a property of the runtime, not of the
/// dispatcher. Tests drive the clock by hand.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    #[inline]
    pub fn offset(self, units: u64) -> Tick {
        Tick(self.0.saturating_add(units))
    }
}

impl Add<u64> for Tick {
    type Output = Tick;

    #[inline]
    fn add(self, rhs: u64) -> Tick {
        self.offset(rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
