use std::fmt::Display;
use std::fmt::Formatter;

use crate::math::DisplayTime;
use crate::math::Time;
use crate::TimePoint;

/// The statement `time(target) - time(source) ∈ [min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Link {
    pub source: TimePoint,
    pub target: TimePoint,
    pub min: Time,
    pub max: Time,
}

impl Display for Link {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {}: [{}, {}]",
            self.source,
            self.target,
            DisplayTime(self.min),
            DisplayTime(self.max)
        )
    }
}
