use std::fmt::Display;
use std::fmt::Formatter;

/// A time value, either an absolute time relative to the global start of a network or the length
/// of a gap between two time points.
///
/// Values at or beyond [`POSITIVE_INFINITY`] (resp. [`NEGATIVE_INFINITY`]) are interpreted as
/// "unbounded"; every finite value lies strictly between the two sentinels.
pub type Time = i32;

/// The sentinel for an absent upper bound.
pub const POSITIVE_INFINITY: Time = 2_000_000_000;
/// The sentinel for an absent lower bound.
pub const NEGATIVE_INFINITY: Time = -POSITIVE_INFINITY;

/// Returns true if `value` is neither of the infinity sentinels.
pub fn is_finite(value: Time) -> bool {
    NEGATIVE_INFINITY < value && value < POSITIVE_INFINITY
}

/// Maps any [`Time`] onto the representable range, so that out-of-range inputs such as
/// [`i32::MIN`] behave like the corresponding sentinel and can safely be negated.
pub(crate) fn normalise(value: Time) -> Time {
    value.clamp(NEGATIVE_INFINITY, POSITIVE_INFINITY)
}

/// Clamps a wide intermediate result onto the representable range.
pub(crate) fn clamp_to_time(value: i64) -> Time {
    value.clamp(i64::from(NEGATIVE_INFINITY), i64::from(POSITIVE_INFINITY)) as Time
}

/// Adds two bounds without overflowing.
///
/// An unbounded operand makes the result unbounded; [`NEGATIVE_INFINITY`] takes precedence over
/// [`POSITIVE_INFINITY`]. Finite sums which exceed the representable range saturate to the
/// corresponding sentinel.
pub(crate) fn saturating_sum(lhs: Time, rhs: Time) -> Time {
    if lhs <= NEGATIVE_INFINITY || rhs <= NEGATIVE_INFINITY {
        NEGATIVE_INFINITY
    } else if lhs >= POSITIVE_INFINITY || rhs >= POSITIVE_INFINITY {
        POSITIVE_INFINITY
    } else {
        clamp_to_time(i64::from(lhs) + i64::from(rhs))
    }
}

/// Formats a [`Time`] with `-inf`/`+inf` for the sentinels.
#[derive(Clone, Copy, Debug)]
pub struct DisplayTime(pub Time);

impl Display for DisplayTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0 <= NEGATIVE_INFINITY {
            write!(f, "-inf")
        } else if self.0 >= POSITIVE_INFINITY {
            write!(f, "+inf")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
