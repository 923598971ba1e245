//! Leveled assertions used throughout the crate.
//!
//! The simple level is always active and guards against misuse of the public API (e.g. using a
//! [`crate::TimePoint`] which does not belong to a network). The higher levels verify internal
//! invariants, such as the closure of a distance graph after propagation, and are only enabled
//! in tests or with the `debug-checks` feature since they are (much) more expensive than the
//! operations they check.

#[cfg(all(not(test), not(feature = "debug-checks")))]
pub const TEMPUS_ASSERT_LEVEL_DEFINITION: u8 = TEMPUS_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub const TEMPUS_ASSERT_LEVEL_DEFINITION: u8 = TEMPUS_ASSERT_ADVANCED;

pub const TEMPUS_ASSERT_SIMPLE: u8 = 1;
pub const TEMPUS_ASSERT_MODERATE: u8 = 2;
pub const TEMPUS_ASSERT_ADVANCED: u8 = 3;

#[macro_export]
#[doc(hidden)]
macro_rules! tempus_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::TEMPUS_ASSERT_LEVEL_DEFINITION >= $crate::asserts::TEMPUS_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! tempus_assert_eq_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::TEMPUS_ASSERT_LEVEL_DEFINITION >= $crate::asserts::TEMPUS_ASSERT_SIMPLE {
            assert_eq!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! tempus_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::TEMPUS_ASSERT_LEVEL_DEFINITION >= $crate::asserts::TEMPUS_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! tempus_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::asserts::TEMPUS_ASSERT_LEVEL_DEFINITION >= $crate::asserts::TEMPUS_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}
