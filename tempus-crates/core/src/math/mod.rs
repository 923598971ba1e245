//! Arithmetic on time values with infinity sentinels.
mod time_arithmetic;

pub use time_arithmetic::*;
