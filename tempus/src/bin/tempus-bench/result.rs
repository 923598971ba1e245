use thiserror::Error;

use tempus::Backend;
use tempus::TimePoint;

pub(crate) type BenchResult<T> = Result<T, BenchError>;

#[derive(Error, Debug)]
pub(crate) enum BenchError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error(
        "Backends disagree in scenario {scenario} on the bounds between {from} and {to}: \
         {first} gives [{first_lower}, {first_upper}], {second} gives [{second_lower}, {second_upper}]"
    )]
    BackendsDisagree {
        scenario: usize,
        from: TimePoint,
        to: TimePoint,
        first: Backend,
        first_lower: i32,
        first_upper: i32,
        second: Backend,
        second_lower: i32,
        second_upper: i32,
    },
    #[error("Backends disagree in scenario {scenario} on whether constraint {index} is feasible")]
    BackendsDisagreeOnFeasibility { scenario: usize, index: usize },
}

impl BenchError {
    pub(crate) fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments(message.into())
    }
}
