mod constraint_operation_error;
mod random;
mod trail;

pub use constraint_operation_error::ConstraintOperationError;
pub use random::Random;
pub(crate) use trail::Trail;
