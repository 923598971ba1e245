use thiserror::Error;

#[cfg(doc)]
use crate::TemporalNetworkManager;

/// Errors related to adding constraints to a [`TemporalNetworkManager`].
///
/// Whenever one of these errors is returned, the network is left exactly as it was before the
/// failed operation.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConstraintOperationError {
    /// The constraint cannot hold together with the constraints already in the network, e.g. it
    /// would close a cycle of negative length.
    #[error("Adding the constraint failed because it is infeasible with the current network")]
    InfeasibleConstraint,
}
