//! Simple temporal networks: time points related by bounds on the time between them.
//!
//! A network stores, for every ordered pair of time points `(a, b)`, an interval `[lower, upper]`
//! containing `time(b) - time(a)`. Two data structures can hold a network, both behind the
//! [`TemporalNetwork`] trait:
//! - [`DistanceGraph`], a dense triangular matrix kept closed by incremental full path
//!   consistency;
//! - [`BellmanFordNetwork`], adjacency lists with an incrementally maintained potential function.
//!
//! Users are expected to go through [`TemporalNetworkManager`], which adds the global start and end
//! of a plan, a log of the enforced constraints and the operations which rebuild the network.
mod bellman_ford;
mod constraint_log;
mod constraint_tag;
mod distance_graph;
mod manager;
mod options;
mod subnetwork;
mod time_point;

use std::fmt::Debug;

pub use bellman_ford::BellmanFordNetwork;
pub use constraint_tag::ConstraintTag;
pub use distance_graph::DistanceGraph;
pub use manager::TemporalNetworkManager;
pub use options::Backend;
pub use options::NetworkOptions;
pub use subnetwork::Subnetwork;
pub use time_point::NetworkId;
pub use time_point::TimePoint;

use crate::math::Time;

/// The result of adding a constraint to a [`TemporalNetwork`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropagationOutcome {
    /// The constraint was already implied by the network, which is unchanged.
    Redundant,
    /// The constraint was added; `num_changes` stored values were tightened while propagating it.
    Tightened { num_changes: usize },
    /// The constraint contradicts the network, which is unchanged.
    Infeasible,
}

impl PropagationOutcome {
    pub fn is_infeasible(&self) -> bool {
        matches!(self, PropagationOutcome::Infeasible)
    }
}

/// The operations every network backend provides.
///
/// Bounds are always the tightest bounds implied by the constraints added so far, i.e.
/// `lower_bound(a, b)` is the largest `d` such that every schedule satisfying the network has
/// `time(b) - time(a) >= d`.
pub trait TemporalNetwork: Debug + Send {
    /// The identity shared by the time points of this network.
    fn network_id(&self) -> NetworkId;

    /// Adds an unconstrained time point.
    fn add_time_point(&mut self) -> TimePoint;

    fn num_time_points(&self) -> usize;

    /// The lower bound on `time(to) - time(from)`.
    fn lower_bound(&self, from: TimePoint, to: TimePoint) -> Time;

    /// The upper bound on `time(to) - time(from)`.
    fn upper_bound(&self, from: TimePoint, to: TimePoint) -> Time;

    /// Restricts `time(to) - time(from)` to `[min, max]`.
    ///
    /// This is atomic: when [`PropagationOutcome::Infeasible`] is returned, the network is left
    /// exactly as it was before the call.
    fn try_enforce_interval(
        &mut self,
        from: TimePoint,
        to: TimePoint,
        min: Time,
        max: Time,
    ) -> PropagationOutcome;

    fn is_consistent(&self) -> bool;

    /// Returns an independent copy of the network.
    fn boxed_clone(&self) -> Box<dyn TemporalNetwork>;
}

/// Creates an empty network of the given backend whose time points belong to `network`.
pub(crate) fn create_network(
    options: &NetworkOptions,
    network: NetworkId,
) -> Box<dyn TemporalNetwork> {
    match options.backend {
        Backend::DenseMatrix => Box::new(DistanceGraph::for_network(
            network,
            options.initial_capacity,
        )),
        Backend::IncrementalBellmanFord => Box::new(BellmanFordNetwork::for_network(
            network,
            options.initial_capacity,
        )),
    }
}
