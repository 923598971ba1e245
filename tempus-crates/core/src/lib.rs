//! # Tempus
//! Temporal constraint networks for planning with time.
//!
//! A plan is made of events (the start and end of actions, the time at which a condition must
//! hold, ...) whose absolute times are not fixed. A [`TemporalNetworkManager`] keeps track of the
//! bounds on the time between every two events, so that a planner can ask which orderings of its
//! events remain possible, while adding constraints one by one and copying the network whenever it
//! branches.
//!
//! ```rust
//! # use tempus_core::TemporalNetworkManager;
//! let mut network = TemporalNetworkManager::new();
//! let load = network.new_time_point();
//! let unload = network.new_time_point();
//!
//! network.enforce_constraint(load, unload, 10, 20).expect("consistent");
//!
//! // each branch of the search works on its own copy
//! let mut branch = network.deep_copy();
//! branch.set_time(unload, 15).expect("consistent");
//!
//! assert_eq!(branch.latest_time(load), 5);
//! assert!(network.latest_time(load) > 5);
//!
//! // infeasible constraints are rejected and leave the network untouched
//! assert!(branch.enforce_before(unload, load).is_err());
//! assert_eq!(branch.latest_time(load), 5);
//! ```
//!
//! Two data structures can store a network, see [`Backend`]. Both give the same answers; they
//! differ in the cost of copies, queries and updates.
//!
//! Durations which are controlled by the environment rather than by the planner are supported by
//! the [`stnu::Stnu`] wrapper.
pub mod asserts;
pub(crate) mod basic_types;
pub mod containers;
pub mod math;
pub(crate) mod network;
pub mod statistics;
pub mod stnu;

pub use convert_case;
pub use rand;

pub use crate::basic_types::ConstraintOperationError;
pub use crate::basic_types::Random;
pub use crate::math::Time;
pub use crate::math::NEGATIVE_INFINITY;
pub use crate::math::POSITIVE_INFINITY;
pub use crate::network::Backend;
pub use crate::network::BellmanFordNetwork;
pub use crate::network::ConstraintTag;
pub use crate::network::DistanceGraph;
pub use crate::network::NetworkId;
pub use crate::network::NetworkOptions;
pub use crate::network::PropagationOutcome;
pub use crate::network::Subnetwork;
pub use crate::network::TemporalNetwork;
pub use crate::network::TemporalNetworkManager;
pub use crate::network::TimePoint;
