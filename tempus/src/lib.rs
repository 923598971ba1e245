//! # Tempus
//! Temporal constraint networks for planning with time.
//!
//! This crate re-exports [`tempus_core`], which contains the networks themselves, and ships the
//! `tempus-bench` binary which replays random scenarios against each [`Backend`] to compare their
//! running times and to check that they agree with each other.
//!
//! ```rust
//! # use tempus::Backend;
//! # use tempus::NetworkOptions;
//! # use tempus::TemporalNetworkManager;
//! let mut network = TemporalNetworkManager::with_options(NetworkOptions {
//!     backend: Backend::IncrementalBellmanFord,
//!     ..Default::default()
//! });
//! let boarding = network.new_time_point();
//! let departure = network.new_time_point();
//!
//! network.enforce_delay(boarding, departure, 15).expect("consistent");
//!
//! assert!(network.must_be_before(boarding, departure));
//! assert_eq!(network.lower_bound(boarding, departure), 15);
//! ```
pub use tempus_core::*;
