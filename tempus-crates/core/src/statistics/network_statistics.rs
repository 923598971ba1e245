use crate::create_statistics_struct;
use crate::statistics::CumulativeMovingAverage;

create_statistics_struct!(
    /// Counters describing the work performed by a single temporal network.
    ///
    /// Copies of a network start with a copy of the statistics of their source.
    NetworkStatistics {
        /// The number of constraints which tightened at least one bound
        num_constraints_enforced: u64,
        /// The number of constraints which were already implied by the network
        num_redundant_constraints: u64,
        /// The number of constraints which were rejected as infeasible
        num_rejected_constraints: u64,
        /// The number of deep copies made of the network
        num_copies: u64,
        /// The number of times the network was rebuilt from scratch
        num_rebuilds: u64,
        /// The number of time points created, including the global start and end
        num_time_points: u64,
        /// The average number of pairwise bounds changed by a single propagation
        average_bounds_changed: CumulativeMovingAverage<u64>,
});
