use log::trace;

use super::NetworkId;
use super::PropagationOutcome;
use super::TemporalNetwork;
use super::TimePoint;
use crate::math::normalise;
use crate::math::saturating_sum;
use crate::math::Time;
use crate::math::NEGATIVE_INFINITY;
use crate::math::POSITIVE_INFINITY;
use crate::tempus_assert_advanced;
use crate::tempus_assert_simple;

/// The number of additional time points for which a copy reserves storage.
const COPY_HEADROOM: usize = 4;

/// A dense simple temporal network storing the bounds between every pair of time points.
///
/// Only the pairs `(i, j)` with `i > j` are stored, since `L(i, j) = -U(j, i)`; the pair is found
/// at index `i * (i - 1) / 2 + j`. The index does not depend on the number of time points, so
/// adding a time point only appends its row.
///
/// The stored bounds are kept closed by incremental full path consistency: after each
/// [`DistanceGraph::enforce_interval`] on a consistent network, they are the all-pairs shortest
/// distances of every constraint added so far.
#[derive(Debug)]
pub struct DistanceGraph {
    network: NetworkId,
    num_time_points: usize,
    /// `lower[index(i, j)]` is `L(i, j)` for `i > j`
    lower: Vec<Time>,
    /// `upper[index(i, j)]` is `U(i, j)` for `i > j`
    upper: Vec<Time>,
    consistent: bool,
}

impl Default for DistanceGraph {
    fn default() -> Self {
        DistanceGraph::new()
    }
}

impl Clone for DistanceGraph {
    fn clone(&self) -> Self {
        let reserved = num_pairs(self.num_time_points + COPY_HEADROOM);

        let mut lower = Vec::with_capacity(reserved);
        lower.extend_from_slice(&self.lower);
        let mut upper = Vec::with_capacity(reserved);
        upper.extend_from_slice(&self.upper);

        DistanceGraph {
            network: self.network,
            num_time_points: self.num_time_points,
            lower,
            upper,
            consistent: self.consistent,
        }
    }
}

fn num_pairs(num_time_points: usize) -> usize {
    num_time_points * num_time_points.saturating_sub(1) / 2
}

fn triangular_index(i: usize, j: usize) -> usize {
    i * (i - 1) / 2 + j
}

impl DistanceGraph {
    pub fn new() -> DistanceGraph {
        DistanceGraph::with_capacity(0)
    }

    /// Creates an empty network with storage reserved for `num_time_points` time points.
    pub fn with_capacity(num_time_points: usize) -> DistanceGraph {
        DistanceGraph::for_network(NetworkId::fresh(), num_time_points)
    }

    pub(crate) fn for_network(network: NetworkId, num_time_points: usize) -> DistanceGraph {
        DistanceGraph {
            network,
            num_time_points: 0,
            lower: Vec::with_capacity(num_pairs(num_time_points)),
            upper: Vec::with_capacity(num_pairs(num_time_points)),
            consistent: true,
        }
    }

    /// Forces `from` to happen no later than `to`.
    pub fn enforce_before(&mut self, from: TimePoint, to: TimePoint) -> bool {
        self.enforce_interval(from, to, 0, POSITIVE_INFINITY)
    }

    /// Restricts `time(to) - time(from)` to `[min, max]` and propagates the consequences.
    ///
    /// Returns whether the network is consistent afterwards. When it is not, the network is
    /// permanently inconsistent and its bounds are no longer meaningful; use
    /// [`TemporalNetwork::try_enforce_interval`] to leave the network untouched instead.
    ///
    /// A constraint between a time point and itself is ignored.
    pub fn enforce_interval(
        &mut self,
        from: TimePoint,
        to: TimePoint,
        min: Time,
        max: Time,
    ) -> bool {
        self.check_time_point(from);
        self.check_time_point(to);

        if !self.consistent {
            return false;
        }
        if from == to {
            return true;
        }

        let _ = self.propagate(from.index(), to.index(), normalise(min), normalise(max));
        self.consistent
    }

    /// Returns whether `[min, max]` intersects the current bounds on `time(to) - time(from)`.
    ///
    /// On a closed consistent network this is exactly whether
    /// [`DistanceGraph::enforce_interval`] would keep the network consistent.
    pub fn is_interval_feasible(
        &self,
        from: TimePoint,
        to: TimePoint,
        min: Time,
        max: Time,
    ) -> bool {
        self.check_time_point(from);
        self.check_time_point(to);

        if !self.consistent {
            return false;
        }
        if from == to {
            return min <= 0 && 0 <= max;
        }

        let (from, to) = (from.index(), to.index());
        let lower = self.get_lower(from, to).max(normalise(min));
        let upper = self.get_upper(from, to).min(normalise(max));
        is_non_empty(lower, upper)
    }

    /// Overwrites the bounds between two distinct time points without propagating them.
    ///
    /// Only used to fill a network with bounds that are already closed.
    pub(crate) fn set_bounds(&mut self, from: TimePoint, to: TimePoint, lower: Time, upper: Time) {
        tempus_assert_simple!(from != to);
        self.set_lower(from.index(), to.index(), lower);
        self.set_upper(from.index(), to.index(), upper);
    }

    pub(crate) fn mark_inconsistent(&mut self) {
        self.consistent = false;
    }

    /// Incremental full path consistency for the new constraint `time(j) - time(i) ∈ [min, max]`.
    ///
    /// Returns the number of pairs whose bounds changed.
    fn propagate(&mut self, i: usize, j: usize, min: Time, max: Time) -> usize {
        let lower_ij = self.get_lower(i, j).max(min);
        let upper_ij = self.get_upper(i, j).min(max);

        if lower_ij == self.get_lower(i, j) && upper_ij == self.get_upper(i, j) {
            return 0;
        }
        if !is_non_empty(lower_ij, upper_ij) {
            trace!("tp{i} -> tp{j} became empty: [{lower_ij}, {upper_ij}]");
            self.consistent = false;
            return 0;
        }

        self.set_lower(i, j, lower_ij);
        self.set_upper(i, j, upper_ij);
        let mut num_changes = 1;

        // `into_j` holds the k whose bounds k -> j changed, `out_of_i` those whose i -> k changed
        let mut into_j = Vec::new();
        let mut out_of_i = Vec::new();

        for k in 0..self.num_time_points {
            if k == i || k == j {
                continue;
            }

            let lower_kj =
                saturating_sum(self.get_lower(k, i), lower_ij).max(self.get_lower(k, j));
            let upper_kj =
                saturating_sum(self.get_upper(k, i), upper_ij).min(self.get_upper(k, j));
            if self.update(k, j, lower_kj, upper_kj) {
                into_j.push(k);
            }

            let lower_ik =
                saturating_sum(lower_ij, self.get_lower(j, k)).max(self.get_lower(i, k));
            let upper_ik =
                saturating_sum(upper_ij, self.get_upper(j, k)).min(self.get_upper(i, k));
            if self.update(i, k, lower_ik, upper_ik) {
                out_of_i.push(k);
            }
        }
        num_changes += into_j.len() + out_of_i.len();

        for &a in &into_j {
            for &b in &out_of_i {
                if a == b {
                    continue;
                }

                let lower_ab = saturating_sum(self.get_lower(a, i), self.get_lower(i, b))
                    .max(self.get_lower(a, b));
                let upper_ab = saturating_sum(self.get_upper(a, i), self.get_upper(i, b))
                    .min(self.get_upper(a, b));
                if self.update(a, b, lower_ab, upper_ab) {
                    num_changes += 1;
                }
            }
        }

        trace!(
            "propagated tp{i} -> tp{j} in [{lower_ij}, {upper_ij}]: {} into tp{j}, {} out of tp{i}, {num_changes} changes",
            into_j.len(),
            out_of_i.len(),
        );
        tempus_assert_advanced!(self.is_closed(), "the network is not closed after propagation");

        num_changes
    }

    /// Stores new bounds for `(from, to)`, returning whether they differ from the current ones.
    fn update(&mut self, from: usize, to: usize, lower: Time, upper: Time) -> bool {
        if lower == self.get_lower(from, to) && upper == self.get_upper(from, to) {
            return false;
        }
        self.set_lower(from, to, lower);
        self.set_upper(from, to, upper);
        true
    }

    fn get_lower(&self, from: usize, to: usize) -> Time {
        match from.cmp(&to) {
            std::cmp::Ordering::Equal => 0,
            std::cmp::Ordering::Greater => self.lower[triangular_index(from, to)],
            std::cmp::Ordering::Less => -self.upper[triangular_index(to, from)],
        }
    }

    fn get_upper(&self, from: usize, to: usize) -> Time {
        match from.cmp(&to) {
            std::cmp::Ordering::Equal => 0,
            std::cmp::Ordering::Greater => self.upper[triangular_index(from, to)],
            std::cmp::Ordering::Less => -self.lower[triangular_index(to, from)],
        }
    }

    fn set_lower(&mut self, from: usize, to: usize, value: Time) {
        if from > to {
            self.lower[triangular_index(from, to)] = value;
        } else {
            self.upper[triangular_index(to, from)] = -value;
        }
    }

    fn set_upper(&mut self, from: usize, to: usize, value: Time) {
        if from > to {
            self.upper[triangular_index(from, to)] = value;
        } else {
            self.lower[triangular_index(to, from)] = -value;
        }
    }

    /// Whether no path between two time points implies a tighter bound than the stored one.
    fn is_closed(&self) -> bool {
        let n = self.num_time_points;
        (0..n).all(|i| {
            (0..n).all(|j| {
                (0..n).all(|k| {
                    self.get_upper(i, j)
                        <= saturating_sum(self.get_upper(i, k), self.get_upper(k, j))
                })
            })
        })
    }

    fn check_time_point(&self, time_point: TimePoint) {
        tempus_assert_simple!(
            time_point.network() == self.network,
            "{time_point} belongs to {}, not to {}",
            time_point.network(),
            self.network
        );
        tempus_assert_simple!(
            time_point.index() < self.num_time_points,
            "{time_point} does not belong to a network with {} time points",
            self.num_time_points
        );
    }
}

/// Whether `[lower, upper]` contains a finite value.
fn is_non_empty(lower: Time, upper: Time) -> bool {
    lower <= upper && lower < POSITIVE_INFINITY && upper > NEGATIVE_INFINITY
}

impl TemporalNetwork for DistanceGraph {
    fn network_id(&self) -> NetworkId {
        self.network
    }

    /// Adds a time point which is unconstrained with respect to every other time point.
    fn add_time_point(&mut self) -> TimePoint {
        let time_point = TimePoint::new(self.network, self.num_time_points as u32);

        self.lower
            .extend(std::iter::repeat(NEGATIVE_INFINITY).take(self.num_time_points));
        self.upper
            .extend(std::iter::repeat(POSITIVE_INFINITY).take(self.num_time_points));
        self.num_time_points += 1;

        time_point
    }

    fn num_time_points(&self) -> usize {
        self.num_time_points
    }

    fn lower_bound(&self, from: TimePoint, to: TimePoint) -> Time {
        self.check_time_point(from);
        self.check_time_point(to);
        self.get_lower(from.index(), to.index())
    }

    fn upper_bound(&self, from: TimePoint, to: TimePoint) -> Time {
        self.check_time_point(from);
        self.check_time_point(to);
        self.get_upper(from.index(), to.index())
    }

    fn try_enforce_interval(
        &mut self,
        from: TimePoint,
        to: TimePoint,
        min: Time,
        max: Time,
    ) -> PropagationOutcome {
        if !self.is_interval_feasible(from, to, min, max) {
            return PropagationOutcome::Infeasible;
        }
        if from == to {
            return PropagationOutcome::Redundant;
        }

        let (from, to) = (from.index(), to.index());
        match self.propagate(from, to, normalise(min), normalise(max)) {
            0 => PropagationOutcome::Redundant,
            num_changes => PropagationOutcome::Tightened { num_changes },
        }
    }

    fn is_consistent(&self) -> bool {
        self.consistent
    }

    fn boxed_clone(&self) -> Box<dyn TemporalNetwork> {
        Box::new(self.clone())
    }
}
