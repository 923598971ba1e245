use std::fmt::Display;
use std::fmt::Formatter;
use std::num::NonZero;

use log::debug;
use log::info;
use log::warn;

use super::constraint_log::ConstraintLog;
use super::constraint_log::LoggedConstraint;
use super::create_network;
use super::Backend;
use super::ConstraintTag;
use super::NetworkId;
use super::NetworkOptions;
use super::PropagationOutcome;
use super::Subnetwork;
use super::TemporalNetwork;
use super::TimePoint;
use crate::basic_types::ConstraintOperationError;
use crate::math::DisplayTime;
use crate::math::Time;
use crate::math::NEGATIVE_INFINITY;
use crate::math::POSITIVE_INFINITY;
use crate::statistics::should_log_statistics;
use crate::statistics::MovingAverage;
use crate::statistics::NetworkStatistics;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;
use crate::tempus_assert_eq_simple;
use crate::tempus_assert_moderate;
use crate::tempus_assert_simple;

/// The temporal network of a partial plan.
///
/// The manager owns two special time points, the global start and end of the plan, and ensures
/// that every time point lies between them. Every fallible operation is atomic: when it returns an
/// error, the network is exactly as it was before the call.
///
/// # Example
/// ```rust
/// # use tempus_core::TemporalNetworkManager;
/// let mut network = TemporalNetworkManager::new();
/// let start_of_action = network.new_time_point();
/// let end_of_action = network.new_time_point();
///
/// network
///     .enforce_constraint(start_of_action, end_of_action, 5, 10)
///     .expect("the action can take between 5 and 10 time units");
/// network
///     .enforce_constraint(network.global_start(), start_of_action, 2, 2)
///     .expect("the action can start at time 2");
///
/// assert_eq!(network.earliest_time(end_of_action), 7);
/// assert_eq!(network.latest_time(end_of_action), 12);
/// assert!(network
///     .enforce_constraint(end_of_action, start_of_action, 0, 0)
///     .is_err());
/// ```
#[derive(Debug)]
pub struct TemporalNetworkManager {
    options: NetworkOptions,
    network: Box<dyn TemporalNetwork>,
    global_start: TimePoint,
    global_end: TimePoint,
    /// Indexed by time point; removed time points keep their index but are never handed out
    /// again.
    is_alive: Vec<bool>,
    constraints: ConstraintLog,
    next_constraint_tag: NonZero<u32>,
    statistics: NetworkStatistics,
}

impl Default for TemporalNetworkManager {
    fn default() -> Self {
        TemporalNetworkManager::new()
    }
}

impl Clone for TemporalNetworkManager {
    fn clone(&self) -> Self {
        let mut statistics = self.statistics;
        statistics.num_copies += 1;

        TemporalNetworkManager {
            options: self.options,
            network: self.network.boxed_clone(),
            global_start: self.global_start,
            global_end: self.global_end,
            is_alive: self.is_alive.clone(),
            constraints: self.constraints.clone(),
            next_constraint_tag: self.next_constraint_tag,
            statistics,
        }
    }
}

impl TemporalNetworkManager {
    pub fn new() -> TemporalNetworkManager {
        TemporalNetworkManager::with_options(NetworkOptions::default())
    }

    /// Creates a network containing only the global start and end, with the start strictly
    /// before the end.
    pub fn with_options(options: NetworkOptions) -> TemporalNetworkManager {
        let mut network = create_network(&options, NetworkId::fresh());
        let global_start = network.add_time_point();
        let global_end = network.add_time_point();
        let outcome = network.try_enforce_interval(global_start, global_end, 1, POSITIVE_INFINITY);
        tempus_assert_simple!(!outcome.is_infeasible());

        let mut statistics = NetworkStatistics::default();
        statistics.num_time_points = 2;

        TemporalNetworkManager {
            options,
            network,
            global_start,
            global_end,
            is_alive: vec![true, true],
            constraints: ConstraintLog::default(),
            next_constraint_tag: NonZero::<u32>::MIN,
            statistics,
        }
    }

    pub fn global_start(&self) -> TimePoint {
        self.global_start
    }

    pub fn global_end(&self) -> TimePoint {
        self.global_end
    }

    /// The identity shared by the time points of this network and of its copies.
    pub fn network_id(&self) -> NetworkId {
        self.network.network_id()
    }

    pub fn backend(&self) -> Backend {
        self.options.backend
    }

    /// Creates a time point which lies between the global start and end.
    pub fn new_time_point(&mut self) -> TimePoint {
        let time_point = self.network.add_time_point();
        self.is_alive.push(true);
        tempus_assert_eq_simple!(self.is_alive.len(), self.network.num_time_points());
        self.statistics.num_time_points += 1;

        let after_start = self.network.try_enforce_interval(
            self.global_start,
            time_point,
            0,
            POSITIVE_INFINITY,
        );
        let before_end =
            self.network
                .try_enforce_interval(time_point, self.global_end, 0, POSITIVE_INFINITY);
        tempus_assert_simple!(!after_start.is_infeasible() && !before_end.is_infeasible());

        time_point
    }

    /// A copy of the network which shares no state with this one.
    pub fn deep_copy(&self) -> TemporalNetworkManager {
        self.clone()
    }

    /// Whether the network admits a schedule; every operation keeps it consistent, so this only
    /// turns false if a backend reports so.
    pub fn is_consistent(&self) -> bool {
        self.network.is_consistent()
    }

    /// The number of time points which have not been removed, including the global start and end.
    pub fn num_time_points(&self) -> usize {
        self.is_alive.iter().filter(|alive| **alive).count()
    }

    /// The time points which have not been removed, in order of creation.
    pub fn time_points(&self) -> impl Iterator<Item = TimePoint> + '_ {
        let network = self.network_id();
        self.is_alive
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(index, _)| TimePoint::new(network, index as u32))
    }

    /// The number of constraints which have been enforced and not removed.
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn statistics(&self) -> &NetworkStatistics {
        &self.statistics
    }

    /// Writes the statistics of the network, if statistic logging has been configured.
    pub fn log_statistics(&self, statistic_logger: StatisticLogger) {
        if !should_log_statistics() {
            return;
        }
        self.statistics.log(statistic_logger);
    }

    /// Forces `a` to happen no later than `b`.
    pub fn enforce_before(
        &mut self,
        a: TimePoint,
        b: TimePoint,
    ) -> Result<(), ConstraintOperationError> {
        self.enforce(a, b, 0, POSITIVE_INFINITY, None)
    }

    /// Forces `a` to happen strictly before `b`.
    pub fn enforce_strictly_before(
        &mut self,
        a: TimePoint,
        b: TimePoint,
    ) -> Result<(), ConstraintOperationError> {
        self.enforce(a, b, 1, POSITIVE_INFINITY, None)
    }

    /// Forces `b` to happen at least `delay` time units after `a`.
    pub fn enforce_delay(
        &mut self,
        a: TimePoint,
        b: TimePoint,
        delay: Time,
    ) -> Result<(), ConstraintOperationError> {
        self.enforce(a, b, delay, POSITIVE_INFINITY, None)
    }

    /// Restricts `time(b) - time(a)` to `[min, max]`.
    ///
    /// If the constraint cannot hold together with the network, the network is left unchanged and
    /// [`ConstraintOperationError::InfeasibleConstraint`] is returned.
    pub fn enforce_constraint(
        &mut self,
        a: TimePoint,
        b: TimePoint,
        min: Time,
        max: Time,
    ) -> Result<(), ConstraintOperationError> {
        self.enforce(a, b, min, max, None)
    }

    /// As [`TemporalNetworkManager::enforce_constraint`], remembering `tag` so that the
    /// constraint can later be removed with
    /// [`TemporalNetworkManager::remove_constraints_with_tag`].
    pub fn enforce_tagged_constraint(
        &mut self,
        a: TimePoint,
        b: TimePoint,
        min: Time,
        max: Time,
        tag: ConstraintTag,
    ) -> Result<(), ConstraintOperationError> {
        self.enforce(a, b, min, max, Some(tag))
    }

    /// Fixes the time of `time_point`, relative to the global start.
    pub fn set_time(
        &mut self,
        time_point: TimePoint,
        time: Time,
    ) -> Result<(), ConstraintOperationError> {
        self.enforce(self.global_start, time_point, time, time, None)
    }

    fn enforce(
        &mut self,
        a: TimePoint,
        b: TimePoint,
        min: Time,
        max: Time,
        tag: Option<ConstraintTag>,
    ) -> Result<(), ConstraintOperationError> {
        self.check_time_point(a);
        self.check_time_point(b);

        match self.network.try_enforce_interval(a, b, min, max) {
            PropagationOutcome::Infeasible => {
                debug!(
                    "rejected {a} -> {b}: [{}, {}]",
                    DisplayTime(min),
                    DisplayTime(max)
                );
                self.statistics.num_rejected_constraints += 1;
                return Err(ConstraintOperationError::InfeasibleConstraint);
            }
            PropagationOutcome::Redundant => {
                self.statistics.num_redundant_constraints += 1;
            }
            PropagationOutcome::Tightened { num_changes } => {
                debug!(
                    "enforced {a} -> {b}: [{}, {}]",
                    DisplayTime(min),
                    DisplayTime(max)
                );
                self.statistics.num_constraints_enforced += 1;
                self.statistics
                    .average_bounds_changed
                    .add_term(num_changes as u64);
            }
        }

        self.constraints.push(LoggedConstraint {
            from: a,
            to: b,
            min,
            max,
            tag,
        });
        Ok(())
    }

    /// The lower bound on `time(b) - time(a)`.
    pub fn lower_bound(&self, a: TimePoint, b: TimePoint) -> Time {
        self.check_time_point(a);
        self.check_time_point(b);
        self.network.lower_bound(a, b)
    }

    /// The upper bound on `time(b) - time(a)`.
    pub fn upper_bound(&self, a: TimePoint, b: TimePoint) -> Time {
        self.check_time_point(a);
        self.check_time_point(b);
        self.network.upper_bound(a, b)
    }

    /// Whether `a` can happen no later than `b`.
    pub fn can_be_before(&self, a: TimePoint, b: TimePoint) -> bool {
        self.upper_bound(a, b) >= 0
    }

    /// Whether `a` can happen strictly before `b`.
    pub fn can_be_strictly_before(&self, a: TimePoint, b: TimePoint) -> bool {
        self.upper_bound(a, b) >= 1
    }

    /// Whether `a` happens no later than `b` in every schedule.
    pub fn must_be_before(&self, a: TimePoint, b: TimePoint) -> bool {
        self.lower_bound(a, b) >= 0
    }

    /// Whether either of `a` and `b` can happen strictly before the other.
    pub fn unordered(&self, a: TimePoint, b: TimePoint) -> bool {
        self.can_be_strictly_before(a, b) && self.can_be_strictly_before(b, a)
    }

    /// Whether [`TemporalNetworkManager::enforce_constraint`] with the same arguments would
    /// succeed; the network is not modified.
    pub fn is_constraint_possible(
        &self,
        a: TimePoint,
        b: TimePoint,
        min: Time,
        max: Time,
    ) -> bool {
        let lower = self.lower_bound(a, b).max(min);
        let upper = self.upper_bound(a, b).min(max);
        lower <= upper && lower < POSITIVE_INFINITY && upper > NEGATIVE_INFINITY
    }

    /// The earliest time at which `time_point` can happen, relative to the global start.
    pub fn earliest_time(&self, time_point: TimePoint) -> Time {
        self.lower_bound(self.global_start, time_point)
    }

    /// The latest time at which `time_point` can happen, relative to the global start.
    pub fn latest_time(&self, time_point: TimePoint) -> Time {
        self.upper_bound(self.global_start, time_point)
    }

    /// Builds the network over `time_points` whose bounds are the bounds of this network.
    pub fn extract_subnetwork(&self, time_points: &[TimePoint]) -> Subnetwork {
        for &time_point in time_points {
            self.check_time_point(time_point);
        }
        Subnetwork::extract(self.network.as_ref(), time_points)
    }

    /// Creates a tag which is distinct from the tags handed out before by this network (or by the
    /// network it was copied from, before the copy).
    pub fn new_constraint_tag(&mut self) -> ConstraintTag {
        let tag = ConstraintTag::from_non_zero(self.next_constraint_tag);
        self.next_constraint_tag = self.next_constraint_tag.saturating_add(1);
        tag
    }

    /// Removes every constraint enforced with `tag` and rebuilds the network from the remaining
    /// ones.
    pub fn remove_constraints_with_tag(&mut self, tag: ConstraintTag) {
        let (constraints, num_removed) = self
            .constraints
            .without(|constraint| constraint.tag == Some(tag));

        if num_removed == 0 {
            warn!("no constraint is tagged with {tag:?}, nothing is removed");
            return;
        }

        info!("rebuilding the network without the {num_removed} constraints tagged {tag:?}");
        self.rebuild_after_removal(constraints);
    }

    /// Removes `time_point` together with every constraint mentioning it; the network is rebuilt
    /// from the remaining constraints.
    ///
    /// The time point can no longer be used with this network. Its index is not reused.
    pub fn remove_time_point(&mut self, time_point: TimePoint) {
        self.check_time_point(time_point);
        tempus_assert_simple!(
            time_point != self.global_start && time_point != self.global_end,
            "the global start and end cannot be removed"
        );

        let (constraints, num_removed) = self
            .constraints
            .without(|constraint| constraint.mentions(time_point));
        self.is_alive[time_point.index()] = false;

        info!("rebuilding the network without {time_point} and its {num_removed} constraints");
        self.rebuild_after_removal(constraints);
    }

    /// Replaces every constraint between `a` and `b` (in either direction) by `time(b) - time(a)
    /// ∈ [min, max]` and rebuilds the network.
    ///
    /// This allows loosening a constraint, e.g. when the observed duration of an action exceeds
    /// the duration it was planned with. If the resulting network is infeasible, the network is
    /// left unchanged.
    pub fn override_constraint(
        &mut self,
        a: TimePoint,
        b: TimePoint,
        min: Time,
        max: Time,
    ) -> Result<(), ConstraintOperationError> {
        self.check_time_point(a);
        self.check_time_point(b);

        let (mut constraints, num_removed) =
            self.constraints.without(|constraint| constraint.is_between(a, b));
        constraints.push(LoggedConstraint {
            from: a,
            to: b,
            min,
            max,
            tag: None,
        });

        info!(
            "rebuilding the network with {a} -> {b}: [{}, {}] replacing {num_removed} constraints",
            DisplayTime(min),
            DisplayTime(max)
        );
        let network = self.replay(&constraints).inspect_err(|_| {
            debug!("overriding {a} -> {b} is infeasible, the network is kept");
            self.statistics.num_rejected_constraints += 1;
        })?;

        self.install(network, constraints);
        Ok(())
    }

    fn rebuild_after_removal(&mut self, constraints: ConstraintLog) {
        let network = self.replay(&constraints);
        tempus_assert_simple!(
            network.is_ok(),
            "removing constraints made the network infeasible"
        );

        if let Ok(network) = network {
            self.install(network, constraints);
        }
    }

    fn install(&mut self, network: Box<dyn TemporalNetwork>, constraints: ConstraintLog) {
        self.network = network;
        self.constraints = constraints;
        self.statistics.num_rebuilds += 1;

        tempus_assert_moderate!(
            self.time_points()
                .all(|time_point| self.network.lower_bound(self.global_start, time_point) >= 0),
            "the rebuilt network lets a time point happen before the global start"
        );
    }

    /// Builds a new network with the same time points, containing `constraints`.
    fn replay(
        &self,
        constraints: &ConstraintLog,
    ) -> Result<Box<dyn TemporalNetwork>, ConstraintOperationError> {
        let mut network = create_network(&self.options, self.network_id());
        for _ in 0..self.is_alive.len() {
            let _ = network.add_time_point();
        }

        let _ = network.try_enforce_interval(
            self.global_start,
            self.global_end,
            1,
            POSITIVE_INFINITY,
        );
        for time_point in self.time_points() {
            if time_point == self.global_start || time_point == self.global_end {
                continue;
            }
            let _ =
                network.try_enforce_interval(self.global_start, time_point, 0, POSITIVE_INFINITY);
            let _ =
                network.try_enforce_interval(time_point, self.global_end, 0, POSITIVE_INFINITY);
        }

        for constraint in constraints.iter() {
            let outcome = network.try_enforce_interval(
                constraint.from,
                constraint.to,
                constraint.min,
                constraint.max,
            );
            if outcome.is_infeasible() {
                return Err(ConstraintOperationError::InfeasibleConstraint);
            }
        }

        Ok(network)
    }

    fn check_time_point(&self, time_point: TimePoint) {
        tempus_assert_simple!(
            time_point.network() == self.network_id(),
            "{time_point} belongs to {}, not to {}",
            time_point.network(),
            self.network_id()
        );
        tempus_assert_simple!(
            time_point.index() < self.is_alive.len() && self.is_alive[time_point.index()],
            "{time_point} does not belong to this network or has been removed"
        );
    }
}

impl Display for TemporalNetworkManager {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "temporal network ({}) with {} time points and {} constraints",
            self.options.backend,
            self.num_time_points(),
            self.constraints.len()
        )?;

        let time_points = self.time_points().collect::<Vec<_>>();
        for (position, &a) in time_points.iter().enumerate() {
            for &b in &time_points[position + 1..] {
                let lower = self.network.lower_bound(a, b);
                let upper = self.network.upper_bound(a, b);
                if lower <= NEGATIVE_INFINITY && upper >= POSITIVE_INFINITY {
                    continue;
                }
                writeln!(f, "{a} -> {b}: [{}, {}]", DisplayTime(lower), DisplayTime(upper))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn managers() -> Vec<TemporalNetworkManager> {
        [Backend::DenseMatrix, Backend::IncrementalBellmanFord]
            .into_iter()
            .map(|backend| {
                TemporalNetworkManager::with_options(NetworkOptions {
                    backend,
                    ..Default::default()
                })
            })
            .collect()
    }

    #[test]
    fn global_start_is_strictly_before_global_end() {
        for network in managers() {
            assert_eq!(network.earliest_time(network.global_start()), 0);
            assert_eq!(network.earliest_time(network.global_end()), 1);
            assert!(network.must_be_before(network.global_start(), network.global_end()));
            assert!(!network.can_be_before(network.global_end(), network.global_start()));
        }
    }

    #[test]
    fn new_time_points_lie_between_start_and_end() {
        for mut network in managers() {
            let time_point = network.new_time_point();

            assert!(network.must_be_before(network.global_start(), time_point));
            assert!(network.must_be_before(time_point, network.global_end()));
            assert_eq!(network.latest_time(time_point), POSITIVE_INFINITY);
        }
    }

    #[test]
    fn rejected_constraints_leave_the_network_unchanged() {
        for mut network in managers() {
            let a = network.new_time_point();
            let b = network.new_time_point();
            network.enforce_constraint(a, b, 3, 8).expect("consistent");
            let report = network.to_string();

            let result = network.enforce_constraint(b, a, 0, 10);

            assert_eq!(result, Err(ConstraintOperationError::InfeasibleConstraint));
            assert_eq!(network.to_string(), report);
            assert_eq!(network.num_constraints(), 1);
            assert_eq!(network.statistics().num_rejected_constraints, 1);
        }
    }

    #[test]
    fn self_constraints_are_checked_against_zero() {
        for mut network in managers() {
            let a = network.new_time_point();

            assert!(network.enforce_constraint(a, a, -1, 1).is_ok());
            assert!(network.enforce_constraint(a, a, 1, 2).is_err());
        }
    }

    #[test]
    fn ordering_queries() {
        for mut network in managers() {
            let a = network.new_time_point();
            let b = network.new_time_point();
            let c = network.new_time_point();
            network.enforce_strictly_before(a, b).expect("consistent");
            network.enforce_before(a, c).expect("consistent");

            assert!(network.must_be_before(a, b));
            assert!(!network.can_be_before(b, a));
            assert!(network.unordered(b, c));
            assert!(!network.unordered(a, c));
            assert!(network.can_be_before(c, a));
            assert!(!network.can_be_strictly_before(c, a));
        }
    }

    #[test]
    fn constraint_possibility_does_not_modify_the_network() {
        for mut network in managers() {
            let a = network.new_time_point();
            let b = network.new_time_point();
            network.enforce_delay(a, b, 5).expect("consistent");

            assert!(network.is_constraint_possible(a, b, 0, 5));
            assert!(!network.is_constraint_possible(a, b, 0, 4));
            assert_eq!(network.upper_bound(a, b), POSITIVE_INFINITY);
        }
    }

    #[test]
    fn set_time_fixes_both_bounds() {
        for mut network in managers() {
            let a = network.new_time_point();
            network.set_time(a, 42).expect("consistent");

            assert_eq!(network.earliest_time(a), 42);
            assert_eq!(network.latest_time(a), 42);
            assert_eq!(network.earliest_time(network.global_end()), 42);
        }
    }

    #[test]
    fn removing_tagged_constraints_loosens_the_network() {
        for mut network in managers() {
            let a = network.new_time_point();
            let b = network.new_time_point();
            let tag = network.new_constraint_tag();
            network.enforce_constraint(a, b, 0, 10).expect("consistent");
            network
                .enforce_tagged_constraint(a, b, 4, 6, tag)
                .expect("consistent");

            network.remove_constraints_with_tag(tag);

            assert_eq!(network.lower_bound(a, b), 0);
            assert_eq!(network.upper_bound(a, b), 10);
            assert_eq!(network.num_constraints(), 1);
            assert_eq!(network.statistics().num_rebuilds, 1);
        }
    }

    #[test]
    fn removing_an_unused_tag_does_not_rebuild() {
        for mut network in managers() {
            let tag = network.new_constraint_tag();

            network.remove_constraints_with_tag(tag);

            assert_eq!(network.statistics().num_rebuilds, 0);
        }
    }

    #[test]
    fn tags_are_distinct() {
        let mut network = TemporalNetworkManager::new();

        assert_ne!(network.new_constraint_tag(), network.new_constraint_tag());
    }

    #[test]
    fn removed_time_points_no_longer_constrain_others() {
        for mut network in managers() {
            let a = network.new_time_point();
            let b = network.new_time_point();
            let c = network.new_time_point();
            network.enforce_constraint(a, b, 5, 5).expect("consistent");
            network.enforce_constraint(b, c, 5, 5).expect("consistent");

            network.remove_time_point(b);

            assert_eq!(network.num_time_points(), 4);
            assert_eq!(network.lower_bound(a, c), NEGATIVE_INFINITY);
            assert!(!network.time_points().any(|time_point| time_point == b));

            let d = network.new_time_point();
            assert_ne!(d, b);
        }
    }

    #[test]
    #[should_panic]
    fn removed_time_points_cannot_be_used() {
        let mut network = TemporalNetworkManager::new();
        let a = network.new_time_point();
        network.remove_time_point(a);

        let _ = network.earliest_time(a);
    }

    #[test]
    #[should_panic]
    fn time_points_of_another_manager_are_rejected() {
        let mut first = TemporalNetworkManager::new();
        let foreign = first.new_time_point();
        first.set_time(foreign, 50).expect("consistent");
        let mut second = TemporalNetworkManager::new();
        let _ = second.new_time_point();

        let _ = second.earliest_time(foreign);
    }

    #[test]
    #[should_panic]
    fn time_points_of_another_manager_cannot_be_constrained() {
        let mut first = TemporalNetworkManager::with_options(NetworkOptions {
            backend: Backend::IncrementalBellmanFord,
            ..Default::default()
        });
        let foreign = first.new_time_point();
        let mut second = TemporalNetworkManager::with_options(NetworkOptions {
            backend: Backend::IncrementalBellmanFord,
            ..Default::default()
        });
        let local = second.new_time_point();

        let _ = second.enforce_before(local, foreign);
    }

    #[test]
    fn copies_and_rebuilds_keep_the_identity_of_the_network() {
        for mut network in managers() {
            let a = network.new_time_point();
            let b = network.new_time_point();
            let tag = network.new_constraint_tag();
            network
                .enforce_tagged_constraint(a, b, 1, 2, tag)
                .expect("consistent");

            let mut copy = network.deep_copy();
            copy.remove_constraints_with_tag(tag);
            let c = copy.new_time_point();

            assert_eq!(copy.network_id(), network.network_id());
            assert_eq!(c.network(), a.network());
            assert!(copy.enforce_constraint(a, c, 3, 4).is_ok());
            assert_eq!(copy.time_points().collect::<Vec<_>>()[2..], [a, b, c]);
            assert_ne!(TemporalNetworkManager::new().network_id(), network.network_id());
        }
    }

    #[test]
    #[should_panic]
    fn the_global_start_cannot_be_removed() {
        let mut network = TemporalNetworkManager::new();
        let start = network.global_start();

        network.remove_time_point(start);
    }

    #[test]
    fn overriding_replaces_constraints_in_both_directions() {
        for mut network in managers() {
            let a = network.new_time_point();
            let b = network.new_time_point();
            network.enforce_constraint(a, b, 5, 10).expect("consistent");
            network.enforce_constraint(b, a, -8, -6).expect("consistent");

            network.override_constraint(a, b, 12, 12).expect("consistent");

            assert_eq!(network.lower_bound(a, b), 12);
            assert_eq!(network.upper_bound(a, b), 12);
            assert_eq!(network.num_constraints(), 1);
        }
    }

    #[test]
    fn infeasible_overrides_keep_the_network() {
        for mut network in managers() {
            let a = network.new_time_point();
            let b = network.new_time_point();
            let c = network.new_time_point();
            network.enforce_constraint(a, b, 5, 10).expect("consistent");
            network.enforce_constraint(b, c, 0, 0).expect("consistent");
            network.enforce_constraint(a, c, 5, 7).expect("consistent");

            let result = network.override_constraint(a, b, 20, 20);

            assert_eq!(result, Err(ConstraintOperationError::InfeasibleConstraint));
            assert_eq!(network.lower_bound(a, b), 5);
            assert_eq!(network.upper_bound(a, b), 7);
            assert_eq!(network.num_constraints(), 3);
        }
    }

    #[test]
    fn copies_count_themselves() {
        let network = TemporalNetworkManager::new();

        let copy = network.deep_copy().deep_copy();

        assert_eq!(copy.statistics().num_copies, 2);
        assert_eq!(network.statistics().num_copies, 0);
    }

    #[test]
    fn report_lists_bounded_pairs() {
        let mut network = TemporalNetworkManager::new();
        let a = network.new_time_point();
        network.set_time(a, 3).expect("consistent");

        let report = network.to_string();

        assert!(report.starts_with(
            "temporal network (dense-matrix) with 3 time points and 1 constraints"
        ));
        assert!(report.contains("tp0 -> tp2: [3, 3]"));
        assert!(report.contains("tp0 -> tp1: [3, +inf]"));
    }
}
