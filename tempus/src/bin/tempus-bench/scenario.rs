use std::hint::black_box;
use std::time::Duration;
use std::time::Instant;

use log::debug;
use tempus::NetworkOptions;
use tempus::Random;
use tempus::TemporalNetworkManager;
use tempus::Time;
use tempus::TimePoint;

/// Minimum durations of generated constraints are drawn from `[0, MIN_DURATION_RANGE)`.
const MIN_DURATION_RANGE: Time = 10;
/// Maximum durations of generated constraints are drawn from
/// `[MAX_DURATION_OFFSET, MAX_DURATION_OFFSET + MAX_DURATION_RANGE)`.
const MAX_DURATION_RANGE: Time = 1000;
const MAX_DURATION_OFFSET: Time = 3000;

/// A single step of a scenario. Time points are referred to by their insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Event {
    InsertTimePoint,
    InsertConstraint {
        from: usize,
        to: usize,
        min: Time,
        max: Time,
    },
    CheckConsistency {
        first: usize,
        second: usize,
    },
    DeepCopy,
}

#[derive(Clone, Copy, Debug)]
enum EventKind {
    InsertTimePoint,
    InsertConstraint,
    CheckConsistency,
    DeepCopy,
}

/// A fixed sequence of events, replayed identically on every backend.
#[derive(Clone, Debug)]
pub(crate) struct Scenario {
    pub(crate) id: usize,
    pub(crate) num_time_points: usize,
    pub(crate) num_constraints: usize,
    pub(crate) num_checks: usize,
    events: Vec<Event>,
}

/// The outcome of replaying a scenario on one backend.
#[derive(Debug)]
pub(crate) struct Replay {
    pub(crate) network: TemporalNetworkManager,
    /// The time points in insertion order.
    pub(crate) time_points: Vec<TimePoint>,
    /// For every constraint event, whether it was accepted.
    pub(crate) accepted: Vec<bool>,
    pub(crate) apply_time: Duration,
    pub(crate) copy_time: Duration,
}

impl Replay {
    pub(crate) fn num_rejected(&self) -> usize {
        self.accepted.iter().filter(|&&accepted| !accepted).count()
    }
}

impl Scenario {
    /// Generates a scenario with `num_time_points` time points, `density * n² / 10` constraints,
    /// `n²` consistency checks and `num_copies` deep copies, in a random order.
    ///
    /// Constraint and check events which occur before two time points exist are dropped, so the
    /// reported counts may be lower than requested.
    pub(crate) fn generate(
        id: usize,
        num_time_points: usize,
        density: usize,
        num_copies: usize,
        random: &mut impl Random,
    ) -> Scenario {
        let requested_constraints = density * num_time_points * num_time_points / 10;
        let requested_checks = num_time_points * num_time_points;

        let mut kinds = Vec::with_capacity(
            num_time_points + requested_constraints + requested_checks + num_copies,
        );
        kinds.extend(std::iter::repeat_n(EventKind::InsertTimePoint, num_time_points));
        kinds.extend(std::iter::repeat_n(
            EventKind::InsertConstraint,
            requested_constraints,
        ));
        kinds.extend(std::iter::repeat_n(
            EventKind::CheckConsistency,
            requested_checks,
        ));
        kinds.extend(std::iter::repeat_n(EventKind::DeepCopy, num_copies));
        random.shuffle(&mut kinds);

        let mut events = Vec::with_capacity(kinds.len());
        let mut num_inserted = 0;
        let mut num_constraints = 0;
        let mut num_checks = 0;

        for kind in kinds {
            match kind {
                EventKind::InsertTimePoint => {
                    num_inserted += 1;
                    events.push(Event::InsertTimePoint);
                }
                EventKind::InsertConstraint if num_inserted >= 2 => {
                    let (from, to) = distinct_ordered_pair(num_inserted, random);
                    let min = random.generate_i32_in_range(0, MIN_DURATION_RANGE - 1);
                    let max = MAX_DURATION_OFFSET
                        + random.generate_i32_in_range(0, MAX_DURATION_RANGE - 1);
                    num_constraints += 1;
                    events.push(Event::InsertConstraint { from, to, min, max });
                }
                EventKind::CheckConsistency if num_inserted >= 2 => {
                    let (first, second) = distinct_ordered_pair(num_inserted, random);
                    num_checks += 1;
                    events.push(Event::CheckConsistency { first, second });
                }
                EventKind::DeepCopy => events.push(Event::DeepCopy),
                EventKind::InsertConstraint | EventKind::CheckConsistency => {}
            }
        }

        Scenario {
            id,
            num_time_points,
            num_constraints,
            num_checks,
            events,
        }
    }

    #[cfg(test)]
    pub(crate) fn events(&self) -> &[Event] {
        &self.events
    }

    /// Replays the events on a fresh network created with `options`.
    ///
    /// Rejected constraints leave the network unchanged, so replay always runs to the end. The
    /// time spent on deep copies (including one final copy of the resulting network) is measured
    /// separately from the time spent on the other events.
    pub(crate) fn replay(&self, options: NetworkOptions) -> Replay {
        let mut network = TemporalNetworkManager::with_options(options);
        let mut time_points = Vec::with_capacity(self.num_time_points);
        let mut accepted = Vec::with_capacity(self.num_constraints);
        let mut apply_time = Duration::ZERO;
        let mut copy_time = Duration::ZERO;

        for event in &self.events {
            let start = Instant::now();
            match *event {
                Event::InsertTimePoint => time_points.push(network.new_time_point()),
                Event::InsertConstraint { from, to, min, max } => {
                    let result =
                        network.enforce_constraint(time_points[from], time_points[to], min, max);
                    accepted.push(result.is_ok());
                }
                Event::CheckConsistency { first, second } => {
                    let _ = black_box(network.is_consistent());
                    let _ = black_box(network.unordered(time_points[first], time_points[second]));
                }
                Event::DeepCopy => {
                    let _ = black_box(network.deep_copy());
                    copy_time += start.elapsed();
                    continue;
                }
            }
            apply_time += start.elapsed();
        }

        let start = Instant::now();
        let _ = black_box(network.deep_copy());
        copy_time += start.elapsed();

        debug!(
            "Replayed scenario {} on {} in {:?} (copies took {:?})",
            self.id,
            options.backend,
            apply_time,
            copy_time
        );

        Replay {
            network,
            time_points,
            accepted,
            apply_time,
            copy_time,
        }
    }
}

/// Picks `a < b` uniformly among the first `num_time_points` time points.
fn distinct_ordered_pair(num_time_points: usize, random: &mut impl Random) -> (usize, usize) {
    let a = random.generate_usize_in_range(0..num_time_points);
    let mut b = random.generate_usize_in_range(0..num_time_points - 1);
    if b >= a {
        b += 1;
    }
    (a.min(b), a.max(b))
}

#[cfg(test)]
mod tests {
    use tempus::rand::SeedableRng;
    use tempus::rand::rngs::SmallRng;
    use tempus::Backend;

    use super::*;

    #[test]
    fn generated_events_only_refer_to_inserted_time_points() {
        let mut random = SmallRng::seed_from_u64(7);
        let scenario = Scenario::generate(0, 12, 3, 2, &mut random);

        let mut num_inserted = 0;
        for event in scenario.events() {
            match *event {
                Event::InsertTimePoint => num_inserted += 1,
                Event::InsertConstraint { from, to, min, max } => {
                    assert!(from < to);
                    assert!(to < num_inserted);
                    assert!((0..MIN_DURATION_RANGE).contains(&min));
                    assert!(
                        (MAX_DURATION_OFFSET..MAX_DURATION_OFFSET + MAX_DURATION_RANGE)
                            .contains(&max)
                    );
                }
                Event::CheckConsistency { first, second } => {
                    assert!(first < second);
                    assert!(second < num_inserted);
                }
                Event::DeepCopy => {}
            }
        }

        assert_eq!(num_inserted, 12);
    }

    #[test]
    fn counts_match_the_generated_events() {
        let mut random = SmallRng::seed_from_u64(3);
        let scenario = Scenario::generate(4, 10, 2, 5, &mut random);

        let count = |predicate: fn(&Event) -> bool| {
            scenario.events().iter().filter(|event| predicate(event)).count()
        };

        assert_eq!(scenario.id, 4);
        assert_eq!(
            count(|event| matches!(event, Event::InsertConstraint { .. })),
            scenario.num_constraints
        );
        assert_eq!(
            count(|event| matches!(event, Event::CheckConsistency { .. })),
            scenario.num_checks
        );
        assert_eq!(count(|event| matches!(event, Event::DeepCopy)), 5);
        assert!(scenario.num_constraints <= 20);
        assert!(scenario.num_checks <= 100);
    }

    #[test]
    fn generation_is_deterministic_for_a_seed() {
        let first = Scenario::generate(0, 8, 4, 1, &mut SmallRng::seed_from_u64(11));
        let second = Scenario::generate(0, 8, 4, 1, &mut SmallRng::seed_from_u64(11));

        assert_eq!(first.events(), second.events());
    }

    #[test]
    fn backends_accept_the_same_constraints() {
        let mut random = SmallRng::seed_from_u64(42);
        let scenario = Scenario::generate(0, 15, 8, 3, &mut random);

        let dense = scenario.replay(NetworkOptions {
            backend: Backend::DenseMatrix,
            ..Default::default()
        });
        let incremental = scenario.replay(NetworkOptions {
            backend: Backend::IncrementalBellmanFord,
            ..Default::default()
        });

        assert_eq!(dense.accepted, incremental.accepted);
        assert_eq!(dense.accepted.len(), scenario.num_constraints);
        assert_eq!(dense.time_points.len(), 15);
        assert!(dense.network.is_consistent());
        assert!(incremental.network.is_consistent());

        // each replay creates its own time points; they correspond by position
        let pairs = dense
            .time_points
            .iter()
            .zip(&incremental.time_points)
            .collect::<Vec<_>>();
        for &(&dense_a, &incremental_a) in &pairs {
            for &(&dense_b, &incremental_b) in &pairs {
                assert_eq!(
                    dense.network.upper_bound(dense_a, dense_b),
                    incremental.network.upper_bound(incremental_a, incremental_b)
                );
            }
        }
        assert_ne!(dense.network.network_id(), incremental.network.network_id());
    }
}
