//! Shared utilities for the integration tests of the temporal networks.
#![allow(
    dead_code,
    reason = "is used in integration tests but unable to find a way to silence these warnings"
)]

use std::path::PathBuf;
use std::process::Command;
use std::process::Output;
use std::process::Stdio;
use std::time::Duration;

use tempus::rand::rngs::SmallRng;
use tempus::rand::SeedableRng;
use tempus::Backend;
use tempus::NetworkOptions;
use tempus::Random;
use tempus::TemporalNetworkManager;
use tempus::Time;
use tempus::TimePoint;
use tempus::NEGATIVE_INFINITY;
use tempus::POSITIVE_INFINITY;
use wait_timeout::ChildExt;

pub(crate) const BACKENDS: [Backend; 2] = [Backend::DenseMatrix, Backend::IncrementalBellmanFord];

pub(crate) fn network_with(backend: Backend) -> TemporalNetworkManager {
    TemporalNetworkManager::with_options(NetworkOptions {
        backend,
        ..Default::default()
    })
}

/// A network together with its time points: the global start and end first, followed by
/// `num_time_points` fresh time points.
pub(crate) fn network_with_points(
    backend: Backend,
    num_time_points: usize,
) -> (TemporalNetworkManager, Vec<TimePoint>) {
    let mut network = network_with(backend);
    let mut time_points = vec![network.global_start(), network.global_end()];
    time_points.extend((0..num_time_points).map(|_| network.new_time_point()));
    (network, time_points)
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct RandomConstraint {
    pub(crate) from: usize,
    pub(crate) to: usize,
    pub(crate) min: Time,
    pub(crate) max: Time,
}

/// Constraints between the first `num_time_points` time points (global start and end included),
/// a fair share of which conflict with earlier ones.
pub(crate) fn random_constraints(
    num_time_points: usize,
    num_constraints: usize,
    seed: u64,
) -> Vec<RandomConstraint> {
    let mut random = SmallRng::seed_from_u64(seed);

    (0..num_constraints)
        .map(|_| {
            let from = random.generate_usize_in_range(0..num_time_points);
            let to = random.generate_usize_in_range(0..num_time_points);
            let min = random.generate_i32_in_range(-20, 20);
            let max = min + random.generate_i32_in_range(0, 30);
            RandomConstraint { from, to, min, max }
        })
        .collect()
}

/// A reference implementation of a manager's bounds: all-pairs shortest paths through
/// Floyd-Warshall, recomputed from scratch for every constraint.
///
/// Index 0 is the global start, index 1 the global end.
#[derive(Debug)]
pub(crate) struct ReferenceNetwork {
    num_time_points: usize,
    edges: Vec<(usize, usize, i64)>,
    distances: Vec<Vec<Option<i64>>>,
}

impl ReferenceNetwork {
    pub(crate) fn new(num_time_points: usize) -> ReferenceNetwork {
        let total = num_time_points + 2;
        let mut edges = vec![(1, 0, -1)];
        for time_point in 2..total {
            edges.push((time_point, 0, 0));
            edges.push((1, time_point, 0));
        }

        let distances = shortest_paths(total, &edges).expect("the initial network is consistent");

        ReferenceNetwork {
            num_time_points: total,
            edges,
            distances,
        }
    }

    /// Adds `time(to) - time(from) ∈ [min, max]` unless it makes the network inconsistent.
    pub(crate) fn try_add(&mut self, from: usize, to: usize, min: Time, max: Time) -> bool {
        if from == to {
            return min <= 0 && 0 <= max;
        }

        let mut edges = self.edges.clone();
        edges.push((from, to, max as i64));
        edges.push((to, from, -(min as i64)));

        match shortest_paths(self.num_time_points, &edges) {
            Some(distances) => {
                self.edges = edges;
                self.distances = distances;
                true
            }
            None => false,
        }
    }

    pub(crate) fn upper_bound(&self, from: usize, to: usize) -> Time {
        self.distances[from][to].map_or(POSITIVE_INFINITY, |distance| distance as Time)
    }

    pub(crate) fn lower_bound(&self, from: usize, to: usize) -> Time {
        self.distances[to][from].map_or(NEGATIVE_INFINITY, |distance| -distance as Time)
    }
}

/// Returns `None` if the edges contain a negative cycle.
fn shortest_paths(num_nodes: usize, edges: &[(usize, usize, i64)]) -> Option<Vec<Vec<Option<i64>>>> {
    let mut distances = vec![vec![None; num_nodes]; num_nodes];
    for (node, row) in distances.iter_mut().enumerate() {
        row[node] = Some(0);
    }
    for &(from, to, weight) in edges {
        if improves(distances[from][to], weight) {
            distances[from][to] = Some(weight);
        }
    }

    for k in 0..num_nodes {
        for i in 0..num_nodes {
            let Some(via_k) = distances[i][k] else {
                continue;
            };
            for j in 0..num_nodes {
                let Some(from_k) = distances[k][j] else {
                    continue;
                };
                let candidate = via_k + from_k;
                if improves(distances[i][j], candidate) {
                    distances[i][j] = Some(candidate);
                }
            }
        }
    }

    if (0..num_nodes).any(|node| distances[node][node].is_some_and(|distance| distance < 0)) {
        None
    } else {
        Some(distances)
    }
}

fn improves(current: Option<i64>, candidate: i64) -> bool {
    match current {
        Some(current) => candidate < current,
        None => true,
    }
}

pub(crate) fn run_bench(args: &[&str]) -> Output {
    const TEST_TIMEOUT: Duration = Duration::from_secs(60);

    let bench = PathBuf::from(env!("CARGO_BIN_EXE_tempus-bench"));

    let mut child = Command::new(bench)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .stdin(Stdio::null())
        .spawn()
        .expect("Failed to run tempus-bench.");

    match child.wait_timeout(TEST_TIMEOUT) {
        Ok(None) => {
            let _ = child.kill();
            panic!("tempus-bench took more than {} seconds", TEST_TIMEOUT.as_secs())
        }
        Ok(Some(_)) => {}
        Err(e) => panic!("error running tempus-bench: {e}"),
    }

    child
        .wait_with_output()
        .expect("Failed to collect the output of tempus-bench.")
}
