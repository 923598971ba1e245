use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::collections::VecDeque;
use std::fmt::Display;
use std::fmt::Formatter;

use log::trace;

use super::NetworkId;
use super::PropagationOutcome;
use super::TemporalNetwork;
use super::TimePoint;
use crate::basic_types::Trail;
use crate::containers::HashSet;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::math::clamp_to_time;
use crate::math::is_finite;
use crate::math::normalise;
use crate::math::Time;
use crate::math::NEGATIVE_INFINITY;
use crate::math::POSITIVE_INFINITY;
use crate::tempus_assert_advanced;
use crate::tempus_assert_simple;

/// The node of the distance graph standing for the time point with the same index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Node(u32);

impl StorageKey for Node {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        Node(index as u32)
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "tp{}", self.0)
    }
}

/// The edge `source -> target` of weight `w` states `time(target) - time(source) <= w`.
#[derive(Clone, Copy, Debug)]
struct Edge {
    target: Node,
    weight: i64,
}

#[derive(Clone, Copy, Debug)]
enum TrailEntry {
    TimePointAdded,
    EdgeAdded { source: Node },
    EdgeTightened {
        source: Node,
        position: usize,
        previous_weight: i64,
    },
    PotentialChanged { node: Node, previous: i64 },
}

/// A simple temporal network stored as a distance graph with a potential function.
///
/// The potential is a solution of the network: for every edge `u -> v` of weight `w` it holds that
/// `potential(v) <= potential(u) + w`. Adding an edge only repairs the potential from the target of
/// the new edge onwards (Cesta and Oddi, 1996); when the repair reaches the source of the new edge,
/// the edge closes a negative cycle and every change is undone through the trail.
///
/// Bounds are not stored: they are shortest path distances, computed with Dijkstra's algorithm over
/// the reduced costs `w + potential(u) - potential(v)`, which the potential keeps non-negative.
#[derive(Clone, Debug)]
pub struct BellmanFordNetwork {
    network: NetworkId,
    outgoing: KeyedVec<Node, Vec<Edge>>,
    potential: KeyedVec<Node, i64>,
    trail: Trail<TrailEntry>,
}

impl Default for BellmanFordNetwork {
    fn default() -> Self {
        BellmanFordNetwork::with_capacity(0)
    }
}

impl BellmanFordNetwork {
    pub fn with_capacity(num_time_points: usize) -> BellmanFordNetwork {
        BellmanFordNetwork::for_network(NetworkId::fresh(), num_time_points)
    }

    pub(crate) fn for_network(network: NetworkId, num_time_points: usize) -> BellmanFordNetwork {
        BellmanFordNetwork {
            network,
            outgoing: KeyedVec::with_capacity(num_time_points),
            potential: KeyedVec::with_capacity(num_time_points),
            trail: Trail::default(),
        }
    }

    /// Opens a new checkpoint; [`BellmanFordNetwork::backtrack_to`] with the checkpoint which was
    /// current before this call undoes every change made after it, including the addition of
    /// time points.
    pub fn new_checkpoint(&mut self) {
        self.trail.new_checkpoint();
    }

    pub fn checkpoint(&self) -> usize {
        self.trail.get_checkpoint()
    }

    /// Restores the network to the state it had when `checkpoint` was current.
    ///
    /// Time points added since then no longer belong to the network.
    pub fn backtrack_to(&mut self, checkpoint: usize) {
        tempus_assert_simple!(
            checkpoint < self.trail.get_checkpoint(),
            "cannot backtrack from checkpoint {} to checkpoint {checkpoint}",
            self.trail.get_checkpoint()
        );

        for entry in self.trail.synchronise(checkpoint) {
            match entry {
                TrailEntry::TimePointAdded => {
                    let _ = self.outgoing.pop();
                    let _ = self.potential.pop();
                }
                TrailEntry::EdgeAdded { source } => {
                    let _ = self.outgoing[source].pop();
                }
                TrailEntry::EdgeTightened {
                    source,
                    position,
                    previous_weight,
                } => self.outgoing[source][position].weight = previous_weight,
                TrailEntry::PotentialChanged { node, previous } => self.potential[node] = previous,
            }
        }
    }

    pub fn num_edges(&self) -> usize {
        self.outgoing.iter().map(Vec::len).sum()
    }

    /// Adds the edge `source -> target`, returning the number of changes it caused or `None` if
    /// it closes a negative cycle.
    ///
    /// The changes made before detecting a negative cycle are only recorded on the trail; the
    /// caller has to undo them.
    fn add_edge(&mut self, source: Node, target: Node, weight: i64) -> Option<usize> {
        match self.outgoing[source]
            .iter()
            .position(|edge| edge.target == target)
        {
            Some(position) if self.outgoing[source][position].weight <= weight => return Some(0),
            Some(position) => {
                let edge = &mut self.outgoing[source][position];
                self.trail.push(TrailEntry::EdgeTightened {
                    source,
                    position,
                    previous_weight: edge.weight,
                });
                edge.weight = weight;
            }
            None => {
                self.outgoing[source].push(Edge { target, weight });
                self.trail.push(TrailEntry::EdgeAdded { source });
            }
        }

        let mut num_changes = 1;
        if self.potential[source] + weight >= self.potential[target] {
            return Some(num_changes);
        }

        self.set_potential(target, self.potential[source] + weight);
        num_changes += 1;

        let mut queue = VecDeque::from([target]);
        let mut pending: HashSet<Node> = HashSet::default();
        let _ = pending.insert(target);

        while let Some(node) = queue.pop_front() {
            let _ = pending.remove(&node);
            let node_potential = self.potential[node];

            for edge_index in 0..self.outgoing[node].len() {
                let edge = self.outgoing[node][edge_index];
                let candidate = node_potential + edge.weight;
                if candidate >= self.potential[edge.target] {
                    continue;
                }

                if edge.target == source {
                    trace!("{source} -> {target} closes a negative cycle");
                    return None;
                }

                self.set_potential(edge.target, candidate);
                num_changes += 1;
                if pending.insert(edge.target) {
                    queue.push_back(edge.target);
                }
            }
        }

        trace!("{source} -> {target} ({weight}) changed {num_changes} potentials and edges");
        Some(num_changes)
    }

    fn set_potential(&mut self, node: Node, value: i64) {
        self.trail.push(TrailEntry::PotentialChanged {
            node,
            previous: self.potential[node],
        });
        self.potential[node] = value;
    }

    /// The length of the shortest path from `from` to `to`, or `None` if there is no path.
    fn distance(&self, from: Node, to: Node) -> Option<i64> {
        if from == to {
            return Some(0);
        }

        let mut reduced_distance: KeyedVec<Node, Option<i64>> =
            KeyedVec::with_capacity(self.potential.len());
        for _ in self.potential.keys() {
            let _ = reduced_distance.push(None);
        }
        let mut settled = vec![false; self.potential.len()];

        let mut heap = BinaryHeap::new();
        reduced_distance[from] = Some(0);
        heap.push(Reverse((0_i64, from)));

        while let Some(Reverse((distance, node))) = heap.pop() {
            if settled[node.index()] {
                continue;
            }
            if node == to {
                // rdist(from, to) = dist(from, to) + potential(from) - potential(to)
                return Some(distance + self.potential[to] - self.potential[from]);
            }
            settled[node.index()] = true;

            for edge in &self.outgoing[node] {
                let reduced_cost =
                    edge.weight + self.potential[node] - self.potential[edge.target];
                let candidate = distance + reduced_cost;

                let improves = match reduced_distance[edge.target] {
                    Some(current) => candidate < current,
                    None => true,
                };
                if improves {
                    reduced_distance[edge.target] = Some(candidate);
                    heap.push(Reverse((candidate, edge.target)));
                }
            }
        }

        None
    }

    fn is_potential_feasible(&self) -> bool {
        self.outgoing.keys().all(|source| {
            self.outgoing[source].iter().all(|edge| {
                self.potential[edge.target] <= self.potential[source] + edge.weight
            })
        })
    }

    /// The node of `time_point`, which must have been created by this network.
    fn node(&self, time_point: TimePoint) -> Node {
        tempus_assert_simple!(
            time_point.network() == self.network,
            "{time_point} belongs to {}, not to {}",
            time_point.network(),
            self.network
        );
        tempus_assert_simple!(
            time_point.index() < self.potential.len(),
            "{time_point} does not belong to a network with {} time points",
            self.potential.len()
        );
        Node(time_point.id())
    }
}

impl TemporalNetwork for BellmanFordNetwork {
    fn network_id(&self) -> NetworkId {
        self.network
    }

    fn add_time_point(&mut self) -> TimePoint {
        let _ = self.potential.push(0);
        self.trail.push(TrailEntry::TimePointAdded);
        let node = self.outgoing.push(Vec::new());
        TimePoint::new(self.network, node.0)
    }

    fn num_time_points(&self) -> usize {
        self.potential.len()
    }

    fn lower_bound(&self, from: TimePoint, to: TimePoint) -> Time {
        self.distance(self.node(to), self.node(from))
            .map_or(NEGATIVE_INFINITY, |distance| clamp_to_time(-distance))
    }

    fn upper_bound(&self, from: TimePoint, to: TimePoint) -> Time {
        self.distance(self.node(from), self.node(to))
            .map_or(POSITIVE_INFINITY, clamp_to_time)
    }

    fn try_enforce_interval(
        &mut self,
        from: TimePoint,
        to: TimePoint,
        min: Time,
        max: Time,
    ) -> PropagationOutcome {
        let (from, to) = (self.node(from), self.node(to));

        let (min, max) = (normalise(min), normalise(max));
        if min > max || min >= POSITIVE_INFINITY || max <= NEGATIVE_INFINITY {
            return PropagationOutcome::Infeasible;
        }
        if from == to {
            return if min <= 0 && 0 <= max {
                PropagationOutcome::Redundant
            } else {
                PropagationOutcome::Infeasible
            };
        }

        let checkpoint = self.trail.get_checkpoint();
        self.trail.new_checkpoint();

        let mut num_changes = 0;
        let mut edges = Vec::with_capacity(2);
        if is_finite(max) {
            edges.push((from, to, i64::from(max)));
        }
        if is_finite(min) {
            edges.push((to, from, -i64::from(min)));
        }

        for (source, target, weight) in edges {
            match self.add_edge(source, target, weight) {
                Some(changes) => num_changes += changes,
                None => {
                    self.backtrack_to(checkpoint);
                    return PropagationOutcome::Infeasible;
                }
            }
        }

        self.trail.merge_into_previous_checkpoint();
        tempus_assert_advanced!(self.is_potential_feasible());

        if num_changes == 0 {
            PropagationOutcome::Redundant
        } else {
            PropagationOutcome::Tightened { num_changes }
        }
    }

    /// Always true: a constraint which would make the network inconsistent is undone before
    /// returning.
    fn is_consistent(&self) -> bool {
        true
    }

    fn boxed_clone(&self) -> Box<dyn TemporalNetwork> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network_with_points(num_time_points: usize) -> (BellmanFordNetwork, Vec<TimePoint>) {
        let mut network = BellmanFordNetwork::default();
        let points = (0..num_time_points)
            .map(|_| network.add_time_point())
            .collect();
        (network, points)
    }

    #[test]
    fn distances_follow_chains_of_edges() {
        let (mut network, points) = network_with_points(3);

        assert!(!network
            .try_enforce_interval(points[0], points[1], 2, 4)
            .is_infeasible());
        assert!(!network
            .try_enforce_interval(points[1], points[2], 1, 5)
            .is_infeasible());

        assert_eq!(network.lower_bound(points[0], points[2]), 3);
        assert_eq!(network.upper_bound(points[0], points[2]), 9);
        assert_eq!(network.lower_bound(points[2], points[0]), -9);
    }

    #[test]
    fn unconnected_time_points_are_unbounded() {
        let (mut network, points) = network_with_points(3);
        assert!(!network
            .try_enforce_interval(points[0], points[1], 0, POSITIVE_INFINITY)
            .is_infeasible());

        assert_eq!(network.upper_bound(points[0], points[1]), POSITIVE_INFINITY);
        assert_eq!(network.lower_bound(points[0], points[1]), 0);
        assert_eq!(network.lower_bound(points[0], points[2]), NEGATIVE_INFINITY);
    }

    #[test]
    fn negative_cycles_are_undone() {
        let (mut network, points) = network_with_points(3);
        assert!(!network
            .try_enforce_interval(points[0], points[1], 5, 10)
            .is_infeasible());
        assert!(!network
            .try_enforce_interval(points[1], points[2], 0, 10)
            .is_infeasible());
        let num_edges = network.num_edges();
        let potential = network.potential.clone();

        let outcome = network.try_enforce_interval(points[2], points[0], 0, 20);

        assert_eq!(outcome, PropagationOutcome::Infeasible);
        assert_eq!(network.num_edges(), num_edges);
        assert_eq!(network.potential, potential);
        assert_eq!(network.lower_bound(points[0], points[2]), 5);
        assert_eq!(network.checkpoint(), 0);
    }

    #[test]
    fn zero_length_cycles_are_accepted() {
        let (mut network, points) = network_with_points(2);

        assert!(!network
            .try_enforce_interval(points[0], points[1], 0, POSITIVE_INFINITY)
            .is_infeasible());
        assert!(!network
            .try_enforce_interval(points[1], points[0], 0, 100)
            .is_infeasible());

        assert_eq!(network.lower_bound(points[0], points[1]), 0);
        assert_eq!(network.upper_bound(points[0], points[1]), 0);
    }

    #[test]
    fn looser_edges_are_redundant() {
        let (mut network, points) = network_with_points(2);

        assert_eq!(
            network.try_enforce_interval(points[0], points[1], 1, 5),
            PropagationOutcome::Tightened { num_changes: 3 }
        );
        assert_eq!(
            network.try_enforce_interval(points[0], points[1], 0, 8),
            PropagationOutcome::Redundant
        );
        assert_eq!(network.num_edges(), 2);
    }

    #[test]
    fn backtracking_undoes_constraints_and_time_points() {
        let (mut network, points) = network_with_points(2);
        assert!(!network
            .try_enforce_interval(points[0], points[1], 0, 10)
            .is_infeasible());

        network.new_checkpoint();
        let added = network.add_time_point();
        assert!(!network
            .try_enforce_interval(points[0], points[1], 4, 6)
            .is_infeasible());
        assert!(!network
            .try_enforce_interval(points[1], added, 1, 1)
            .is_infeasible());
        assert_eq!(network.lower_bound(points[0], added), 5);

        network.backtrack_to(0);

        assert_eq!(network.num_time_points(), 2);
        assert_eq!(network.lower_bound(points[0], points[1]), 0);
        assert_eq!(network.upper_bound(points[0], points[1]), 10);
    }

    #[test]
    fn copies_are_independent() {
        let (mut network, points) = network_with_points(2);
        let mut copy = network.clone();

        assert!(!copy
            .try_enforce_interval(points[0], points[1], 1, 1)
            .is_infeasible());
        assert!(!network
            .try_enforce_interval(points[0], points[1], 4, 9)
            .is_infeasible());

        assert_eq!(copy.lower_bound(points[0], points[1]), 1);
        assert_eq!(network.lower_bound(points[0], points[1]), 4);
    }

    #[test]
    #[should_panic]
    fn time_points_of_other_networks_are_rejected() {
        let (network, _) = network_with_points(3);
        let (_, foreign) = network_with_points(3);

        let _ = network.upper_bound(foreign[0], foreign[2]);
    }

    #[test]
    #[should_panic]
    fn time_points_removed_by_backtracking_are_rejected() {
        let (mut network, points) = network_with_points(1);
        network.new_checkpoint();
        let added = network.add_time_point();
        network.backtrack_to(0);

        let _ = network.lower_bound(points[0], added);
    }

    #[test]
    fn impossible_self_constraints_are_infeasible() {
        let (mut network, points) = network_with_points(1);

        assert_eq!(
            network.try_enforce_interval(points[0], points[0], 1, 2),
            PropagationOutcome::Infeasible
        );
        assert_eq!(
            network.try_enforce_interval(points[0], points[0], -1, 2),
            PropagationOutcome::Redundant
        );
    }
}
