use super::DistanceGraph;
use super::NetworkId;
use super::TemporalNetwork;
use super::TimePoint;
use crate::containers::HashMap;
use crate::math::Time;
use crate::tempus_assert_simple;

/// The projection of a network onto a subset of its time points.
///
/// The bounds between the selected time points are those of the source network at the time of
/// extraction, i.e. the shortest path distances through the whole network. Later changes to the
/// source are not reflected. A subnetwork is read-only and is queried with the time points of the
/// source network.
#[derive(Clone, Debug)]
pub struct Subnetwork {
    source: NetworkId,
    graph: DistanceGraph,
    /// The time points of the source network, in the order of the local time points.
    time_points: Vec<TimePoint>,
    local_time_points: HashMap<TimePoint, TimePoint>,
}

impl Subnetwork {
    /// Copies the bounds between `time_points` out of `network`; duplicates are ignored.
    pub fn extract<Network: TemporalNetwork + ?Sized>(
        network: &Network,
        time_points: &[TimePoint],
    ) -> Subnetwork {
        let mut graph = DistanceGraph::with_capacity(time_points.len());
        let mut selected = Vec::with_capacity(time_points.len());
        let mut local_time_points = HashMap::default();

        for &time_point in time_points {
            if local_time_points.contains_key(&time_point) {
                continue;
            }
            let local = graph.add_time_point();
            let _ = local_time_points.insert(time_point, local);
            selected.push(time_point);
        }

        if !network.is_consistent() {
            graph.mark_inconsistent();
        }

        for (position, &a) in selected.iter().enumerate() {
            for &b in &selected[..position] {
                graph.set_bounds(
                    local_time_points[&a],
                    local_time_points[&b],
                    network.lower_bound(a, b),
                    network.upper_bound(a, b),
                );
            }
        }

        Subnetwork {
            source: network.network_id(),
            graph,
            time_points: selected,
            local_time_points,
        }
    }

    /// The selected time points, in the order in which they were first given.
    pub fn time_points(&self) -> &[TimePoint] {
        &self.time_points
    }

    pub fn contains(&self, time_point: TimePoint) -> bool {
        self.local_time_points.contains_key(&time_point)
    }

    pub fn is_consistent(&self) -> bool {
        self.graph.is_consistent()
    }

    /// The lower bound on `time(b) - time(a)`.
    pub fn lower_bound(&self, a: TimePoint, b: TimePoint) -> Time {
        self.graph.lower_bound(self.local(a), self.local(b))
    }

    /// The upper bound on `time(b) - time(a)`.
    pub fn upper_bound(&self, a: TimePoint, b: TimePoint) -> Time {
        self.graph.upper_bound(self.local(a), self.local(b))
    }

    /// Whether `a` can happen no later than `b`.
    pub fn can_be_before(&self, a: TimePoint, b: TimePoint) -> bool {
        self.upper_bound(a, b) >= 0
    }

    fn local(&self, time_point: TimePoint) -> TimePoint {
        tempus_assert_simple!(
            time_point.network() == self.source,
            "{time_point} belongs to {}, not to {}",
            time_point.network(),
            self.source
        );
        let local = self.local_time_points.get(&time_point).copied();
        tempus_assert_simple!(
            local.is_some(),
            "{time_point} is not part of the subnetwork"
        );
        local.unwrap_or(time_point)
    }
}
