use super::ConstraintTag;
use super::TimePoint;
use crate::math::Time;

/// A constraint which was successfully added to a network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct LoggedConstraint {
    pub(crate) from: TimePoint,
    pub(crate) to: TimePoint,
    pub(crate) min: Time,
    pub(crate) max: Time,
    pub(crate) tag: Option<ConstraintTag>,
}

impl LoggedConstraint {
    pub(crate) fn mentions(&self, time_point: TimePoint) -> bool {
        self.from == time_point || self.to == time_point
    }

    pub(crate) fn is_between(&self, a: TimePoint, b: TimePoint) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

/// The constraints from which a network can be rebuilt, in the order in which they were added.
#[derive(Clone, Debug, Default)]
pub(crate) struct ConstraintLog {
    constraints: Vec<LoggedConstraint>,
}

impl ConstraintLog {
    pub(crate) fn push(&mut self, constraint: LoggedConstraint) {
        self.constraints.push(constraint);
    }

    pub(crate) fn len(&self) -> usize {
        self.constraints.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &LoggedConstraint> + '_ {
        self.constraints.iter()
    }

    /// Returns a log without the constraints matching `predicate`, together with the number of
    /// constraints which were dropped.
    pub(crate) fn without(&self, predicate: impl Fn(&LoggedConstraint) -> bool) -> (Self, usize) {
        let constraints = self
            .constraints
            .iter()
            .filter(|constraint| !predicate(constraint))
            .copied()
            .collect::<Vec<_>>();
        let num_dropped = self.constraints.len() - constraints.len();

        (ConstraintLog { constraints }, num_dropped)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use super::*;
    use crate::network::NetworkId;

    fn time_point(id: u32) -> TimePoint {
        static NETWORK: OnceLock<NetworkId> = OnceLock::new();
        TimePoint::new(*NETWORK.get_or_init(NetworkId::fresh), id)
    }

    fn constraint(from: u32, to: u32) -> LoggedConstraint {
        LoggedConstraint {
            from: time_point(from),
            to: time_point(to),
            min: 0,
            max: 10,
            tag: None,
        }
    }

    #[test]
    fn dropping_constraints_keeps_the_order_of_the_others() {
        let mut log = ConstraintLog::default();
        log.push(constraint(0, 1));
        log.push(constraint(1, 2));
        log.push(constraint(2, 3));

        let (remaining, num_dropped) = log.without(|c| c.from == time_point(1));

        assert_eq!(num_dropped, 1);
        assert_eq!(
            remaining.iter().copied().collect::<Vec<_>>(),
            vec![constraint(0, 1), constraint(2, 3)]
        );
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn constraints_between_two_points_ignore_direction() {
        assert!(constraint(4, 2).is_between(time_point(2), time_point(4)));
        assert!(!constraint(4, 2).is_between(time_point(2), time_point(3)));
    }
}
