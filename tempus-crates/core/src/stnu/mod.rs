//! Simple temporal networks with uncertainty.
//!
//! Some durations of a plan are not chosen by the planner but by the environment, e.g. the time an
//! action takes to execute. Such a duration is a *contingent* link: the planner only knows that it
//! lies in `[min, max]`. The other constraints are *requirement* links, which the planner must
//! satisfy when scheduling.
//!
//! Full dynamic controllability is not checked. [`Stnu::is_pseudo_controllable`] is a cheap
//! necessary condition, suitable for pruning during search.
mod link;

use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::Deref;

pub use link::Link;
use log::debug;

use crate::basic_types::ConstraintOperationError;
use crate::math::normalise;
use crate::math::DisplayTime;
use crate::math::Time;
use crate::math::POSITIVE_INFINITY;
use crate::NetworkOptions;
use crate::TemporalNetworkManager;
use crate::TimePoint;

/// A [`TemporalNetworkManager`] which distinguishes contingent links from requirement links.
///
/// Both kinds of links are enforced on the underlying network; a link is only recorded if it
/// could be enforced. The queries of the underlying network are available through [`Deref`].
///
/// # Example
/// ```rust
/// # use tempus_core::stnu::Stnu;
/// let mut stnu = Stnu::new();
/// let start = stnu.new_time_point();
/// let end = stnu.new_time_point();
///
/// stnu.add_contingent_link(start, end, 3, 7)
///     .expect("the duration fits in the network");
/// assert!(stnu.is_pseudo_controllable());
///
/// // the plan now relies on the action ending within 5 time units
/// stnu.add_requirement_link(start, end, 0, 5)
///     .expect("the requirement is consistent");
/// assert!(stnu.is_consistent());
/// assert!(!stnu.is_pseudo_controllable());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Stnu {
    network: TemporalNetworkManager,
    requirement_links: Vec<Link>,
    contingent_links: Vec<Link>,
}

impl Stnu {
    pub fn new() -> Stnu {
        Stnu::default()
    }

    pub fn with_options(options: NetworkOptions) -> Stnu {
        Stnu {
            network: TemporalNetworkManager::with_options(options),
            requirement_links: Vec::new(),
            contingent_links: Vec::new(),
        }
    }

    pub fn new_time_point(&mut self) -> TimePoint {
        self.network.new_time_point()
    }

    /// Records that `time(target) - time(source)` is chosen by the environment in `[min, max]`
    /// and enforces it on the network.
    pub fn add_contingent_link(
        &mut self,
        source: TimePoint,
        target: TimePoint,
        min: Time,
        max: Time,
    ) -> Result<(), ConstraintOperationError> {
        self.network.enforce_constraint(source, target, min, max)?;
        self.contingent_links.push(normalised_link(source, target, min, max));
        Ok(())
    }

    /// Enforces `time(target) - time(source) ∈ [min, max]` as a requirement of the plan.
    pub fn add_requirement_link(
        &mut self,
        source: TimePoint,
        target: TimePoint,
        min: Time,
        max: Time,
    ) -> Result<(), ConstraintOperationError> {
        self.network.enforce_constraint(source, target, min, max)?;
        self.requirement_links.push(normalised_link(source, target, min, max));
        Ok(())
    }

    /// Same as [`Stnu::add_requirement_link`].
    pub fn enforce_constraint(
        &mut self,
        source: TimePoint,
        target: TimePoint,
        min: Time,
        max: Time,
    ) -> Result<(), ConstraintOperationError> {
        self.add_requirement_link(source, target, min, max)
    }

    /// Requires `source` to happen no later than `target`.
    pub fn enforce_before(
        &mut self,
        source: TimePoint,
        target: TimePoint,
    ) -> Result<(), ConstraintOperationError> {
        self.add_requirement_link(source, target, 0, POSITIVE_INFINITY)
    }

    pub fn requirement_links(&self) -> &[Link] {
        &self.requirement_links
    }

    pub fn contingent_links(&self) -> &[Link] {
        &self.contingent_links
    }

    /// Whether the network is consistent and no contingent link has been narrowed by
    /// propagation.
    ///
    /// If the bounds between the end points of a contingent link are tighter than the link, the
    /// plan relies on the environment choosing a duration in a range it never promised.
    pub fn is_pseudo_controllable(&self) -> bool {
        if !self.network.is_consistent() {
            return false;
        }

        self.contingent_links.iter().all(|link| {
            let lower = self.network.lower_bound(link.source, link.target);
            let upper = self.network.upper_bound(link.source, link.target);
            let intact = lower == link.min && upper == link.max;
            if !intact {
                debug!(
                    "contingent link {link} was squeezed to [{}, {}]",
                    DisplayTime(lower),
                    DisplayTime(upper)
                );
            }
            intact
        })
    }

    /// A copy of the network and its links which shares no state with this one.
    pub fn deep_copy(&self) -> Stnu {
        self.clone()
    }

    /// The underlying network.
    pub fn network(&self) -> &TemporalNetworkManager {
        &self.network
    }
}

/// Bounds beyond the infinite sentinels are recorded as the sentinels, as the network stores them.
fn normalised_link(source: TimePoint, target: TimePoint, min: Time, max: Time) -> Link {
    Link {
        source,
        target,
        min: normalise(min),
        max: normalise(max),
    }
}

impl Deref for Stnu {
    type Target = TemporalNetworkManager;

    fn deref(&self) -> &Self::Target {
        &self.network
    }
}

impl Display for Stnu {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for link in &self.contingent_links {
            writeln!(f, "contingent {link}")?;
        }
        for link in &self.requirement_links {
            writeln!(f, "requirement {link}")?;
        }
        write!(f, "{}", self.network)
    }
}
