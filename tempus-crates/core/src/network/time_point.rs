use std::fmt::Display;
use std::fmt::Formatter;
use std::num::NonZero;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;

static NEXT_NETWORK_ID: AtomicU32 = AtomicU32::new(1);

/// Identifies a network together with every copy made of it.
///
/// Copies share the identity of their source, so that the time points created before the copy
/// remain valid in both.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NetworkId(NonZero<u32>);

impl NetworkId {
    /// An identity which no other network created by this process has.
    pub(crate) fn fresh() -> NetworkId {
        let id = NEXT_NETWORK_ID.fetch_add(1, Ordering::Relaxed);
        NetworkId(NonZero::new(id).unwrap_or(NonZero::<u32>::MAX))
    }
}

impl Display for NetworkId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "network {}", self.0)
    }
}

/// An event of a plan whose absolute time is unknown.
///
/// A time point is an index into the network which created it (or a copy of that network); it
/// carries no meaning beyond its identity. Two time points are equal if they have the same index
/// in the same network. Using a time point with any other network panics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimePoint {
    network: NetworkId,
    id: u32,
}

impl TimePoint {
    pub(crate) fn new(network: NetworkId, id: u32) -> TimePoint {
        TimePoint { network, id }
    }

    /// The position of the time point in its network; time points are numbered consecutively in
    /// order of creation.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The network which created the time point.
    pub fn network(&self) -> NetworkId {
        self.network
    }

    pub(crate) fn index(&self) -> usize {
        self.id as usize
    }
}

impl Display for TimePoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "tp{}", self.id)
    }
}
