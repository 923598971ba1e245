/// The data structure which stores the bounds of a network and propagates new constraints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Backend {
    /// A triangular matrix of all pairwise bounds, kept closed by incremental full path
    /// consistency. Queries are O(1), copies are O(n²).
    #[default]
    DenseMatrix,
    /// Adjacency lists with an incrementally maintained potential function; infeasibility is
    /// detected as a negative cycle and undone through a trail. Copies are O(n + m), queries run
    /// Dijkstra over reduced costs.
    IncrementalBellmanFord,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::DenseMatrix => write!(f, "dense-matrix"),
            Backend::IncrementalBellmanFord => write!(f, "incremental-bellman-ford"),
        }
    }
}

/// Options for creating a [`crate::TemporalNetworkManager`].
#[derive(Clone, Copy, Debug)]
pub struct NetworkOptions {
    /// Which data structure holds the network.
    pub backend: Backend,
    /// The number of time points for which storage is reserved up-front.
    pub initial_capacity: usize,
}

impl Default for NetworkOptions {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            initial_capacity: 16,
        }
    }
}
