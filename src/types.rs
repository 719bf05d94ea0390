//! Core traits and record types for graph search.

use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;

/// Read-only adjacency relation over an opaque node type.
///
/// Nodes are candidate parameter settings; edges encode which settings a
/// search may step between. The engine never inspects node content — it
/// only uses identity (via `Eq`/`Hash`) and the adjacency queries below.
///
/// # Restrictions
///
/// The graph must not be mutated while a run is in progress, and the engine
/// treats it as read-only for the duration of a run. Behavior under mid-run
/// mutation is unspecified.
///
/// # Examples
///
/// ```
/// use graphopt::SearchGraph;
///
/// /// A ring of `n` integers where i is adjacent to i±1 (mod n).
/// struct Ring(usize);
///
/// impl SearchGraph for Ring {
///     type Node = usize;
///
///     fn neighbors(&self, &i: &usize) -> Vec<usize> {
///         vec![(i + 1) % self.0, (i + self.0 - 1) % self.0]
///     }
///
///     fn contains(&self, &i: &usize) -> bool {
///         i < self.0
///     }
///
///     fn nodes(&self) -> Vec<usize> {
///         (0..self.0).collect()
///     }
/// }
/// ```
pub trait SearchGraph {
    /// Opaque node identifier.
    type Node: Clone + Eq + Hash + Debug;

    /// All nodes adjacent to `node`.
    fn neighbors(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Whether `node` is part of the graph.
    fn contains(&self, node: &Self::Node) -> bool;

    /// Enumerates the graph's nodes for random-restart seeding.
    ///
    /// The default returns an empty list, which disables random restarts
    /// for graphs that cannot (or should not) enumerate themselves.
    fn nodes(&self) -> Vec<Self::Node> {
        Vec::new()
    }
}

/// Caller-supplied objective function.
///
/// Evaluation may be arbitrarily expensive — the engine invokes it at most
/// once per node per run. A failed evaluation is reported as `Err` with a
/// cause; failures are never cached as values.
///
/// Implemented for any `FnMut(&N) -> Result<f64, String>` closure.
///
/// # Restrictions
///
/// Non-deterministic (noisy) objectives are unsupported: the first observed
/// value for a node is cached and reused for the rest of the run.
pub trait Objective<N> {
    /// Computes the objective value of `node`.
    fn evaluate(&mut self, node: &N) -> Result<f64, String>;
}

impl<N, F> Objective<N> for F
where
    F: FnMut(&N) -> Result<f64, String>,
{
    fn evaluate(&mut self, node: &N) -> Result<f64, String> {
        self(node)
    }
}

/// One completed objective evaluation.
///
/// Created exactly once per distinct node per run; immutable afterwards.
#[derive(Debug, Clone)]
pub struct EvaluationRecord<N> {
    /// The evaluated node.
    pub node: N,

    /// Observed objective value.
    pub value: f64,

    /// Zero-based evaluation order index.
    pub index: usize,

    /// Wall-clock cost of the objective call.
    pub elapsed: Duration,
}

/// Why a run stopped. Not an error — every run ends with one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminationReason {
    /// No evaluated neighbor improved on the incumbent (greedy descent).
    LocalOptimum,

    /// The frontier drained with no restart policy able to refill it.
    FrontierExhausted,

    /// `max_evaluations` objective invocations were spent.
    BudgetExhausted,

    /// `max_time` elapsed.
    TimeLimit,

    /// The annealing temperature dropped to its floor.
    TemperatureFloor,

    /// The caller's cancellation flag was observed at a state boundary.
    Cancelled,
}
