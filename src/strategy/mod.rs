//! Search strategies behind one flat capability interface.
//!
//! Every strategy exposes the same four capabilities — propose a frontier
//! priority, accept or reject expansion of an evaluated node, signal a
//! restart, signal a stop — so the driver is strategy-agnostic.

mod annealing;
mod best_first;
mod greedy;
mod restart;

use rand::rngs::StdRng;

use crate::config::{SearchConfig, StrategyKind};
use crate::types::TerminationReason;

use annealing::Annealing;
use best_first::BestFirst;
use greedy::Greedy;
use restart::RandomRestart;

/// Snapshot of driver state the strategy may consult at a state boundary.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StrategyContext {
    pub frontier_empty: bool,
    pub evaluations: usize,
    pub since_improvement: usize,
}

/// Strategy capability set. All values the strategy sees are
/// direction-normalized: higher is better regardless of the configured
/// optimization direction.
pub(crate) trait SearchStrategy {
    /// Initial frontier priority for a candidate discovered from a parent
    /// whose normalized objective value is `parent_norm`.
    fn priority(&mut self, parent_norm: f64, rng: &mut StdRng) -> f64;

    /// Whether the just-evaluated node's neighborhood should be expanded.
    ///
    /// `degradation` is how much worse the node is than the incumbent, in
    /// objective units (0 when `improved`).
    fn accept(&mut self, improved: bool, degradation: f64, evaluations: usize, rng: &mut StdRng)
        -> bool;

    /// A termination reason, if the strategy considers the run finished.
    fn check_stop(&self, ctx: &StrategyContext) -> Option<TerminationReason>;

    /// Whether the driver should reseed from a random unvisited node.
    fn should_restart(&self, _ctx: &StrategyContext) -> bool {
        false
    }

    /// True when frontier priorities depend on evolving history and should
    /// be raised as better-evaluated neighbors appear (best-first).
    fn reprioritizes(&self) -> bool {
        false
    }
}

/// Builds the strategy for a validated configuration.
pub(crate) fn build(config: &SearchConfig) -> Box<dyn SearchStrategy> {
    from_kind(&config.strategy, config)
}

fn from_kind(kind: &StrategyKind, config: &SearchConfig) -> Box<dyn SearchStrategy> {
    match kind {
        StrategyKind::Greedy => Box::new(Greedy::new(config.patience)),
        StrategyKind::BestFirst => Box::new(BestFirst::new()),
        StrategyKind::Annealing => Box::new(Annealing::new(
            config.initial_temperature,
            config.min_temperature,
            config.cooling,
        )),
        StrategyKind::RandomRestart(inner) => Box::new(RandomRestart::new(
            from_kind(inner, config),
            config.restart_patience,
        )),
    }
}
