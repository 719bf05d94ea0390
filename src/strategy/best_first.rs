//! Best-first: a pure priority-queue search over the frontier.

use rand::rngs::StdRng;

use super::{SearchStrategy, StrategyContext};
use crate::types::TerminationReason;

/// Frontier candidates are ordered by the best (direction-normalized)
/// objective value among their already-evaluated neighbors: at insertion the
/// discovering parent's value, raised whenever a better-evaluated neighbor
/// appears. Every evaluated node is expanded; there is no restart. The run
/// stops when the reachable frontier drains or an outer budget fires.
pub(crate) struct BestFirst;

impl BestFirst {
    pub fn new() -> Self {
        Self
    }
}

impl SearchStrategy for BestFirst {
    fn priority(&mut self, parent_norm: f64, _rng: &mut StdRng) -> f64 {
        parent_norm
    }

    fn accept(
        &mut self,
        _improved: bool,
        _degradation: f64,
        _evaluations: usize,
        _rng: &mut StdRng,
    ) -> bool {
        true
    }

    fn check_stop(&self, ctx: &StrategyContext) -> Option<TerminationReason> {
        if ctx.frontier_empty {
            Some(TerminationReason::FrontierExhausted)
        } else {
            None
        }
    }

    fn reprioritizes(&self) -> bool {
        true
    }
}
