//! Greedy descent: expand improving nodes only, stop at a local optimum.

use rand::rngs::StdRng;

use super::{SearchStrategy, StrategyContext};
use crate::types::TerminationReason;

/// Candidates are tried in discovery order (constant priority, so the
/// frontier's insertion tie-break takes over). Only nodes that improve the
/// incumbent get their neighborhood expanded; once the frontier drains, the
/// incumbent's evaluated neighborhood holds nothing better and the run
/// stops at a local optimum.
pub(crate) struct Greedy {
    patience: usize,
}

impl Greedy {
    pub fn new(patience: usize) -> Self {
        Self { patience }
    }
}

impl SearchStrategy for Greedy {
    fn priority(&mut self, _parent_norm: f64, _rng: &mut StdRng) -> f64 {
        0.0
    }

    fn accept(
        &mut self,
        improved: bool,
        _degradation: f64,
        _evaluations: usize,
        _rng: &mut StdRng,
    ) -> bool {
        improved
    }

    fn check_stop(&self, ctx: &StrategyContext) -> Option<TerminationReason> {
        if ctx.frontier_empty {
            return Some(TerminationReason::LocalOptimum);
        }
        if self.patience > 0 && ctx.since_improvement >= self.patience {
            return Some(TerminationReason::LocalOptimum);
        }
        None
    }
}
