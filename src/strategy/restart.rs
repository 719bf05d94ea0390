//! Random restart: wraps an inner strategy and reseeds on local exhaustion.

use rand::rngs::StdRng;

use super::{SearchStrategy, StrategyContext};
use crate::types::TerminationReason;

/// Delegates priority, acceptance, and reprioritization to the wrapped
/// strategy. When the inner strategy would stop locally (frontier drained,
/// local optimum) — or after `restart_patience` consecutive non-improving
/// evaluations — it asks the driver for a fresh random unvisited seed
/// instead, so the history and cache survive across restarts.
///
/// Hard signals from the inner strategy (the annealing temperature floor)
/// still terminate the run; restarting cannot reheat the schedule.
pub(crate) struct RandomRestart {
    inner: Box<dyn SearchStrategy>,
    restart_patience: usize,
}

impl RandomRestart {
    pub fn new(inner: Box<dyn SearchStrategy>, restart_patience: usize) -> Self {
        Self {
            inner,
            restart_patience,
        }
    }
}

impl SearchStrategy for RandomRestart {
    fn priority(&mut self, parent_norm: f64, rng: &mut StdRng) -> f64 {
        self.inner.priority(parent_norm, rng)
    }

    fn accept(
        &mut self,
        improved: bool,
        degradation: f64,
        evaluations: usize,
        rng: &mut StdRng,
    ) -> bool {
        self.inner.accept(improved, degradation, evaluations, rng)
    }

    fn check_stop(&self, ctx: &StrategyContext) -> Option<TerminationReason> {
        match self.inner.check_stop(ctx) {
            Some(TerminationReason::TemperatureFloor) => {
                Some(TerminationReason::TemperatureFloor)
            }
            // Local exhaustion becomes a restart request, not a stop.
            _ => None,
        }
    }

    fn should_restart(&self, ctx: &StrategyContext) -> bool {
        if ctx.frontier_empty {
            return true;
        }
        if self.restart_patience > 0 && ctx.since_improvement >= self.restart_patience {
            return true;
        }
        matches!(
            self.inner.check_stop(ctx),
            Some(TerminationReason::LocalOptimum) | Some(TerminationReason::FrontierExhausted)
        )
    }

    fn reprioritizes(&self) -> bool {
        self.inner.reprioritizes()
    }
}
