//! Simulated annealing over a graph frontier.

use rand::rngs::StdRng;
use rand::Rng;

use super::{SearchStrategy, StrategyContext};
use crate::config::CoolingSchedule;
use crate::types::TerminationReason;

/// Candidates are popped in random order (uniform random priority assigned
/// at discovery). An improving node always expands; a worsening one expands
/// with the Metropolis probability `exp(-delta / T)` where `delta` is the
/// degradation against the incumbent and `T` follows the cooling schedule
/// over the total evaluation count.
///
/// # References
///
/// Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
pub(crate) struct Annealing {
    initial_temperature: f64,
    min_temperature: f64,
    cooling: CoolingSchedule,
}

impl Annealing {
    pub fn new(initial_temperature: f64, min_temperature: f64, cooling: CoolingSchedule) -> Self {
        Self {
            initial_temperature,
            min_temperature,
            cooling,
        }
    }

    fn temperature(&self, evaluations: usize) -> f64 {
        self.cooling
            .temperature(self.initial_temperature, self.min_temperature, evaluations)
    }
}

impl SearchStrategy for Annealing {
    fn priority(&mut self, _parent_norm: f64, rng: &mut StdRng) -> f64 {
        rng.random_range(0.0..1.0)
    }

    fn accept(
        &mut self,
        improved: bool,
        degradation: f64,
        evaluations: usize,
        rng: &mut StdRng,
    ) -> bool {
        if improved {
            return true;
        }
        let temperature = self.temperature(evaluations);
        if temperature <= 0.0 {
            return false;
        }
        let probability = (-degradation / temperature).exp();
        rng.random_range(0.0..1.0) < probability
    }

    fn check_stop(&self, ctx: &StrategyContext) -> Option<TerminationReason> {
        if self.temperature(ctx.evaluations) <= self.min_temperature {
            return Some(TerminationReason::TemperatureFloor);
        }
        if ctx.frontier_empty {
            return Some(TerminationReason::FrontierExhausted);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn context(evaluations: usize) -> StrategyContext {
        StrategyContext {
            frontier_empty: false,
            evaluations,
            since_improvement: 0,
        }
    }

    #[test]
    fn test_improving_always_accepted() {
        let mut strategy = Annealing::new(1.0, 1e-6, CoolingSchedule::Geometric { alpha: 0.5 });
        let mut rng = StdRng::seed_from_u64(1);
        for evaluations in 0..50 {
            assert!(strategy.accept(true, 0.0, evaluations, &mut rng));
        }
    }

    #[test]
    fn test_high_temperature_accepts_most_degradations() {
        let mut strategy = Annealing::new(1e9, 1e-6, CoolingSchedule::Geometric { alpha: 0.99 });
        let mut rng = StdRng::seed_from_u64(1);
        let accepted = (0..1000)
            .filter(|_| strategy.accept(false, 10.0, 0, &mut rng))
            .count();
        assert!(accepted > 900, "expected near-total acceptance, got {accepted}");
    }

    #[test]
    fn test_cold_rejects_degradations() {
        let mut strategy = Annealing::new(100.0, 1e-9, CoolingSchedule::Geometric { alpha: 0.5 });
        let mut rng = StdRng::seed_from_u64(1);
        // After many evaluations the geometric temperature is tiny.
        let accepted = (0..1000)
            .filter(|_| strategy.accept(false, 10.0, 200, &mut rng))
            .count();
        assert_eq!(accepted, 0);
    }

    #[test]
    fn test_stops_at_temperature_floor() {
        let strategy = Annealing::new(100.0, 1.0, CoolingSchedule::Linear { steps: 10 });
        assert_eq!(strategy.check_stop(&context(9)), None);
        assert_eq!(
            strategy.check_stop(&context(10)),
            Some(TerminationReason::TemperatureFloor)
        );
    }
}
