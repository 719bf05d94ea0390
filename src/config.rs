//! Run configuration: strategy selection, budgets, cooling schedules.

use std::time::Duration;

/// Optimization direction for the objective value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Lower objective values are better.
    #[default]
    Minimize,
    /// Higher objective values are better.
    Maximize,
}

impl Direction {
    /// Maps a raw objective value onto a "higher is better" scale.
    pub(crate) fn normalize(self, value: f64) -> f64 {
        match self {
            Direction::Minimize => -value,
            Direction::Maximize => value,
        }
    }
}

/// Cooling schedule for the annealing strategy's temperature reduction.
///
/// The temperature is a function of the total evaluation count, so it is
/// monotonically non-increasing over the run.
///
/// # References
///
/// - Geometric: standard textbook approach
/// - Linear: fixed-duration cooling
/// - LundyMees: Lundy & Mees (1986), with convergence proof
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Geometric (exponential) cooling: `T_k = alpha^k * T_0`.
    ///
    /// Most widely used. Typical `alpha`: 0.95–0.99.
    Geometric {
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Linear cooling: `T_k = T_0 - k * (T_0 - T_min) / steps`.
    ///
    /// Reaches the floor after exactly `steps` evaluations.
    Linear {
        /// Evaluation count at which the temperature hits the floor.
        steps: usize,
    },

    /// Lundy-Mees cooling: `T_k = T_0 / (1 + k * beta * T_0)`.
    ///
    /// Cools fast at high T, slow at low T. Has a convergence proof.
    ///
    /// Reference: Lundy & Mees (1986)
    LundyMees {
        /// Cooling parameter. Typically `(T_0 - T_min) / (max_evals * T_0 * T_min)`.
        beta: f64,
    },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.95 }
    }
}

impl CoolingSchedule {
    /// Temperature after `evaluations` objective evaluations.
    pub fn temperature(&self, initial: f64, min: f64, evaluations: usize) -> f64 {
        match *self {
            CoolingSchedule::Geometric { alpha } => initial * alpha.powf(evaluations as f64),

            CoolingSchedule::Linear { steps } => {
                if steps == 0 {
                    min
                } else {
                    initial - evaluations as f64 * (initial - min) / steps as f64
                }
            }

            CoolingSchedule::LundyMees { beta } => {
                initial / (1.0 + evaluations as f64 * beta * initial)
            }
        }
    }
}

/// Which search strategy drives the run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrategyKind {
    /// Greedy descent: expand only improving nodes; stop at a local optimum.
    Greedy,

    /// Best-first: always expand, ordered by the best evaluated neighbor.
    ///
    /// With no evaluation budget this visits every node reachable from the
    /// seeds; wrapped in [`StrategyKind::RandomRestart`] on an enumerable
    /// graph it becomes an exhaustive search of the whole space.
    BestFirst,

    /// Simulated annealing: Metropolis-gated expansion under a cooling
    /// schedule.
    Annealing,

    /// Random restart wrapping an inner strategy: on local exhaustion,
    /// reseed from a uniformly random unvisited node. Requires the graph to
    /// implement [`crate::SearchGraph::nodes`].
    RandomRestart(Box<StrategyKind>),
}

impl Default for StrategyKind {
    fn default() -> Self {
        StrategyKind::Greedy
    }
}

/// Configuration for a search run.
///
/// Seed nodes are passed to [`crate::SearchRunner::run`] directly so the
/// configuration stays independent of the node type.
///
/// # Examples
///
/// ```
/// use graphopt::{CoolingSchedule, Direction, SearchConfig, StrategyKind};
///
/// let config = SearchConfig::default()
///     .with_strategy(StrategyKind::Annealing)
///     .with_direction(Direction::Minimize)
///     .with_initial_temperature(50.0)
///     .with_min_temperature(0.01)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.98 })
///     .with_max_evaluations(500)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Search strategy.
    pub strategy: StrategyKind,

    /// Whether the objective is minimized or maximized.
    pub direction: Direction,

    /// Maximum objective invocations, counting failed attempts. 0 = no limit.
    pub max_evaluations: usize,

    /// Wall-clock limit, checked between evaluations (an in-flight objective
    /// call is never interrupted).
    pub max_time: Option<Duration>,

    /// Initial annealing temperature. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// Annealing stops once the temperature drops to this floor.
    pub min_temperature: f64,

    /// Cooling schedule (annealing only).
    pub cooling: CoolingSchedule,

    /// Greedy descent stops after this many consecutive non-improving
    /// evaluations. 0 disables the window (stop on frontier exhaustion only).
    pub patience: usize,

    /// Random restart additionally triggers after this many consecutive
    /// non-improving evaluations, even with a non-empty frontier. 0 disables.
    pub restart_patience: usize,

    /// Re-queue a node whose evaluation failed for exactly one retry.
    ///
    /// Default is `false`: a failed node is permanently excluded for the
    /// rest of the run, avoiding retry loops on deterministic failures.
    pub retry_failed: bool,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            direction: Direction::default(),
            max_evaluations: 0,
            max_time: None,
            initial_temperature: 100.0,
            min_temperature: 1e-6,
            cooling: CoolingSchedule::default(),
            patience: 0,
            restart_patience: 0,
            retry_failed: false,
            seed: None,
        }
    }
}

impl SearchConfig {
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_max_evaluations(mut self, n: usize) -> Self {
        self.max_evaluations = n;
        self
    }

    pub fn with_max_time(mut self, limit: Duration) -> Self {
        self.max_time = Some(limit);
        self
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_patience(mut self, n: usize) -> Self {
        self.patience = n;
        self
    }

    pub fn with_restart_patience(mut self, n: usize) -> Self {
        self.restart_patience = n;
        self
    }

    pub fn with_retry_failed(mut self, retry: bool) -> Self {
        self.retry_failed = retry;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_temperature <= 0.0 {
            return Err("initial_temperature must be positive".into());
        }
        if self.min_temperature <= 0.0 {
            return Err("min_temperature must be positive".into());
        }
        if self.min_temperature >= self.initial_temperature {
            return Err("min_temperature must be less than initial_temperature".into());
        }
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => {
                if alpha <= 0.0 || alpha >= 1.0 {
                    return Err(format!("geometric alpha must be in (0, 1), got {alpha}"));
                }
            }
            CoolingSchedule::Linear { steps } => {
                if steps == 0 {
                    return Err("linear cooling needs at least one step".into());
                }
            }
            CoolingSchedule::LundyMees { beta } => {
                if beta <= 0.0 {
                    return Err(format!("lundy-mees beta must be positive, got {beta}"));
                }
            }
        }
        if let StrategyKind::RandomRestart(inner) = &self.strategy {
            if matches!(**inner, StrategyKind::RandomRestart(_)) {
                return Err("random-restart cannot wrap another random-restart".into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.strategy, StrategyKind::Greedy);
        assert_eq!(config.direction, Direction::Minimize);
        assert_eq!(config.max_evaluations, 0);
        assert!(config.max_time.is_none());
        assert!(!config.retry_failed);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = SearchConfig::default()
            .with_strategy(StrategyKind::BestFirst)
            .with_direction(Direction::Maximize)
            .with_max_evaluations(100)
            .with_patience(5)
            .with_retry_failed(true)
            .with_seed(123);

        assert_eq!(config.strategy, StrategyKind::BestFirst);
        assert_eq!(config.direction, Direction::Maximize);
        assert_eq!(config.max_evaluations, 100);
        assert_eq!(config.patience, 5);
        assert!(config.retry_failed);
        assert_eq!(config.seed, Some(123));
    }

    #[test]
    fn test_validate_ok() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bad_temperature() {
        let config = SearchConfig::default().with_initial_temperature(-1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_min_ge_initial() {
        let config = SearchConfig::default()
            .with_initial_temperature(10.0)
            .with_min_temperature(20.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_alpha() {
        let config =
            SearchConfig::default().with_cooling(CoolingSchedule::Geometric { alpha: 1.5 });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_linear_steps() {
        let config = SearchConfig::default().with_cooling(CoolingSchedule::Linear { steps: 0 });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_nested_restart() {
        let config = SearchConfig::default().with_strategy(StrategyKind::RandomRestart(Box::new(
            StrategyKind::RandomRestart(Box::new(StrategyKind::Greedy)),
        )));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_linear_cooling_hits_floor() {
        let cooling = CoolingSchedule::Linear { steps: 10 };
        let t = cooling.temperature(100.0, 1.0, 10);
        assert!((t - 1.0).abs() < 1e-10);
        assert!(cooling.temperature(100.0, 1.0, 11) < 1.0);
    }

    #[test]
    fn test_geometric_cooling_monotone() {
        let cooling = CoolingSchedule::Geometric { alpha: 0.9 };
        let mut last = f64::INFINITY;
        for k in 0..20 {
            let t = cooling.temperature(100.0, 0.01, k);
            assert!(t < last);
            last = t;
        }
    }

    #[test]
    fn test_lundy_mees_closed_form() {
        let cooling = CoolingSchedule::LundyMees { beta: 0.01 };
        // T_1 = T_0 / (1 + beta * T_0)
        let t1 = cooling.temperature(100.0, 1e-6, 1);
        assert!((t1 - 100.0 / 2.0).abs() < 1e-10);
    }
}
