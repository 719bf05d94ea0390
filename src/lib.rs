//! Derivative-free optimization over graph-structured discrete search spaces.
//!
//! For objective functions expensive enough that single-digit counts of
//! extra evaluations matter, and parameter spaces whose natural shape is a
//! graph rather than a hypercube — manifolds, grids with holes, irregular
//! lattices. Candidate settings are nodes; edges encode which settings a
//! search may step between. Callers supply the graph (any type implementing
//! [`SearchGraph`]) and the objective; the engine decides what to evaluate
//! next and guarantees, via an internal evaluation cache, that no node's
//! objective is ever computed twice in one run.
//!
//! Strategies:
//!
//! - **Greedy descent**: follow improving neighbors until a local optimum.
//! - **Best-first**: expand the frontier ordered by the best evaluated
//!   neighbor; ideal under a hard evaluation budget.
//! - **Simulated annealing**: Metropolis-gated exploration under a
//!   pluggable cooling schedule.
//! - **Random restart**: wrap any of the above and reseed from a random
//!   unvisited node on local exhaustion, keeping all cached evaluations.
//!
//! # Examples
//!
//! ```
//! use graphopt::{Direction, SearchConfig, SearchGraph, SearchRunner, StrategyKind};
//!
//! /// 16x16 grid with 4-connectivity.
//! struct Grid;
//!
//! impl SearchGraph for Grid {
//!     type Node = (i32, i32);
//!
//!     fn neighbors(&self, &(x, y): &(i32, i32)) -> Vec<(i32, i32)> {
//!         [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]
//!             .into_iter()
//!             .filter(|n| self.contains(n))
//!             .collect()
//!     }
//!
//!     fn contains(&self, &(x, y): &(i32, i32)) -> bool {
//!         (0..16).contains(&x) && (0..16).contains(&y)
//!     }
//! }
//!
//! let mut objective = |&(x, y): &(i32, i32)| {
//!     Ok(((x - 11) as f64).powi(2) + ((y - 3) as f64).powi(2))
//! };
//!
//! let config = SearchConfig::default()
//!     .with_strategy(StrategyKind::Greedy)
//!     .with_direction(Direction::Minimize)
//!     .with_seed(42);
//!
//! let result = SearchRunner::run(&Grid, &mut objective, &[(0, 0)], &config)?;
//! assert_eq!(result.incumbent.unwrap().node, (11, 3));
//! # Ok::<(), graphopt::SearchError>(())
//! ```
//!
//! # Restrictions
//!
//! The engine is single-threaded: objective evaluations run sequentially,
//! and cancellation (see [`SearchRunner::run_with_cancel`]) is observed
//! between evaluations only. Graphs must not be mutated during a run, and
//! noisy objectives are unsupported — the first observed value per node is
//! cached for the rest of the run.

mod cache;
mod config;
mod error;
mod frontier;
mod runner;
mod strategy;
mod types;

pub use config::{CoolingSchedule, Direction, SearchConfig, StrategyKind};
pub use error::{Result, SearchError};
pub use runner::{Incumbent, RunResult, SearchRunner};
pub use types::{EvaluationRecord, Objective, SearchGraph, TerminationReason};
