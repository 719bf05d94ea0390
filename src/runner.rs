//! Search execution loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cache::{Evaluation, EvaluationCache};
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::strategy::{self, SearchStrategy, StrategyContext};
use crate::types::{EvaluationRecord, Objective, SearchGraph, TerminationReason};

/// Best node observed so far, per the configured direction.
#[derive(Debug, Clone)]
pub struct Incumbent<N> {
    /// The best node.
    pub node: N,

    /// Its objective value.
    pub value: f64,
}

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct RunResult<N> {
    /// Best evaluated node, if any evaluation succeeded.
    pub incumbent: Option<Incumbent<N>>,

    /// All successful evaluations, in evaluation order.
    pub history: Vec<EvaluationRecord<N>>,

    /// Total objective invocations, including failed attempts.
    pub evaluations: usize,

    /// Failed objective invocations.
    pub failures: usize,

    /// Number of random restarts performed.
    pub restarts: usize,

    /// Why the run stopped.
    pub reason: TerminationReason,
}

/// Executes graph searches.
pub struct SearchRunner;

impl SearchRunner {
    /// Runs a search from the given seed nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use graphopt::{SearchConfig, SearchGraph, SearchRunner};
    ///
    /// struct Line;
    /// impl SearchGraph for Line {
    ///     type Node = i64;
    ///     fn neighbors(&self, &i: &i64) -> Vec<i64> {
    ///         [i - 1, i + 1].into_iter().filter(|n| self.contains(n)).collect()
    ///     }
    ///     fn contains(&self, &i: &i64) -> bool {
    ///         (-100..=100).contains(&i)
    ///     }
    /// }
    ///
    /// let mut objective = |&i: &i64| Ok(((i - 37) as f64).powi(2));
    /// let result = SearchRunner::run(&Line, &mut objective, &[0], &SearchConfig::default())?;
    /// assert_eq!(result.incumbent.unwrap().node, 37);
    /// # Ok::<(), graphopt::SearchError>(())
    /// ```
    pub fn run<G, O>(
        graph: &G,
        objective: &mut O,
        seeds: &[G::Node],
        config: &SearchConfig,
    ) -> Result<RunResult<G::Node>, SearchError>
    where
        G: SearchGraph,
        O: Objective<G::Node>,
    {
        Self::run_with_cancel(graph, objective, seeds, config, None)
    }

    /// Runs a search with an optional cancellation token.
    ///
    /// The flag is checked between evaluations, never mid-evaluation: an
    /// in-flight objective call always completes, then the run terminates
    /// with [`TerminationReason::Cancelled`] and whatever history it has.
    pub fn run_with_cancel<G, O>(
        graph: &G,
        objective: &mut O,
        seeds: &[G::Node],
        config: &SearchConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<RunResult<G::Node>, SearchError>
    where
        G: SearchGraph,
        O: Objective<G::Node>,
    {
        Self::run_with_observer(graph, objective, seeds, config, cancel, |_, _| {})
    }

    /// Runs a search with a streaming progress observer.
    ///
    /// The observer is invoked exactly once per successful evaluation, in
    /// history order, with the new record and the incumbent value after it.
    pub fn run_with_observer<G, O, F>(
        graph: &G,
        objective: &mut O,
        seeds: &[G::Node],
        config: &SearchConfig,
        cancel: Option<Arc<AtomicBool>>,
        observer: F,
    ) -> Result<RunResult<G::Node>, SearchError>
    where
        G: SearchGraph,
        O: Objective<G::Node>,
        F: FnMut(&EvaluationRecord<G::Node>, f64),
    {
        config.validate().map_err(SearchError::Config)?;
        if seeds.is_empty() {
            return Err(SearchError::EmptySeeds);
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let driver = Driver {
            graph,
            objective,
            config,
            strategy: strategy::build(config),
            cache: EvaluationCache::new(),
            frontier: Frontier::new(),
            rng,
            cancel,
            observer,
            best: None,
            evaluations: 0,
            failures: 0,
            restarts: 0,
            since_improvement: 0,
            started: Instant::now(),
        };
        driver.run(seeds)
    }
}

struct Driver<'a, G, O, F>
where
    G: SearchGraph,
    O: Objective<G::Node>,
    F: FnMut(&EvaluationRecord<G::Node>, f64),
{
    graph: &'a G,
    objective: &'a mut O,
    config: &'a SearchConfig,
    strategy: Box<dyn SearchStrategy>,
    cache: EvaluationCache<G::Node>,
    frontier: Frontier<G::Node>,
    rng: StdRng,
    cancel: Option<Arc<AtomicBool>>,
    observer: F,
    best: Option<(G::Node, f64)>,
    evaluations: usize,
    failures: usize,
    restarts: usize,
    since_improvement: usize,
    started: Instant,
}

impl<G, O, F> Driver<'_, G, O, F>
where
    G: SearchGraph,
    O: Objective<G::Node>,
    F: FnMut(&EvaluationRecord<G::Node>, f64),
{
    fn run(mut self, seeds: &[G::Node]) -> Result<RunResult<G::Node>, SearchError> {
        for seed in seeds {
            // Seeding honors the same boundaries as the main loop: budget,
            // wall clock, and cancellation are checked before every seed
            // evaluation, not just after all seeds are in.
            if let Some(reason) = self.check_limits() {
                return Ok(self.finish(reason));
            }
            if !self.graph.contains(seed) {
                return Err(self.inconsistency(seed));
            }
            self.visit(seed.clone(), true)?;
        }
        let reason = self.search_loop()?;
        Ok(self.finish(reason))
    }

    /// Global stopping conditions, checked at every state boundary.
    fn check_limits(&self) -> Option<TerminationReason> {
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Some(TerminationReason::Cancelled);
            }
        }
        if let Some(limit) = self.config.max_time {
            if self.started.elapsed() >= limit {
                return Some(TerminationReason::TimeLimit);
            }
        }
        if self.config.max_evaluations > 0 && self.evaluations >= self.config.max_evaluations {
            return Some(TerminationReason::BudgetExhausted);
        }
        None
    }

    fn search_loop(&mut self) -> Result<TerminationReason, SearchError> {
        loop {
            if let Some(reason) = self.check_limits() {
                return Ok(reason);
            }

            let ctx = StrategyContext {
                frontier_empty: self.frontier.is_empty(),
                evaluations: self.evaluations,
                since_improvement: self.since_improvement,
            };
            if let Some(reason) = self.strategy.check_stop(&ctx) {
                return Ok(reason);
            }
            if self.strategy.should_restart(&ctx) {
                match self.restart_node() {
                    Some(node) => {
                        self.restarts += 1;
                        self.since_improvement = 0;
                        tracing::info!(node = ?node, restarts = self.restarts, "reseeding from random unvisited node");
                        self.visit(node, true)?;
                        continue;
                    }
                    None => return Ok(TerminationReason::FrontierExhausted),
                }
            }

            let Some(node) = self.frontier.pop() else {
                return Ok(TerminationReason::FrontierExhausted);
            };
            self.visit(node, false)?;
        }
    }

    /// Evaluates `node` and, if accepted (or forced, for seeds and restart
    /// nodes), expands its neighborhood into the frontier.
    fn visit(&mut self, node: G::Node, force_expand: bool) -> Result<(), SearchError> {
        match self.cache.evaluate_or_fetch(&node, self.objective) {
            // Duplicate seed; already in the history.
            Evaluation::Cached(_) => Ok(()),

            Evaluation::Failed { cause, attempts } => {
                self.evaluations += 1;
                self.failures += 1;
                tracing::debug!(node = ?node, %cause, attempts, "objective evaluation failed");
                if self.config.retry_failed && attempts == 1 {
                    // One retry, after all fresh candidates.
                    self.frontier.insert(node, f64::NEG_INFINITY);
                }
                Ok(())
            }

            Evaluation::Fresh(value) => {
                self.evaluations += 1;
                let norm = self.config.direction.normalize(value);
                let (improved, degradation) = match &self.best {
                    None => (true, 0.0),
                    Some((_, best_value)) => {
                        let best_norm = self.config.direction.normalize(*best_value);
                        (norm > best_norm, (best_norm - norm).max(0.0))
                    }
                };
                if improved {
                    self.best = Some((node.clone(), value));
                    self.since_improvement = 0;
                } else {
                    self.since_improvement += 1;
                }

                let incumbent_value = self.best.as_ref().map_or(value, |(_, v)| *v);
                if let Some(record) = self.cache.last() {
                    tracing::debug!(
                        node = ?record.node,
                        value,
                        improved,
                        total = self.evaluations,
                        "evaluated node"
                    );
                    (self.observer)(record, incumbent_value);
                }

                let expand = force_expand
                    || self.strategy.accept(
                        improved,
                        degradation,
                        self.evaluations,
                        &mut self.rng,
                    );
                if expand {
                    self.expand(&node, norm)?;
                }
                Ok(())
            }
        }
    }

    /// Grows the frontier with the unattempted neighbors of an evaluated
    /// node, verifying the graph's containment contract as it goes.
    fn expand(&mut self, node: &G::Node, parent_norm: f64) -> Result<(), SearchError> {
        for neighbor in self.graph.neighbors(node) {
            if !self.graph.contains(&neighbor) {
                return Err(self.inconsistency(&neighbor));
            }
            if self.cache.attempted(&neighbor) {
                continue;
            }
            if self.frontier.contains(&neighbor) {
                if self.strategy.reprioritizes() {
                    let priority = self.strategy.priority(parent_norm, &mut self.rng);
                    self.frontier.raise_priority(&neighbor, priority);
                }
                continue;
            }
            let priority = self.strategy.priority(parent_norm, &mut self.rng);
            self.frontier.insert(neighbor, priority);
        }
        Ok(())
    }

    /// Picks a uniformly random unattempted node for a restart, if any.
    fn restart_node(&mut self) -> Option<G::Node> {
        let mut candidates: Vec<G::Node> = self
            .graph
            .nodes()
            .into_iter()
            .filter(|node| !self.cache.attempted(node))
            .collect();
        if candidates.is_empty() {
            None
        } else {
            let index = self.rng.random_range(0..candidates.len());
            Some(candidates.swap_remove(index))
        }
    }

    fn inconsistency(&self, node: &G::Node) -> SearchError {
        SearchError::GraphInconsistency {
            node: format!("{node:?}"),
            history_len: self.cache.len(),
        }
    }

    fn finish(self, reason: TerminationReason) -> RunResult<G::Node> {
        RunResult {
            incumbent: self
                .best
                .map(|(node, value)| Incumbent { node, value }),
            history: self.cache.into_history(),
            evaluations: self.evaluations,
            failures: self.failures,
            restarts: self.restarts,
            reason,
        }
    }
}
