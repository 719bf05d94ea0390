//! Evaluation cache: at-most-once objective evaluation per node per run.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Instant;

use crate::types::{EvaluationRecord, Objective};

/// Outcome of an evaluate-or-fetch request.
#[derive(Debug, Clone)]
pub(crate) enum Evaluation {
    /// The node was already evaluated this run; value served from cache
    /// without invoking the objective.
    Cached(f64),

    /// The objective was invoked and a record was appended to the history.
    Fresh(f64),

    /// The objective was invoked and failed. Not cached as a value; the
    /// attempt counter covers all failed invocations for this node so far.
    Failed { cause: String, attempts: u32 },
}

#[derive(Debug)]
struct FailureEntry {
    cause: String,
    attempts: u32,
}

/// Memoizes objective evaluations keyed by node identity and owns the
/// append-only evaluation history.
///
/// This is the expense-avoidance guarantee the whole engine exists to
/// provide: within one run, no node's objective is ever computed twice.
/// Failed nodes are recorded separately and are *not* blacklisted here —
/// retry policy belongs to the driver.
#[derive(Debug)]
pub(crate) struct EvaluationCache<N> {
    values: HashMap<N, f64>,
    failures: HashMap<N, FailureEntry>,
    history: Vec<EvaluationRecord<N>>,
}

impl<N: Clone + Eq + Hash + Debug> EvaluationCache<N> {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            failures: HashMap::new(),
            history: Vec::new(),
        }
    }

    /// Returns the cached value for `node`, or invokes `objective` exactly
    /// once to produce it.
    ///
    /// A node that failed previously is attempted again when asked (the
    /// driver decides whether to ask); success on a retry clears the
    /// failure entry and records the value normally.
    pub fn evaluate_or_fetch<O: Objective<N>>(
        &mut self,
        node: &N,
        objective: &mut O,
    ) -> Evaluation {
        if let Some(&value) = self.values.get(node) {
            return Evaluation::Cached(value);
        }

        let started = Instant::now();
        match objective.evaluate(node) {
            Ok(value) => {
                self.failures.remove(node);
                self.history.push(EvaluationRecord {
                    node: node.clone(),
                    value,
                    index: self.history.len(),
                    elapsed: started.elapsed(),
                });
                self.values.insert(node.clone(), value);
                Evaluation::Fresh(value)
            }
            Err(cause) => {
                let entry = self.failures.entry(node.clone()).or_insert(FailureEntry {
                    cause: String::new(),
                    attempts: 0,
                });
                entry.attempts += 1;
                entry.cause = cause.clone();
                Evaluation::Failed {
                    cause,
                    attempts: entry.attempts,
                }
            }
        }
    }

    /// Whether `node` has been attempted at all (success or failure).
    pub fn attempted(&self, node: &N) -> bool {
        self.values.contains_key(node) || self.failures.contains_key(node)
    }

    /// The most recent evaluation record, if any.
    pub fn last(&self) -> Option<&EvaluationRecord<N>> {
        self.history.last()
    }

    /// Number of successful evaluations.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn into_history(self) -> Vec<EvaluationRecord<N>> {
        self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Objective that counts invocations and fails for negative nodes.
    struct Counting {
        calls: usize,
    }

    impl Objective<i64> for Counting {
        fn evaluate(&mut self, node: &i64) -> Result<f64, String> {
            self.calls += 1;
            if *node < 0 {
                Err(format!("node {node} is not evaluable"))
            } else {
                Ok(*node as f64 * 2.0)
            }
        }
    }

    #[test]
    fn test_evaluates_once_per_node() {
        let mut cache = EvaluationCache::new();
        let mut objective = Counting { calls: 0 };

        assert!(matches!(
            cache.evaluate_or_fetch(&3, &mut objective),
            Evaluation::Fresh(v) if (v - 6.0).abs() < 1e-12
        ));
        assert!(matches!(
            cache.evaluate_or_fetch(&3, &mut objective),
            Evaluation::Cached(v) if (v - 6.0).abs() < 1e-12
        ));
        assert_eq!(objective.calls, 1, "cached fetch must not re-invoke");
    }

    #[test]
    fn test_history_order_and_indices() {
        let mut cache = EvaluationCache::new();
        let mut objective = Counting { calls: 0 };

        for node in [5i64, 2, 9] {
            cache.evaluate_or_fetch(&node, &mut objective);
        }

        let history = cache.into_history();
        assert_eq!(history.len(), 3);
        let nodes: Vec<i64> = history.iter().map(|r| r.node).collect();
        assert_eq!(nodes, vec![5, 2, 9]);
        for (i, record) in history.iter().enumerate() {
            assert_eq!(record.index, i);
        }
    }

    #[test]
    fn test_failure_not_cached_and_attempts_counted() {
        let mut cache = EvaluationCache::new();
        let mut objective = Counting { calls: 0 };

        assert!(matches!(
            cache.evaluate_or_fetch(&-1, &mut objective),
            Evaluation::Failed { attempts: 1, .. }
        ));
        // Failure is not a cached value; asking again re-invokes.
        assert!(matches!(
            cache.evaluate_or_fetch(&-1, &mut objective),
            Evaluation::Failed { attempts: 2, .. }
        ));
        assert_eq!(objective.calls, 2);
        assert!(cache.attempted(&-1));
        assert_eq!(cache.len(), 0, "failures must not enter the history");
    }

    #[test]
    fn test_retry_success_clears_failure() {
        struct FlakyOnce {
            failed: bool,
        }
        impl Objective<u32> for FlakyOnce {
            fn evaluate(&mut self, _node: &u32) -> Result<f64, String> {
                if self.failed {
                    Ok(7.0)
                } else {
                    self.failed = true;
                    Err("transient".into())
                }
            }
        }

        let mut cache = EvaluationCache::new();
        let mut objective = FlakyOnce { failed: false };

        assert!(matches!(
            cache.evaluate_or_fetch(&1, &mut objective),
            Evaluation::Failed { .. }
        ));
        assert!(matches!(
            cache.evaluate_or_fetch(&1, &mut objective),
            Evaluation::Fresh(v) if (v - 7.0).abs() < 1e-12
        ));
        assert_eq!(cache.len(), 1);
        assert!(cache.attempted(&1));
    }
}
