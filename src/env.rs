use std::ops::Index;

use indexmap::{map::Entry, IndexMap};

/// Represents a Markov decision process, defining the dynamics of an environment
/// in which an agent can operate.
///
/// This base trait represents the common case of a discrete-time MDP with one agent
/// and a finite state space and action space.
pub trait Environment {
    /// A representation of the state of the environment to be passed to an agent
    type State;

    /// A representation of an action that an agent can take to affect the environment
    type Action;

    /// Determine if the environment is active or has reached a terminal state
    fn is_active(&self) -> bool;

    /// Update the environment in response to an action taken by an agent, producing a new state
    /// and associated reward
    ///
    /// Callers must only pass an action that is legal for the current state; `step` itself
    /// performs no legality checking.
    ///
    /// **Returns** `(next_state, reward)`
    fn step(&mut self, action: Self::Action) -> (Self::State, f32);

    /// Reset the environment to its initial state
    ///
    /// **Returns** the state
    fn reset(&mut self) -> Self::State;

    /// Pick a uniformly random legal action for the current state
    ///
    /// **Returns** `None` when no legal action exists
    fn random_action(&self) -> Option<Self::Action>;
}

/// An [`Environment`] with a finite, enumerable action space
pub trait DiscreteActionSpace: Environment {
    /// Get the available actions for the current state
    ///
    /// May be empty, in which case the agent is stuck and the episode is over.
    fn actions(&self) -> Vec<Self::Action>;
}

/// A keyed accumulator for per-episode environment metrics
///
/// Keys are fixed at construction and keep their insertion order, so values drained with
/// [`take`](Report::take) line up with [`keys`](Report::keys) for plotting.
#[derive(Debug, Clone)]
pub struct Report {
    metrics: IndexMap<&'static str, f32>,
}

impl Report {
    /// Initialize a report with every metric at zero
    pub fn new(keys: Vec<&'static str>) -> Self {
        Self {
            metrics: keys.into_iter().map(|k| (k, 0.0)).collect(),
        }
    }

    /// Get the entry for a metric, for in-place accumulation
    pub fn entry(&mut self, key: &'static str) -> Entry<'_, &'static str, f32> {
        self.metrics.entry(key)
    }

    /// The metric keys, in insertion order
    pub fn keys(&self) -> Vec<&'static str> {
        self.metrics.keys().copied().collect()
    }

    /// Take the accumulated values, resetting every metric to zero
    pub fn take(&mut self) -> IndexMap<&'static str, f32> {
        let fresh = self.metrics.keys().map(|&k| (k, 0.0)).collect();
        std::mem::replace(&mut self.metrics, fresh)
    }
}

impl Index<&str> for Report {
    type Output = f32;

    fn index(&self, key: &str) -> &Self::Output {
        &self.metrics[key]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_accumulates_and_takes() {
        let mut report = Report::new(vec!["reward", "steps"]);
        report.entry("steps").and_modify(|x| *x += 1.0);
        report.entry("steps").and_modify(|x| *x += 1.0);
        report.entry("reward").and_modify(|x| *x -= 0.1);
        assert_eq!(report["steps"], 2.0, "Steps accumulated");

        let taken = report.take();
        assert_eq!(taken.get("steps"), Some(&2.0), "Taken values preserved");
        assert_eq!(report["steps"], 0.0, "Metrics reset after take");
        assert_eq!(report.keys(), vec!["reward", "steps"], "Key order stable");
    }
}
