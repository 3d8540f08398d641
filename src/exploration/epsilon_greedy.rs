use rand::{thread_rng, Rng};

use crate::decay::Decay;

use super::Choice;

/// Epsilon greedy exploration policy with a time-decaying epsilon threshold
///
/// Explores with probability exactly epsilon: an epsilon of `0.0` never explores and an
/// epsilon of `1.0` always does.
pub struct EpsilonGreedy<D: Decay> {
    epsilon: D,
}

impl<D: Decay> EpsilonGreedy<D> {
    /// Initialize epsilon greedy policy with a decay strategy
    pub fn new(decay: D) -> Self {
        Self { epsilon: decay }
    }

    /// Invoke epsilon greedy policy for the current episode
    pub fn choose(&self, episode: u32) -> Choice {
        let epsilon = self.epsilon.evaluate(episode as f32);
        if thread_rng().gen::<f32>() < epsilon {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::decay;

    use super::*;

    #[test]
    fn epsilon_bounds_are_exact() {
        let never = EpsilonGreedy::new(decay::Constant::new(0.0));
        let always = EpsilonGreedy::new(decay::Constant::new(1.0));
        for episode in 0..100 {
            assert!(
                matches!(never.choose(episode), Choice::Exploit),
                "Zero epsilon never explores"
            );
            assert!(
                matches!(always.choose(episode), Choice::Explore),
                "Unit epsilon always explores"
            );
        }
    }
}
