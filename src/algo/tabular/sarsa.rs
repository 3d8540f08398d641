use crate::{
    assert_interval, decay,
    ds::QTable,
    env::{DiscreteActionSpace, Environment},
    exploration::{Choice, EpsilonGreedy},
};

use super::Hashable;

/// The record of one training episode
#[derive(Debug, Clone, PartialEq)]
pub struct Episode<S> {
    /// Every state visited, in order, starting at the start state
    pub path: Vec<S>,
    /// Number of transitions taken
    pub steps: u32,
    /// Whether the episode ended on the goal state rather than stuck or capped
    pub terminated: bool,
}

/// Configuration for the [`SarsaAgent`]
pub struct SarsaAgentConfig<E, D>
where
    E: Environment + DiscreteActionSpace,
    E::State: Hashable,
    E::Action: Hashable,
    D: decay::Decay,
{
    pub exploration: EpsilonGreedy<D>,
    pub alpha: f32,
    pub gamma: f32,
    pub episodes: u16,
    /// Per-episode step cap, as a guard against mazes with no path to the goal
    ///
    /// `None` leaves episodes unbounded.
    pub max_steps: Option<u32>,
    /// Initial action value estimates, normally empty
    pub table: QTable<E::State, E::Action>,
}

impl<E> Default for SarsaAgentConfig<E, decay::Constant>
where
    E: Environment + DiscreteActionSpace,
    E::State: Hashable,
    E::Action: Hashable,
{
    fn default() -> Self {
        Self {
            exploration: EpsilonGreedy::new(decay::Constant::new(0.1)),
            alpha: 0.1,
            gamma: 0.9,
            episodes: 200,
            max_steps: None,
            table: QTable::new(),
        }
    }
}

/// An on-policy TD control agent that learns a [`QTable`] over its environment
///
/// SARSA commits to the next action under the exploration policy *before* computing the
/// update target, so the value estimates track the policy actually being followed.
///
/// ### Generics
/// - `E` - The [`Environment`] in which the agent will learn
///     - The environment's state and action spaces must both be discrete because a value will be recorded for each state action pair
///     - For the same reason, the state and action types must be `Copy`, `Eq`, and `Hash` to be used as table keys
/// - `D` - The decay schedule applied to the exploration rate
pub struct SarsaAgent<E, D = decay::Constant>
where
    E: Environment + DiscreteActionSpace,
    E::State: Hashable,
    E::Action: Hashable,
    D: decay::Decay,
{
    q_table: QTable<E::State, E::Action>,
    exploration: EpsilonGreedy<D>,
    alpha: f32,   // learning rate
    gamma: f32,   // discount factor
    episodes: u16,
    max_steps: Option<u32>,
    episode: u32, // current episode
    best: Option<Episode<E::State>>,
}

impl<E, D> SarsaAgent<E, D>
where
    E: Environment + DiscreteActionSpace,
    E::State: Hashable,
    E::Action: Hashable,
    D: decay::Decay,
{
    /// Initialize a new `SarsaAgent` from a config
    ///
    /// **Panics** if `alpha` or `gamma` is not in the interval `[0,1]`
    pub fn new(config: SarsaAgentConfig<E, D>) -> Self {
        assert_interval!(config.alpha, 0.0, 1.0);
        assert_interval!(config.gamma, 0.0, 1.0);
        Self {
            q_table: config.table,
            exploration: config.exploration,
            alpha: config.alpha,
            gamma: config.gamma,
            episodes: config.episodes,
            max_steps: config.max_steps,
            episode: 0,
            best: None,
        }
    }

    pub fn get_q_table(&self) -> &QTable<E::State, E::Action> {
        &self.q_table
    }

    /// The configured number of training episodes
    pub fn episodes(&self) -> u16 {
        self.episodes
    }

    /// The shortest episode so far that ended on the goal, if any
    pub fn best(&self) -> Option<&Episode<E::State>> {
        self.best.as_ref()
    }

    /// Choose an action for `state` based on the exploration policy
    ///
    /// Exploitation considers only actions already recorded for `state`, restricted to the
    /// legal `actions`, and falls back to a random legal action when nothing is recorded.
    ///
    /// **Returns** `None` when no legal action exists (the agent is stuck)
    fn act(&self, env: &E, state: E::State, actions: &[E::Action]) -> Option<E::Action> {
        match self.exploration.choose(self.episode) {
            Choice::Explore => env.random_action(),
            Choice::Exploit => self
                .q_table
                .greedy(state, actions)
                .or_else(|| env.random_action()),
        }
    }

    /// Apply the on-policy TD update for one transition
    ///
    /// A `next_action` of `None` marks a terminal transition, contributing no future value.
    fn learn(
        &mut self,
        state: E::State,
        action: E::Action,
        reward: f32,
        next_state: E::State,
        next_action: Option<E::Action>,
    ) {
        let next_q = match next_action {
            Some(next) => *self.q_table.entry(next_state, next),
            None => 0.0,
        };
        let q = self.q_table.entry(state, action);
        *q += self.alpha * (reward + self.gamma * next_q - *q);
    }

    /// Run one training episode to completion
    pub fn go(&mut self, env: &mut E) -> Episode<E::State> {
        self.go_with(env, |_| {})
    }

    /// Run one training episode, invoking `on_step` with the state being left at every
    /// transition
    pub fn go_with(
        &mut self,
        env: &mut E,
        mut on_step: impl FnMut(&E::State),
    ) -> Episode<E::State> {
        let mut state = env.reset();
        let mut action = self.act(env, state, &env.actions());
        let mut path = vec![state];
        let mut steps = 0;

        while env.is_active() {
            let Some(current) = action else {
                break;
            };
            let (next_state, reward) = env.step(current);
            let next_action = if env.is_active() {
                self.act(env, next_state, &env.actions())
            } else {
                None
            };
            self.learn(state, current, reward, next_state, next_action);
            on_step(&state);

            state = next_state;
            action = next_action;
            path.push(state);
            steps += 1;
            if self.max_steps.is_some_and(|cap| steps >= cap) {
                break;
            }
        }

        self.episode += 1;
        let episode = Episode {
            path,
            steps,
            terminated: !env.is_active(),
        };
        log::debug!("Episode {}: steps = {}", self.episode, episode.steps);

        if episode.terminated && self.best.as_ref().map_or(true, |b| episode.steps < b.steps) {
            self.best = Some(episode.clone());
        }

        episode
    }

    /// Run the configured number of training episodes
    pub fn train(&mut self, env: &mut E) {
        for _ in 0..self.episodes {
            self.go(env);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::maze::{Maze, MazeAction, Pos};

    use super::*;

    #[test]
    fn update_rule_matches_hand_computation() {
        let mut agent: SarsaAgent<Maze> = SarsaAgent::new(SarsaAgentConfig::default());

        agent.learn((4, 5), MazeAction::Down, 1.0, (5, 5), None);
        assert_eq!(
            agent.q_table.get((4, 5), MazeAction::Down),
            Some(0.1),
            "Fresh estimate moves by alpha times the target"
        );

        *agent.q_table.entry((0, 0), MazeAction::Right) = 0.5;
        *agent.q_table.entry((0, 1), MazeAction::Down) = 0.2;
        agent.learn((0, 0), MazeAction::Right, -0.1, (0, 1), Some(MazeAction::Down));
        let expected = 0.5 + 0.1 * (-0.1 + 0.9 * 0.2 - 0.5);
        assert_eq!(
            agent.q_table.get((0, 0), MazeAction::Right),
            Some(expected),
            "Estimate follows the TD update exactly"
        );
    }

    #[test]
    fn learn_records_the_committed_next_pair() {
        let mut agent: SarsaAgent<Maze> = SarsaAgent::new(SarsaAgentConfig::default());

        agent.learn((0, 0), MazeAction::Right, -0.1, (0, 1), Some(MazeAction::Down));
        assert_eq!(
            agent.q_table.get((0, 1), MazeAction::Down),
            Some(0.0),
            "Next pair is recorded at the default estimate"
        );
        assert_eq!(agent.q_table.len(), 2, "Only the two touched pairs exist");

        agent.learn((0, 1), MazeAction::Down, -0.1, (1, 1), None);
        assert!(
            agent.q_table.get((1, 1), MazeAction::Down).is_none(),
            "A terminal transition records no next pair"
        );
    }

    #[test]
    fn greedy_runs_are_deterministic() {
        let expected: Vec<Pos> = vec![(0, 0), (0, 1), (1, 1)];

        let mut paths = Vec::new();
        for _ in 0..2 {
            let mut maze = Maze::new(2, 2, (0, 0), (1, 1)).unwrap();
            let mut table = QTable::new();
            *table.entry((0, 0), MazeAction::Right) = 1.0;
            *table.entry((0, 1), MazeAction::Down) = 1.0;
            let mut agent: SarsaAgent<Maze> = SarsaAgent::new(SarsaAgentConfig {
                exploration: EpsilonGreedy::new(decay::Constant::new(0.0)),
                table,
                ..Default::default()
            });

            let episode = agent.go(&mut maze);
            assert!(episode.terminated, "Greedy run reaches the goal");
            assert_eq!(episode.path, expected, "Greedy run follows the seeded values");
            paths.push(episode.path);
        }
        assert_eq!(paths[0], paths[1], "Runs with a fixed table are identical");
    }

    #[test]
    fn finds_shortest_path_in_open_grid() {
        let mut maze = Maze::new(6, 6, (0, 0), (5, 5)).unwrap();
        let mut agent: SarsaAgent<Maze> = SarsaAgent::new(SarsaAgentConfig::default());

        agent.train(&mut maze);

        let best = agent.best().expect("An open grid is solvable");
        assert!(best.terminated, "Best episode ended on the goal");
        assert_eq!(best.steps, 10, "Best path length is the Manhattan distance");
        assert_eq!(best.path.len(), 11, "Path holds every visited state");
        assert_eq!(best.path[0], maze.start(), "Path starts at the start state");
        assert_eq!(*best.path.last().unwrap(), maze.goal(), "Path ends at the goal");

        for (state, action, value) in agent.get_q_table().iter() {
            assert!(
                value.is_finite(),
                "Estimate for {state:?} {action:?} is finite"
            );
        }
    }

    #[test]
    fn sealed_goal_never_records_a_best() {
        let mut maze = Maze::new(6, 6, (0, 0), (5, 5)).unwrap();
        maze.toggle((4, 5));
        maze.toggle((5, 4));
        let mut agent: SarsaAgent<Maze> = SarsaAgent::new(SarsaAgentConfig {
            episodes: 50,
            max_steps: Some(200),
            ..Default::default()
        });

        agent.train(&mut maze);

        assert!(agent.best().is_none(), "No episode can end on a sealed goal");
        for (_, _, value) in agent.get_q_table().iter() {
            assert!(value.is_finite(), "Estimates stay finite without a goal");
        }
    }

    #[test]
    fn capped_episode_is_not_terminal() {
        let mut maze = Maze::new(6, 6, (0, 0), (5, 5)).unwrap();
        maze.toggle((4, 5));
        maze.toggle((5, 4));
        let mut agent: SarsaAgent<Maze> = SarsaAgent::new(SarsaAgentConfig {
            max_steps: Some(50),
            ..Default::default()
        });

        let episode = agent.go(&mut maze);
        assert_eq!(episode.steps, 50, "Episode stops at the cap");
        assert!(!episode.terminated, "Capped episode is not a goal episode");
        assert_eq!(episode.path.len(), 51, "Path holds the start plus every step");
        assert_eq!(episode.path[0], maze.start(), "Path starts at the start state");
    }

    #[test]
    fn stuck_start_ends_the_episode_normally() {
        let mut maze = Maze::new(6, 6, (0, 0), (5, 5)).unwrap();
        maze.toggle((0, 1));
        maze.toggle((1, 0));
        let mut agent: SarsaAgent<Maze> = SarsaAgent::new(SarsaAgentConfig::default());

        let episode = agent.go(&mut maze);
        assert_eq!(episode.steps, 0, "No transition is possible");
        assert_eq!(episode.path, vec![(0, 0)], "Path holds only the start state");
        assert!(!episode.terminated, "A stuck episode is not a goal episode");
        assert!(agent.best().is_none(), "A stuck episode never becomes the best");
    }
}
