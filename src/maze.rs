use rand::seq::IteratorRandom;
use strum::{EnumIter, VariantArray};

use crate::env::{DiscreteActionSpace, Environment, Report};

/// A grid coordinate as `(row, column)`
pub type Pos = (i32, i32);

/// Reward for a transition that lands on the goal cell
const GOAL_REWARD: f32 = 1.0;
/// Reward for every other transition, nudging the agent toward shorter paths
const STEP_PENALTY: f32 = -0.1;

/// The four moves available in the maze, each a single-cell coordinate delta
#[derive(EnumIter, VariantArray, Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum MazeAction {
    Up,
    Down,
    Left,
    Right,
}

impl MazeAction {
    /// The `(row, column)` delta this action applies
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

/// Invalid maze construction parameters
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("grid must hold at least two cells (found: {rows}x{cols})")]
    GridTooSmall { rows: usize, cols: usize },
    #[error("{name} cell {pos:?} is out of bounds for a {rows}x{cols} grid")]
    CellOutOfBounds {
        name: &'static str,
        pos: Pos,
        rows: usize,
        cols: usize,
    },
    #[error("start and goal must be distinct cells")]
    StartIsGoal,
}

/// A maze gridworld: a fixed-size grid of open and blocked cells with fixed start and goal
///
/// Each episode begins on the start cell and the environment terminates when the agent
/// reaches the goal cell. Walls can be painted onto any other cell between episodes.
#[derive(Debug, Clone)]
pub struct Maze {
    rows: usize,
    cols: usize,
    walls: Vec<bool>,
    start: Pos,
    goal: Pos,
    pos: Pos,
    pub report: Report,
}

impl Maze {
    /// Build an open maze, validating that start and goal are distinct in-bounds cells
    pub fn new(rows: usize, cols: usize, start: Pos, goal: Pos) -> Result<Self, MazeError> {
        if rows * cols < 2 {
            return Err(MazeError::GridTooSmall { rows, cols });
        }
        let in_bounds =
            |p: Pos| p.0 >= 0 && p.1 >= 0 && (p.0 as usize) < rows && (p.1 as usize) < cols;
        for (name, pos) in [("start", start), ("goal", goal)] {
            if !in_bounds(pos) {
                return Err(MazeError::CellOutOfBounds {
                    name,
                    pos,
                    rows,
                    cols,
                });
            }
        }
        if start == goal {
            return Err(MazeError::StartIsGoal);
        }

        Ok(Self {
            rows,
            cols,
            walls: vec![false; rows * cols],
            start,
            goal,
            pos: start,
            report: Report::new(vec!["reward", "steps"]),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn goal(&self) -> Pos {
        self.goal
    }

    fn idx(&self, pos: Pos) -> usize {
        pos.0 as usize * self.cols + pos.1 as usize
    }

    /// Whether `pos` lies within the grid
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.0 >= 0 && pos.1 >= 0 && (pos.0 as usize) < self.rows && (pos.1 as usize) < self.cols
    }

    /// Whether `pos` is an in-bounds cell without a wall
    pub fn is_open(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && !self.walls[self.idx(pos)]
    }

    /// Toggle a cell between open and blocked
    ///
    /// The start cell, the goal cell, and out-of-bounds positions are rejected.
    ///
    /// **Returns** whether the cell changed
    pub fn toggle(&mut self, pos: Pos) -> bool {
        if !self.in_bounds(pos) || pos == self.start || pos == self.goal {
            return false;
        }
        let ix = self.idx(pos);
        self.walls[ix] = !self.walls[ix];
        true
    }
}

impl Environment for Maze {
    type State = Pos;
    type Action = MazeAction;

    fn is_active(&self) -> bool {
        self.pos != self.goal
    }

    fn step(&mut self, action: Self::Action) -> (Self::State, f32) {
        let (dr, dc) = action.delta();
        self.pos = (self.pos.0 + dr, self.pos.1 + dc);

        let reward = if self.pos == self.goal {
            GOAL_REWARD
        } else {
            STEP_PENALTY
        };
        self.report.entry("steps").and_modify(|x| *x += 1.0);
        self.report.entry("reward").and_modify(|x| *x += reward);

        (self.pos, reward)
    }

    fn reset(&mut self) -> Self::State {
        self.pos = self.start;
        self.pos
    }

    fn random_action(&self) -> Option<Self::Action> {
        self.actions().into_iter().choose(&mut rand::thread_rng())
    }
}

impl DiscreteActionSpace for Maze {
    fn actions(&self) -> Vec<Self::Action> {
        MazeAction::VARIANTS
            .iter()
            .copied()
            .filter(|a| {
                let (dr, dc) = a.delta();
                self.is_open((self.pos.0 + dr, self.pos.1 + dc))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic() -> Maze {
        Maze::new(6, 6, (0, 0), (5, 5)).unwrap()
    }

    #[test]
    fn construction_invariants() {
        assert_eq!(
            Maze::new(1, 1, (0, 0), (0, 0)).unwrap_err(),
            MazeError::GridTooSmall { rows: 1, cols: 1 },
            "Single-cell grid rejected"
        );
        assert_eq!(
            Maze::new(6, 6, (0, 0), (6, 5)).unwrap_err(),
            MazeError::CellOutOfBounds {
                name: "goal",
                pos: (6, 5),
                rows: 6,
                cols: 6
            },
            "Out-of-bounds goal rejected"
        );
        assert_eq!(
            Maze::new(6, 6, (2, 2), (2, 2)).unwrap_err(),
            MazeError::StartIsGoal,
            "Coincident start and goal rejected"
        );
        assert!(Maze::new(1, 2, (0, 0), (0, 1)).is_ok(), "Minimal corridor accepted");
    }

    #[test]
    fn toggle_respects_start_and_goal() {
        let mut maze = classic();
        assert!(!maze.toggle((0, 0)), "Start cell is not toggleable");
        assert!(!maze.toggle((5, 5)), "Goal cell is not toggleable");
        assert!(!maze.toggle((-1, 0)), "Out of bounds is not toggleable");
        assert!(maze.toggle((2, 3)), "Open cell toggles to wall");
        assert!(!maze.is_open((2, 3)), "Toggled cell is blocked");
        assert!(maze.toggle((2, 3)), "Wall toggles back to open");
        assert!(maze.is_open((2, 3)), "Cell is open again");
    }

    #[test]
    fn actions_stay_in_bounds_and_off_walls() {
        let mut maze = classic();
        maze.reset();
        assert_eq!(
            maze.actions(),
            vec![MazeAction::Down, MazeAction::Right],
            "Top-left corner permits two moves"
        );
        maze.toggle((0, 1));
        assert_eq!(
            maze.actions(),
            vec![MazeAction::Down],
            "A wall removes the blocked move"
        );

        let mut maze = classic();
        for r in 0..6 {
            for c in 0..6 {
                if (r + c) % 2 == 1 {
                    maze.toggle((r, c));
                }
            }
        }
        for r in 0..6 {
            for c in 0..6 {
                maze.pos = (r, c);
                for a in maze.actions() {
                    let (dr, dc) = a.delta();
                    assert!(
                        maze.is_open((r + dr, c + dc)),
                        "Action {a:?} from ({r}, {c}) lands on an open in-bounds cell"
                    );
                }
            }
        }
    }

    #[test]
    fn step_rewards() {
        let mut maze = classic();
        maze.pos = (4, 5);
        let (next, reward) = maze.step(MazeAction::Down);
        assert_eq!(next, (5, 5), "Down moves one row down");
        assert_eq!(reward, GOAL_REWARD, "Goal transition pays the bonus");
        assert!(!maze.is_active(), "Environment is terminal on the goal");

        maze.reset();
        let (next, reward) = maze.step(MazeAction::Right);
        assert_eq!(next, (0, 1), "Right moves one column right");
        assert_eq!(reward, STEP_PENALTY, "Ordinary transition pays the penalty");
        assert!(maze.is_active(), "Environment is active off the goal");

        let report = maze.report.take();
        assert_eq!(report["steps"], 2.0, "Both steps recorded");
        assert_eq!(
            report["reward"],
            GOAL_REWARD + STEP_PENALTY,
            "Rewards accumulated"
        );
    }

    #[test]
    fn random_action_is_none_when_trapped() {
        let mut maze = classic();
        maze.toggle((0, 1));
        maze.toggle((1, 0));
        maze.reset();
        assert!(maze.actions().is_empty(), "Walled-in start has no legal actions");
        assert!(maze.random_action().is_none(), "No random action when trapped");
    }
}
