/// Implemented RL algorithms
pub mod algo;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// Data structures
pub mod ds;

/// Environment
pub mod env;

/// Exploration policies
pub mod exploration;

/// The maze gridworld environment
pub mod maze;

/// Terminal interface for painting mazes and watching training
#[cfg(feature = "viz")]
pub mod viz;

mod util;
