pub mod tabular;

pub use tabular::sarsa::SarsaAgent;
