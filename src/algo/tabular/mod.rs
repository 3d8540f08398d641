pub mod sarsa;

/// A trait for state and action types that can be used as keys in a [`QTable`](crate::ds::QTable)
pub trait Hashable: Copy + Eq + std::hash::Hash {}

impl<T> Hashable for T where T: Copy + Eq + std::hash::Hash {}
