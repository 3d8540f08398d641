use std::hash::Hash;

use indexmap::IndexMap;

/// A lazily-grown table of action-value estimates
///
/// Estimates default to `0.0` the first time a `(state, action)` pair is referenced, and each
/// state keeps its actions in first-reference order, so greedy ties resolve to the earliest
/// recorded action.
#[derive(Debug, Clone)]
pub struct QTable<S, A> {
    table: IndexMap<S, IndexMap<A, f32>>,
}

impl<S, A> Default for QTable<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> QTable<S, A> {
    pub fn new() -> Self {
        Self {
            table: IndexMap::new(),
        }
    }
}

impl<S, A> QTable<S, A>
where
    S: Copy + Eq + Hash,
    A: Copy + Eq + Hash,
{
    /// Number of recorded `(state, action)` pairs
    pub fn len(&self) -> usize {
        self.table.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The recorded estimate for a pair, if any
    ///
    /// Unlike [`entry`](QTable::entry), this never grows the table.
    pub fn get(&self, state: S, action: A) -> Option<f32> {
        self.table
            .get(&state)
            .and_then(|actions| actions.get(&action))
            .copied()
    }

    /// Mutable access to the estimate for a pair, inserting the default `0.0` on first access
    pub fn entry(&mut self, state: S, action: A) -> &mut f32 {
        self.table
            .entry(state)
            .or_default()
            .entry(action)
            .or_insert(0.0)
    }

    /// The recorded action with the highest estimate for `state`, restricted to `among`
    ///
    /// Ties resolve to the action recorded first.
    ///
    /// **Returns** `None` when the state has no recorded action within `among`
    pub fn greedy(&self, state: S, among: &[A]) -> Option<A> {
        let actions = self.table.get(&state)?;
        let mut best: Option<(A, f32)> = None;
        for (&action, &value) in actions {
            if !among.contains(&action) {
                continue;
            }
            match best {
                Some((_, top)) if value <= top => {}
                _ => best = Some((action, value)),
            }
        }
        best.map(|(action, _)| action)
    }

    /// Iterate over every recorded `(state, action, estimate)` triple
    pub fn iter(&self) -> impl Iterator<Item = (S, A, f32)> + '_ {
        self.table.iter().flat_map(|(&state, actions)| {
            actions
                .iter()
                .map(move |(&action, &value)| (state, action, value))
        })
    }
}
