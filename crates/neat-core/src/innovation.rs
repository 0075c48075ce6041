//! Process-wide (really: population-wide) registry mapping structural
//! genome changes to stable historical ids, so that two lineages which
//! independently evolve "the same" structural change end up sharing an
//! identifier and can be aligned during crossover.

use crate::genes::NeuronId;
use std::collections::HashMap;

/// The kind of structural change being registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InnovationKind {
    NewLink,
    NewNeuron,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct InnovationKey {
    from: NeuronId,
    to: NeuronId,
    kind: InnovationKind,
}

/// Owned by the [`crate::population::Population`]; created once and never
/// reset for the lifetime of a run. Every reproduction call has exclusive
/// access to it (see the concurrency model in the top-level docs).
#[derive(Debug, Default)]
pub struct InnovationDatabase {
    registered: HashMap<InnovationKey, i64>,
    next_id: i64,
}

impl InnovationDatabase {
    pub fn new() -> Self {
        InnovationDatabase::default()
    }

    /// Returns the existing innovation id for this structural change if one
    /// was already registered in this population, otherwise allocates and
    /// records a new monotonically increasing one.
    pub fn id_for(&mut self, from: NeuronId, to: NeuronId, kind: InnovationKind) -> i64 {
        let key = InnovationKey { from, to, kind };
        if let Some(&id) = self.registered.get(&key) {
            return id;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.registered.insert(key, id);
        id
    }

    /// Number of distinct structural changes registered so far.
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_structural_change_shares_an_id() {
        let mut db = InnovationDatabase::new();
        let a = db.id_for(1, 2, InnovationKind::NewLink);
        let b = db.id_for(1, 2, InnovationKind::NewLink);
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_changes_get_distinct_ids() {
        let mut db = InnovationDatabase::new();
        let a = db.id_for(1, 2, InnovationKind::NewLink);
        let b = db.id_for(1, 3, InnovationKind::NewLink);
        let c = db.id_for(1, 2, InnovationKind::NewNeuron);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn ids_allocate_strictly_increasing() {
        let mut db = InnovationDatabase::new();
        let mut last = db.id_for(0, 1, InnovationKind::NewLink);
        for i in 1..100 {
            let id = db.id_for(i, i + 1, InnovationKind::NewLink);
            assert!(id > last);
            last = id;
        }
    }
}
