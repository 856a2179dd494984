use crate::types::*;

/// The replay ledger. Entries are written once, on first admission, and never removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessedEventsSubstate {
    pub processed: BTreeMap<Hash, bool>,
}

impl ProcessedEventsSubstate {
    pub fn is_processed(&self, identifier: &Hash) -> bool {
        self.processed.get(identifier).copied().unwrap_or(false)
    }

    pub fn mark_processed(&mut self, identifier: Hash) {
        self.processed.insert(identifier, true);
    }

    pub fn len(&self) -> usize {
        self.processed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processed.is_empty()
    }
}
