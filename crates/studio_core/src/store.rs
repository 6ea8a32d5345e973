use shared::domain::{DesignId, DesignRecord};

/// Session-scoped, newest-first list of generated designs.
///
/// Records are never removed or reordered and there is no upper bound: a long
/// session keeps every design it produced in memory.
#[derive(Debug, Default)]
pub struct DesignCollectionStore {
    records: Vec<DesignRecord>,
}

impl DesignCollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record` at the head. Identical prompts or images are kept as
    /// independent entries.
    pub fn append(&mut self, record: DesignRecord) {
        self.records.insert(0, record);
    }

    pub fn all(&self) -> &[DesignRecord] {
        &self.records
    }

    pub fn get(&self, id: DesignId) -> Option<&DesignRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
