use std::collections::HashMap;

use shared::{LocationRecord, normalize_key};

/// Every base seen during the session, keyed by normalised name.
#[derive(Debug, Default)]
pub struct BaseDirectory {
    records: HashMap<String, LocationRecord>,
}

impl BaseDirectory {
    /// Inserts `records`, replacing entries with the same key.
    pub fn merge(&mut self, records: &[LocationRecord]) {
        for record in records {
            self.records.insert(record.key(), record.clone());
        }
    }

    pub fn get(&self, name: &str) -> Option<&LocationRecord> {
        self.records.get(&normalize_key(name))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
