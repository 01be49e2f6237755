//! Persistent store for weighing records
//!
//! The whole record sequence lives under a single storage key and is
//! re-serialized after every mutation.

use pesadas_domain::{KeyValueStorage, WeighingRecord};
use pesadas_types::{RecordError, Result};
use tracing::{debug, info, warn};

/// Storage key holding the serialized record sequence
pub const STORAGE_KEY: &str = "pesadas";

/// Parse the persisted text into a record sequence.
///
/// A JSON `null` is read as an empty list. Anything that is not an array of
/// valid records is `CorruptPersistedState`.
pub fn parse_records(text: &str) -> std::result::Result<Vec<WeighingRecord>, RecordError> {
    serde_json::from_str::<Option<Vec<WeighingRecord>>>(text)
        .map(Option::unwrap_or_default)
        .map_err(|e| RecordError::CorruptPersistedState(e.to_string()))
}

/// Ordered weighing records plus their durable copy
pub struct RecordStore<S> {
    storage: S,
    records: Vec<WeighingRecord>,
}

impl<S: KeyValueStorage> RecordStore<S> {
    /// Load the record sequence from storage.
    ///
    /// Missing data gives an empty store. Corrupt data is erased and also
    /// gives an empty store; only a failed read is returned as an error.
    pub fn load(mut storage: S) -> Result<Self> {
        let records = match storage.get(STORAGE_KEY)? {
            None => Vec::new(),
            Some(text) => match parse_records(&text) {
                Ok(records) => records,
                Err(e) => {
                    warn!("Discarding persisted records: {}", e);
                    storage.remove(STORAGE_KEY)?;
                    Vec::new()
                }
            },
        };

        debug!("Loaded {} records", records.len());
        Ok(Self { storage, records })
    }

    /// Overwrite the durable copy with the full in-memory sequence
    pub fn persist(&mut self) -> Result<()> {
        let text = serde_json::to_string(&self.records)?;
        self.storage.set(STORAGE_KEY, &text).map_err(|e| {
            warn!("Storage write failed: {}", e);
            RecordError::StorageWriteFailure(e.to_string()).into()
        })
    }

    /// Append a record and persist. Rolled back if the write fails.
    pub fn add(&mut self, record: WeighingRecord) -> Result<()> {
        debug!("Adding record {}", record.identifier());
        self.records.push(record);
        if let Err(e) = self.persist() {
            self.records.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Replace identifier and weights of the record at `index`.
    ///
    /// `recorded_at` is kept. Rolled back if the write fails.
    pub fn edit_at(
        &mut self,
        index: usize,
        identifier: &str,
        empty_weight: f64,
        gross_weight: f64,
    ) -> Result<&WeighingRecord> {
        let len = self.records.len();
        let record = self
            .records
            .get_mut(index)
            .ok_or(RecordError::OutOfRange { index, len })?;

        let previous = record.clone();
        record.amend(identifier, empty_weight, gross_weight)?;
        debug!("Edited record {} ({})", index, record.identifier());

        if let Err(e) = self.persist() {
            self.records[index] = previous;
            return Err(e);
        }
        Ok(&self.records[index])
    }

    /// Remove the record at `index`; later records shift down by one.
    ///
    /// Rolled back if the write fails.
    pub fn remove_at(&mut self, index: usize) -> Result<WeighingRecord> {
        let len = self.records.len();
        if index >= len {
            return Err(RecordError::OutOfRange { index, len }.into());
        }

        let removed = self.records.remove(index);
        debug!("Removed record {} ({})", index, removed.identifier());

        if let Err(e) = self.persist() {
            self.records.insert(index, removed);
            return Err(e);
        }
        Ok(removed)
    }

    /// Drop every record and erase the storage key
    pub fn clear(&mut self) -> Result<()> {
        let previous = std::mem::take(&mut self.records);
        if let Err(e) = self.storage.remove(STORAGE_KEY) {
            warn!("Storage remove failed: {}", e);
            self.records = previous;
            return Err(RecordError::StorageWriteFailure(e.to_string()).into());
        }
        info!("Cleared {} records", previous.len());
        Ok(())
    }

    pub fn records(&self) -> &[WeighingRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&WeighingRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pesadas_infra::persistence::MemoryStorage;

    fn record(id: &str, empty: f64, gross: f64) -> WeighingRecord {
        WeighingRecord::new(id, empty, gross, format!("stamp-{}", id)).unwrap()
    }

    fn store_with(records: &[(&str, f64, f64)]) -> RecordStore<MemoryStorage> {
        let mut store = RecordStore::load(MemoryStorage::new()).unwrap();
        for (id, empty, gross) in records {
            store.add(record(id, *empty, *gross)).unwrap();
        }
        store
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let store = RecordStore::load(MemoryStorage::new()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_null_is_empty() {
        let storage = MemoryStorage::with_entry(STORAGE_KEY, "null");
        let store = RecordStore::load(storage).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_corrupt_value_is_erased_and_store_recovers() {
        let storage = MemoryStorage::with_entry(STORAGE_KEY, "{not json");
        let mut store = RecordStore::load(storage).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.storage().get(STORAGE_KEY).unwrap(), None);

        store.persist().unwrap();
        assert_eq!(store.storage().get(STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_invalid_record_counts_as_corrupt() {
        let text = r#"[{"identifier":"A","emptyWeight":9,"grossWeight":1,"netWeight":-8,"recordedAt":"t"}]"#;
        let store = RecordStore::load(MemoryStorage::with_entry(STORAGE_KEY, text)).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.storage().get(STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_persist_load_round_trip() {
        let store = store_with(&[
            ("AB1", 500.0, 1200.0),
            ("cd2", 0.5, 10.25),
            ("E3", 7.0, 7.0),
            ("F4", 0.1, 1234.5678901234567),
            ("G5", 987.6543210987654, 1e15 + 0.3),
        ]);
        let original = store.records().to_vec();

        let reloaded = RecordStore::load(store.storage().clone()).unwrap();
        assert_eq!(reloaded.records(), original.as_slice());
        for (a, b) in reloaded.records().iter().zip(&original) {
            assert_eq!(a.empty_weight().to_bits(), b.empty_weight().to_bits());
            assert_eq!(a.gross_weight().to_bits(), b.gross_weight().to_bits());
            assert_eq!(a.net_weight(), b.net_weight());
            assert_eq!(a.recorded_at(), b.recorded_at());
        }
    }

    #[test]
    fn test_edit_preserves_recorded_at() {
        let mut store = store_with(&[("AB1", 500.0, 1200.0)]);
        let before = store.get(0).unwrap().recorded_at().to_string();

        let edited = store.edit_at(0, "zz9", 100.0, 900.0).unwrap();
        assert_eq!(edited.identifier(), "ZZ9");
        assert_eq!(edited.net_weight(), 800.0);
        assert_eq!(edited.recorded_at(), before);
    }

    #[test]
    fn test_edit_out_of_range() {
        let mut store = store_with(&[("AB1", 500.0, 1200.0)]);
        let err = store.edit_at(1, "X", 1.0, 2.0).unwrap_err();
        assert_eq!(
            err.as_record(),
            Some(&RecordError::OutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn test_edit_rejects_inverted_weights() {
        let mut store = store_with(&[("AB1", 500.0, 1200.0)]);
        let err = store.edit_at(0, "AB1", 1300.0, 1200.0).unwrap_err();
        assert!(matches!(err.as_record(), Some(RecordError::InvalidWeights { .. })));
        assert_eq!(store.get(0).unwrap().empty_weight(), 500.0);
    }

    #[test]
    fn test_remove_shifts_indices_and_persists() {
        let mut store = store_with(&[("A", 0.0, 1.0), ("B", 0.0, 2.0), ("C", 0.0, 3.0)]);
        let removed = store.remove_at(0).unwrap();
        assert_eq!(removed.identifier(), "A");
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap().identifier(), "B");
        assert_eq!(store.get(1).unwrap().identifier(), "C");

        let persisted = store.storage().get(STORAGE_KEY).unwrap().unwrap();
        let ids: Vec<_> = parse_records(&persisted)
            .unwrap()
            .iter()
            .map(|r| r.identifier().to_string())
            .collect();
        assert_eq!(ids, ["B", "C"]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut store = store_with(&[("A", 0.0, 1.0)]);
        assert!(store.remove_at(5).is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear_removes_key() {
        let mut store = store_with(&[("A", 0.0, 1.0), ("B", 0.0, 2.0)]);
        store.clear().unwrap();
        assert!(store.is_empty());
        assert_eq!(store.storage().get(STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_write_failure_rolls_back_add() {
        let mut store = store_with(&[("A", 0.0, 1.0)]);
        store.storage_mut().set_fail_writes(true);

        let err = store.add(record("B", 0.0, 2.0)).unwrap_err();
        assert!(matches!(err.as_record(), Some(RecordError::StorageWriteFailure(_))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_write_failure_rolls_back_edit_remove_and_clear() {
        let mut store = store_with(&[("A", 0.0, 1.0), ("B", 0.0, 2.0)]);
        let before = store.records().to_vec();
        store.storage_mut().set_fail_writes(true);

        assert!(store.edit_at(0, "Z", 0.0, 5.0).is_err());
        assert!(store.remove_at(1).is_err());
        assert!(store.clear().is_err());
        assert_eq!(store.records(), before.as_slice());
    }
}
