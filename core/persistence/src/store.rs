//! FILENAME: core/persistence/src/store.rs
//! Holder for the single, most recently loaded dataset.
//!
//! The table is parsed outside the lock and then published by swapping an
//! `Arc<Table>`. Readers clone the `Arc`, so a reader always sees either the
//! previous table or the new one in full.

use std::sync::{Arc, RwLock};

use engine::Table;
use log::{info, warn};

use crate::csv_reader::load_csv;
use crate::{LoadError, NoDatasetError};

#[derive(Debug, Default)]
pub struct DatasetStore {
    current: RwLock<Option<Arc<Table>>>,
}

impl DatasetStore {
    /// Creates a store with nothing loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `bytes` and makes the result the current dataset.
    /// On failure the previously loaded dataset stays active.
    pub fn load(&self, bytes: &[u8]) -> Result<Arc<Table>, LoadError> {
        let table = load_csv(bytes).map_err(|e| {
            warn!("rejected dataset ({} bytes): {}", bytes.len(), e);
            e
        })?;
        Ok(self.replace(table))
    }

    /// Like `load`, but also rejects input that lacks any of `required`.
    pub fn load_validated(&self, bytes: &[u8], required: &[&str]) -> Result<Arc<Table>, LoadError> {
        let table = load_csv(bytes).map_err(|e| {
            warn!("rejected dataset ({} bytes): {}", bytes.len(), e);
            e
        })?;
        if let Err(e) = table.require_columns(required) {
            warn!("rejected dataset: {}", e);
            return Err(e.into());
        }
        Ok(self.replace(table))
    }

    /// Publishes an already-built table.
    pub fn replace(&self, table: Table) -> Arc<Table> {
        let table = Arc::new(table);
        info!(
            "dataset loaded: {} rows x {} columns",
            table.row_count(),
            table.column_count()
        );
        *self.write_guard() = Some(Arc::clone(&table));
        table
    }

    /// The active dataset, if any.
    pub fn current(&self) -> Option<Arc<Table>> {
        self.read_guard().clone()
    }

    pub fn require(&self) -> Result<Arc<Table>, NoDatasetError> {
        self.current().ok_or(NoDatasetError)
    }

    pub fn is_loaded(&self) -> bool {
        self.read_guard().is_some()
    }

    // Poisoning is ignored: the guarded value only ever changes by one assignment.
    fn read_guard(&self) -> std::sync::RwLockReadGuard<'_, Option<Arc<Table>>> {
        self.current.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_guard(&self) -> std::sync::RwLockWriteGuard<'_, Option<Arc<Table>>> {
        self.current.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    const SHOES: &[u8] = b"name,price\nShoe,10\nBoot,20\n";
    const HATS: &[u8] = b"name,price\nHat,5\n";

    #[test]
    fn test_starts_empty() {
        let store = DatasetStore::new();
        assert!(store.current().is_none());
        assert!(!store.is_loaded());
        assert_eq!(store.require().unwrap_err(), NoDatasetError);
    }

    #[test]
    fn test_load_replaces_previous() {
        let store = DatasetStore::new();
        store.load(SHOES).unwrap();
        assert_eq!(store.current().unwrap().row_count(), 2);

        store.load(HATS).unwrap();
        assert_eq!(store.current().unwrap().row_count(), 1);
    }

    #[test]
    fn test_failed_load_keeps_previous() {
        let store = DatasetStore::new();
        store.load(SHOES).unwrap();

        assert!(store.load(b"").is_err());
        assert!(store.load(b"name,price\nShoe,1,2\n").is_err());

        assert_eq!(store.current().unwrap().row_count(), 2);
    }

    #[test]
    fn test_reader_keeps_its_snapshot() {
        let store = DatasetStore::new();
        store.load(SHOES).unwrap();
        let snapshot = store.current().unwrap();

        store.load(HATS).unwrap();
        assert_eq!(snapshot.row_count(), 2);
        assert_eq!(store.current().unwrap().row_count(), 1);
    }

    #[test]
    fn test_load_validated_rejects_missing_columns() {
        let store = DatasetStore::new();
        let result = store.load_validated(SHOES, &["name", "color"]);
        assert!(matches!(result, Err(LoadError::Schema(_))));
        assert!(store.current().is_none());

        store.load_validated(SHOES, &["name", "price"]).unwrap();
        assert!(store.is_loaded());
    }

    #[test]
    fn test_concurrent_readers_see_whole_tables() {
        let store = Arc::new(DatasetStore::new());
        store.load(SHOES).unwrap();

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..200 {
                        let table = store.current().unwrap();
                        let rows = table.row_count();
                        assert!(rows == 1 || rows == 2);
                        assert_eq!(table.column("name").unwrap().len(), rows);
                    }
                })
            })
            .collect();

        for i in 0..50 {
            store.load(if i % 2 == 0 { HATS } else { SHOES }).unwrap();
        }

        for reader in readers {
            reader.join().unwrap();
        }
    }
}
