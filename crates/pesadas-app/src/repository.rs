//! Storage wiring for the binaries

use std::path::PathBuf;

use pesadas_domain::service::SystemClock;
use pesadas_infra::persistence::FileStorage;
use pesadas_store::RecordStore;
use pesadas_types::Result;
use tracing::info;

use crate::config::Config;
use crate::view::ViewController;

/// Open file-based storage in the configured data directory
pub fn open_storage(config: &Config) -> Result<FileStorage> {
    FileStorage::open(config.data_dir()?)
}

/// Open the record store in the configured data directory
pub fn open_record_store(config: &Config) -> Result<RecordStore<FileStorage>> {
    open_record_store_at(config.data_dir()?)
}

/// Open the record store at a custom directory
pub fn open_record_store_at(store_dir: PathBuf) -> Result<RecordStore<FileStorage>> {
    let storage = FileStorage::open(store_dir)?;
    info!("Using record storage at {}", storage.store_dir().display());
    RecordStore::load(storage)
}

/// Open a view controller over the configured store, stamping records with
/// local time in the configured format
pub fn open_controller(config: &Config) -> Result<ViewController<FileStorage>> {
    let store = open_record_store(config)?;
    Ok(ViewController::new(
        store,
        SystemClock::new(config.timestamp_format.clone()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_controller_uses_configured_dir() {
        let dir = tempdir().unwrap();
        let config = Config {
            data_dir: Some(dir.path().join("data")),
            ..Config::default()
        };

        let controller = open_controller(&config).unwrap();
        assert!(controller.store().is_empty());
        assert_eq!(
            controller.store().storage().store_dir(),
            dir.path().join("data").as_path()
        );
    }

    #[test]
    fn test_non_utf8_store_file_is_discarded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pesadas.json");
        std::fs::write(&path, [0xff, 0xfe, 0x5b, 0x5d]).unwrap();

        let store = open_record_store_at(dir.path().to_path_buf()).unwrap();
        assert!(store.is_empty());
        assert!(!path.exists());

        // The next session starts clean as well
        let store = open_record_store_at(dir.path().to_path_buf()).unwrap();
        assert!(store.is_empty());
    }
}
