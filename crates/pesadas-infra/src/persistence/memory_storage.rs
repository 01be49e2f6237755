//! In-memory implementation of KeyValueStorage

use std::collections::HashMap;
use std::io;

use pesadas_domain::KeyValueStorage;
use pesadas_types::Error;

/// HashMap-backed storage.
///
/// Writes can be switched to fail, which simulates a full or read-only disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with a single entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.entries.insert(key.to_string(), value.to_string());
        storage
    }

    /// Make every subsequent `set` and `remove` fail
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    fn check_writable(&self) -> Result<(), Error> {
        if self.fail_writes {
            return Err(io::Error::other("storage quota exceeded").into());
        }
        Ok(())
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.check_writable()?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), Error> {
        self.check_writable()?;
        self.entries.remove(key);
        Ok(())
    }
}
