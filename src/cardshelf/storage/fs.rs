use super::{validate_key, KeyValueStore};
use crate::error::{CardsError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use uuid::Uuid;

/// File-backed key-value store: key `k` lives in `<root>/k.json`.
pub struct FileKv {
    root: PathBuf,
}

impl FileKv {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(CardsError::Io)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CardsError::Io(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        self.ensure_dir()?;

        // Write to a temp file first so a crash never leaves a half-written slot.
        let tmp = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp, value).map_err(CardsError::Io)?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(CardsError::Io(e));
        }
        Ok(())
    }
}
