use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use panel_shell::{PreferenceStore, StoreError, StoreKey};

use crate::config::panel_dir;

const STORAGE_FILE: &str = "storage.json";

/// Preference store backed by a flat `{ "key": "value" }` JSON file.
///
/// The file is read once on open and rewritten atomically on every change.
/// A file that cannot be read or parsed makes the store unavailable, so the
/// session gate fails closed.
#[derive(Debug)]
pub(crate) struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    broken: Option<String>,
}

impl JsonFileStore {
    /// Open the store at its default location.
    pub(crate) fn open_default() -> Self {
        Self::open(panel_dir().join(STORAGE_FILE))
    }

    pub(crate) fn open(path: PathBuf) -> Self {
        match load_entries(&path) {
            Ok(entries) => Self {
                path,
                entries,
                broken: None,
            },
            Err(err) => {
                log::warn!("store {} unusable: {err}", path.display());
                Self {
                    path,
                    entries: BTreeMap::new(),
                    broken: Some(format!("{err}")),
                }
            },
        }
    }

    fn ensure_usable(&self) -> Result<(), StoreError> {
        match &self.broken {
            Some(reason) => Err(StoreError::Unavailable {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    fn persist(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let payload = serde_json::to_string_pretty(&self.entries)?;
        write_atomic(&self.path, payload.as_bytes())?;
        Ok(())
    }
}

impl PreferenceStore for JsonFileStore {
    fn read(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        self.ensure_usable()?;
        Ok(self.entries.get(key.as_str()).cloned())
    }

    fn write(&mut self, key: StoreKey, value: &str) -> Result<(), StoreError> {
        self.ensure_usable()?;
        self.entries
            .insert(key.as_str().to_string(), value.to_string());
        self.persist()
    }

    fn remove(&mut self, key: StoreKey) -> Result<(), StoreError> {
        self.ensure_usable()?;
        if self.entries.remove(key.as_str()).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}

fn load_entries(path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
    let data = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(BTreeMap::new());
        },
        Err(err) => return Err(err.into()),
    };

    Ok(serde_json::from_str(&data)?)
}

pub(crate) fn write_atomic(
    path: &Path,
    payload: &[u8],
) -> Result<(), std::io::Error> {
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, payload)?;
    fs::rename(tmp_path, path)?;
    Ok(())
}
