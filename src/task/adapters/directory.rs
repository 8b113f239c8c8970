//! Directory-backed key/value store: one file per key.
//!
//! All file access goes through a capability-scoped [`Dir`] handle opened
//! once at construction, so keys can never escape the storage directory.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;

use crate::task::ports::{KeyValueError, KeyValueResult, KeyValueStore};

const VALUE_EXTENSION: &str = "value";
const STAGING_EXTENSION: &str = "staging";

/// Key/value store persisting each value as a file in a directory.
#[derive(Debug)]
pub struct DirectoryKeyValueStore {
    dir: Dir,
    quota: Option<usize>,
}

impl DirectoryKeyValueStore {
    /// Opens (creating if needed) the storage directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueError::Backend`] when the directory cannot be
    /// created or opened.
    pub fn open(path: &Utf8Path) -> KeyValueResult<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(KeyValueError::backend)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(KeyValueError::backend)?;
        Ok(Self { dir, quota: None })
    }

    /// Limits the total size of stored values to `limit` bytes.
    #[must_use]
    pub const fn with_quota(mut self, limit: usize) -> Self {
        self.quota = Some(limit);
        self
    }

    /// Sums the sizes of stored values other than `excluded_file`.
    fn used_bytes_except(&self, excluded_file: &str) -> KeyValueResult<usize> {
        let mut total: usize = 0;
        for entry in self.dir.entries().map_err(KeyValueError::backend)? {
            let entry = entry.map_err(KeyValueError::backend)?;
            let name = entry.file_name().map_err(KeyValueError::backend)?;
            if name == excluded_file || !is_value_file(&name) {
                continue;
            }
            let len = entry.metadata().map_err(KeyValueError::backend)?.len();
            total = total.saturating_add(usize::try_from(len).unwrap_or(usize::MAX));
        }
        Ok(total)
    }

    fn check_quota(&self, key: &str, file_name: &str, value: &str) -> KeyValueResult<()> {
        let Some(limit) = self.quota else {
            return Ok(());
        };
        let required = self
            .used_bytes_except(file_name)?
            .saturating_add(value.len());
        if required > limit {
            return Err(KeyValueError::QuotaExceeded {
                key: key.to_owned(),
                required,
                limit,
            });
        }
        Ok(())
    }
}

fn is_value_file(name: &str) -> bool {
    Utf8Path::new(name).extension() == Some(VALUE_EXTENSION)
}

/// Maps a key onto its file name, rejecting anything that is not a plain
/// identifier.
fn file_name_for(key: &str) -> KeyValueResult<String> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.'));
    if !valid {
        return Err(KeyValueError::InvalidKey(key.to_owned()));
    }
    Ok(format!("{key}.{VALUE_EXTENSION}"))
}

impl KeyValueStore for DirectoryKeyValueStore {
    fn get(&self, key: &str) -> KeyValueResult<Option<String>> {
        let file_name = file_name_for(key)?;
        match self.dir.read_to_string(&file_name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(KeyValueError::backend(err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> KeyValueResult<()> {
        let file_name = file_name_for(key)?;
        self.check_quota(key, &file_name, value)?;

        // Stage then rename so readers never observe a partially written value.
        let staging_name = format!("{key}.{STAGING_EXTENSION}");
        self.dir
            .write(&staging_name, value)
            .map_err(KeyValueError::backend)?;
        self.dir
            .rename(&staging_name, &self.dir, &file_name)
            .map_err(KeyValueError::backend)
    }

    fn remove(&self, key: &str) -> KeyValueResult<()> {
        let file_name = file_name_for(key)?;
        match self.dir.remove_file(&file_name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(KeyValueError::backend(err)),
        }
    }
}
