//! Runtime configuration assembled from `FIELDWORK_*` environment variables.

use std::sync::Arc;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

use crate::{
    assistant::{
        adapters::gemini::{
            DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_TIMEOUT_SECS,
            GeminiConfig, GeminiTextGenerator,
        },
        ports::TextGenerationResult,
    },
    photo::{PhotoLimits, PhotoNormalizer},
    task::{
        adapters::{
            directory::DirectoryKeyValueStore,
            local_storage::{DEFAULT_ROLE_KEY, DEFAULT_TASKS_KEY, LocalStoragePersistence, StorageKeys},
        },
        domain::{TransitionPolicy, WorkerRoster},
        ports::KeyValueResult,
        services::TaskStoreSettings,
    },
};

const DEFAULT_STORAGE_DIR: &str = ".fieldwork";
const DEFAULT_STORAGE_QUOTA_BYTES: usize = 5 * 1024 * 1024;

const ENV_STORAGE_DIR: &str = "FIELDWORK_STORAGE_DIR";
const ENV_STORAGE_QUOTA_BYTES: &str = "FIELDWORK_STORAGE_QUOTA_BYTES";
const ENV_TASKS_KEY: &str = "FIELDWORK_TASKS_KEY";
const ENV_ROLE_KEY: &str = "FIELDWORK_ROLE_KEY";
const ENV_ROSTER: &str = "FIELDWORK_ROSTER";
const ENV_TRANSITION_POLICY: &str = "FIELDWORK_TRANSITION_POLICY";
const ENV_PHOTO_MAX_WIDTH: &str = "FIELDWORK_PHOTO_MAX_WIDTH";
const ENV_PHOTO_QUALITY: &str = "FIELDWORK_PHOTO_QUALITY";
const ENV_AI_API_KEY: &str = "FIELDWORK_AI_API_KEY";
const ENV_AI_BASE_URL: &str = "FIELDWORK_AI_BASE_URL";
const ENV_AI_MODEL: &str = "FIELDWORK_AI_MODEL";
const ENV_AI_TIMEOUT_SECS: &str = "FIELDWORK_AI_TIMEOUT_SECS";

/// A configuration variable held an unusable value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{variable} is invalid: {reason}")]
pub struct ConfigError {
    variable: &'static str,
    reason: String,
}

impl ConfigError {
    fn new(variable: &'static str, reason: impl Into<String>) -> Self {
        Self {
            variable,
            reason: reason.into(),
        }
    }

    /// Returns the offending environment variable.
    #[must_use]
    pub const fn variable(&self) -> &'static str {
        self.variable
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldworkConfig {
    /// Directory holding the key/value files.
    pub storage_dir: Utf8PathBuf,
    /// Byte quota for stored values; `None` means unlimited.
    pub storage_quota_bytes: Option<usize>,
    /// Keys for the task collection and role flag.
    pub storage_keys: StorageKeys,
    /// Technicians allowed to complete tasks.
    pub roster: WorkerRoster,
    /// Which status changes are allowed.
    pub transition_policy: TransitionPolicy,
    /// Bounds applied to completion photos.
    pub photo_limits: PhotoLimits,
    /// Text-generation service settings.
    pub gemini: GeminiConfig,
}

impl Default for FieldworkConfig {
    fn default() -> Self {
        Self {
            storage_dir: Utf8PathBuf::from(DEFAULT_STORAGE_DIR),
            storage_quota_bytes: Some(DEFAULT_STORAGE_QUOTA_BYTES),
            storage_keys: StorageKeys::default(),
            roster: WorkerRoster::default(),
            transition_policy: TransitionPolicy::default(),
            photo_limits: PhotoLimits::default(),
            gemini: GeminiConfig::default(),
        }
    }
}

impl FieldworkConfig {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for the first variable holding an unusable
    /// value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`; unset and blank values take their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for the first variable holding an unusable
    /// value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let storage_dir = read(ENV_STORAGE_DIR)
            .map_or_else(|| Utf8PathBuf::from(DEFAULT_STORAGE_DIR), Utf8PathBuf::from);
        let storage_quota_bytes = match read(ENV_STORAGE_QUOTA_BYTES) {
            None => Some(DEFAULT_STORAGE_QUOTA_BYTES),
            Some(raw) => Some(parse_number::<usize>(ENV_STORAGE_QUOTA_BYTES, &raw)?)
                .filter(|limit| *limit > 0),
        };
        let storage_keys = StorageKeys::new(
            read(ENV_TASKS_KEY).unwrap_or_else(|| DEFAULT_TASKS_KEY.to_owned()),
            read(ENV_ROLE_KEY).unwrap_or_else(|| DEFAULT_ROLE_KEY.to_owned()),
        );
        let roster = read(ENV_ROSTER)
            .map(|raw| parse_roster(&raw))
            .transpose()?
            .unwrap_or_default();
        let transition_policy = read(ENV_TRANSITION_POLICY)
            .map(|raw| {
                TransitionPolicy::try_from(raw.as_str())
                    .map_err(|value| {
                        ConfigError::new(
                            ENV_TRANSITION_POLICY,
                            format!("unknown policy '{value}', expected strict or permissive"),
                        )
                    })
            })
            .transpose()?
            .unwrap_or_default();

        let max_width = read(ENV_PHOTO_MAX_WIDTH)
            .map(|raw| parse_number::<u32>(ENV_PHOTO_MAX_WIDTH, &raw))
            .transpose()?
            .unwrap_or(PhotoLimits::DEFAULT_MAX_WIDTH);
        let quality = read(ENV_PHOTO_QUALITY)
            .map(|raw| parse_number::<u8>(ENV_PHOTO_QUALITY, &raw))
            .transpose()?
            .unwrap_or(PhotoLimits::DEFAULT_JPEG_QUALITY);
        let photo_limits = PhotoLimits::new(max_width, quality).map_err(|err| {
            let variable = if max_width == 0 {
                ENV_PHOTO_MAX_WIDTH
            } else {
                ENV_PHOTO_QUALITY
            };
            ConfigError::new(variable, err.to_string())
        })?;

        let timeout_secs = read(ENV_AI_TIMEOUT_SECS)
            .map(|raw| parse_number::<u64>(ENV_AI_TIMEOUT_SECS, &raw))
            .transpose()?
            .unwrap_or(DEFAULT_GEMINI_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::new(
                ENV_AI_TIMEOUT_SECS,
                "must be greater than zero",
            ));
        }
        let gemini = GeminiConfig::new(read(ENV_AI_API_KEY))
            .with_base_url(read(ENV_AI_BASE_URL).unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_owned()))
            .with_model(read(ENV_AI_MODEL).unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_owned()))
            .with_timeout(Duration::from_secs(timeout_secs));

        Ok(Self {
            storage_dir,
            storage_quota_bytes,
            storage_keys,
            roster,
            transition_policy,
            photo_limits,
            gemini,
        })
    }

    /// Builds the construction parameters for a task store.
    #[must_use]
    pub fn store_settings(&self) -> TaskStoreSettings {
        TaskStoreSettings::new(self.roster.clone(), self.transition_policy)
    }

    /// Builds the photo normalizer for completion forms.
    #[must_use]
    pub const fn photo_normalizer(&self) -> PhotoNormalizer {
        PhotoNormalizer::new(self.photo_limits)
    }

    /// Opens the directory store and wraps it in the JSON persistence
    /// adapter.
    ///
    /// # Errors
    ///
    /// Returns the storage error when the directory cannot be opened.
    pub fn open_persistence(&self) -> KeyValueResult<LocalStoragePersistence<DirectoryKeyValueStore>> {
        let store = open_directory(&self.storage_dir, self.storage_quota_bytes)?;
        Ok(LocalStoragePersistence::with_keys(
            Arc::new(store),
            self.storage_keys.clone(),
        ))
    }

    /// Builds the HTTP text generator.
    ///
    /// # Errors
    ///
    /// Returns the transport error when the HTTP client cannot be built.
    pub fn text_generator(&self) -> TextGenerationResult<GeminiTextGenerator> {
        GeminiTextGenerator::new(self.gemini.clone())
    }
}

fn open_directory(path: &Utf8Path, quota: Option<usize>) -> KeyValueResult<DirectoryKeyValueStore> {
    let store = DirectoryKeyValueStore::open(path)?;
    Ok(match quota {
        Some(limit) => store.with_quota(limit),
        None => store,
    })
}

fn parse_number<T: std::str::FromStr>(variable: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse()
        .map_err(|_| ConfigError::new(variable, format!("'{raw}' is not a valid number")))
}

fn parse_roster(raw: &str) -> Result<WorkerRoster, ConfigError> {
    let names: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect();
    WorkerRoster::new(names).map_err(|err| ConfigError::new(ENV_ROSTER, err.to_string()))
}
