//! Inline photo payload attached to completed tasks.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

const JPEG_DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// Normalized photo stored inline as a `data:` URL.
///
/// Keeping the payload as a self-contained string lets the whole task
/// collection persist as a single JSON value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Photo(String);

impl Photo {
    /// Wraps encoded JPEG bytes.
    #[must_use]
    pub fn from_jpeg(bytes: &[u8]) -> Self {
        Self(format!("{JPEG_DATA_URL_PREFIX}{}", STANDARD.encode(bytes)))
    }

    /// Wraps an existing `data:` URL verbatim.
    #[must_use]
    pub fn from_data_url(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the `data:` URL.
    #[must_use]
    pub fn as_data_url(&self) -> &str {
        &self.0
    }

    /// Decodes the JPEG bytes, if the payload is a base64 JPEG `data:` URL.
    #[must_use]
    pub fn jpeg_bytes(&self) -> Option<Vec<u8>> {
        let encoded = self.0.strip_prefix(JPEG_DATA_URL_PREFIX)?;
        STANDARD.decode(encoded).ok()
    }

    /// Returns the size of the stored payload in bytes.
    #[must_use]
    pub fn stored_len(&self) -> usize {
        self.0.len()
    }
}
