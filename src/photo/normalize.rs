//! Bounding-box downscale and JPEG recompression.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use thiserror::Error;
use tracing::{debug, warn};

use crate::task::domain::Photo;

/// Errors returned while normalizing a photo.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhotoError {
    /// The payload is not a decodable image.
    #[error("failed to decode photo: {0}")]
    Decode(String),

    /// The resized image could not be re-encoded.
    #[error("failed to encode photo: {0}")]
    Encode(String),

    /// The configured limits are unusable.
    #[error("invalid photo limits: {0}")]
    InvalidLimits(String),

    /// The background normalization job did not finish.
    #[error("photo normalization was interrupted: {0}")]
    Interrupted(String),
}

/// Size and quality bounds applied to every photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoLimits {
    max_width: u32,
    jpeg_quality: u8,
}

impl PhotoLimits {
    /// Default bounding width in pixels.
    pub const DEFAULT_MAX_WIDTH: u32 = 600;

    /// Default JPEG quality factor.
    pub const DEFAULT_JPEG_QUALITY: u8 = 60;

    /// Creates validated limits.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoError::InvalidLimits`] when `max_width` is zero or
    /// `jpeg_quality` lies outside `1..=100`.
    pub fn new(max_width: u32, jpeg_quality: u8) -> Result<Self, PhotoError> {
        if max_width == 0 {
            return Err(PhotoError::InvalidLimits(
                "maximum width must be positive".to_owned(),
            ));
        }
        if !(1..=100).contains(&jpeg_quality) {
            return Err(PhotoError::InvalidLimits(format!(
                "JPEG quality {jpeg_quality} is outside 1..=100"
            )));
        }
        Ok(Self {
            max_width,
            jpeg_quality,
        })
    }

    /// Returns the bounding width in pixels.
    #[must_use]
    pub const fn max_width(self) -> u32 {
        self.max_width
    }

    /// Returns the JPEG quality factor.
    #[must_use]
    pub const fn jpeg_quality(self) -> u8 {
        self.jpeg_quality
    }
}

impl Default for PhotoLimits {
    fn default() -> Self {
        Self {
            max_width: Self::DEFAULT_MAX_WIDTH,
            jpeg_quality: Self::DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Computes output dimensions for an image bounded to `max_width`.
///
/// Images already within bounds keep their size; wider images are scaled
/// down with the height rounded half-up and never below one pixel.
#[must_use]
pub fn scaled_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width {
        return (width, height);
    }
    let scaled = u64::from(height)
        .saturating_mul(u64::from(max_width))
        .saturating_mul(2)
        .saturating_add(u64::from(width))
        .checked_div(u64::from(width).saturating_mul(2))
        .unwrap_or_default();
    let scaled_height = u32::try_from(scaled).unwrap_or(u32::MAX).max(1);
    (max_width, scaled_height)
}

/// Decodes `raw`, bounds it to `limits`, and re-encodes it as JPEG.
///
/// # Errors
///
/// Returns [`PhotoError::Decode`] for unreadable input and
/// [`PhotoError::Encode`] when the JPEG encoder fails.
pub fn normalize_photo(raw: &[u8], limits: PhotoLimits) -> Result<Photo, PhotoError> {
    let decoded =
        image::load_from_memory(raw).map_err(|err| PhotoError::Decode(err.to_string()))?;
    let (width, height) = scaled_dimensions(decoded.width(), decoded.height(), limits.max_width);
    let resized = if (width, height) == (decoded.width(), decoded.height()) {
        decoded
    } else {
        decoded.resize_exact(width, height, FilterType::Triangle)
    };

    let rgb = resized.to_rgb8();
    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, limits.jpeg_quality)
        .encode_image(&rgb)
        .map_err(|err| PhotoError::Encode(err.to_string()))?;

    debug!(
        input_bytes = raw.len(),
        output_bytes = encoded.len(),
        width,
        height,
        "photo normalized"
    );
    Ok(Photo::from_jpeg(&encoded))
}

/// Runs [`normalize_photo`] off the async executor.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhotoNormalizer {
    limits: PhotoLimits,
}

impl PhotoNormalizer {
    /// Creates a normalizer applying `limits`.
    #[must_use]
    pub const fn new(limits: PhotoLimits) -> Self {
        Self { limits }
    }

    /// Returns the limits applied to every photo.
    #[must_use]
    pub const fn limits(&self) -> PhotoLimits {
        self.limits
    }

    /// Normalizes `raw` on the blocking pool.
    ///
    /// Must be awaited inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoError`] when normalization fails or the blocking job
    /// is cancelled or panics.
    pub async fn normalize(&self, raw: Vec<u8>) -> Result<Photo, PhotoError> {
        let limits = self.limits;
        let outcome = tokio::task::spawn_blocking(move || normalize_photo(&raw, limits))
            .await
            .map_err(|err| PhotoError::Interrupted(err.to_string()))?;
        if let Err(err) = &outcome {
            warn!(error = %err, "photo normalization failed; continuing without a photo");
        }
        outcome
    }
}
