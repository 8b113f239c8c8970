//! Client-side normalization of completion photos.
//!
//! Uploaded photos are bounded to a maximum width (aspect ratio preserved)
//! and re-encoded as JPEG at a fixed quality before they are attached to a
//! task, keeping each persisted record small. Decoding and encoding run on
//! tokio's blocking pool through [`PhotoNormalizer`] so other store
//! operations are never held up.

mod normalize;

pub use normalize::{PhotoError, PhotoLimits, PhotoNormalizer, normalize_photo, scaled_dimensions};
