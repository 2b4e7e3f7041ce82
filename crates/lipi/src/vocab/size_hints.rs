//! # Buffer Size Hints

/// Expected bytes/token ratio.
///
/// Used when pre-allocating encode and decode buffers.
pub const EXPECTED_BYTES_PER_TOKEN: f32 = 4.0;
