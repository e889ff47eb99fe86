//! Product segmentation
//!
//! Segmented products contain one or more *segments*, each with
//! its own zones, VTEC, and text. Segments are terminated by
//! `$$`. Whatever follows the last terminator is usually a
//! forecaster sign-off or other trailing filler.

/// Segment terminator
pub const SEGMENT_TERMINATOR: &str = "$$";

/// Segments shorter than this are filler, not segments
pub const MIN_SEGMENT_LEN: usize = 20;

/// Split product text into segments
///
/// Each segment is trimmed of surrounding whitespace. Candidates
/// shorter than [`MIN_SEGMENT_LEN`] are discarded. Segments are
/// returned in the order they appear.
pub fn split_segments(text: &str) -> impl Iterator<Item = &str> {
    text.split(SEGMENT_TERMINATOR)
        .map(str::trim)
        .filter(|segment| segment.len() >= MIN_SEGMENT_LEN)
}
