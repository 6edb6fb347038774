//! Segment planning for overlapped audio splitting.
//!
//! The planner walks a cursor from zero to the total duration, emitting
//! contiguous core segments of at most `segment_duration` seconds. Each
//! segment additionally carries an extraction window widened by the
//! overlap on both sides and clamped to the media bounds, so adjacent
//! segments share context for downstream processing.

use mediaclip_mcp_common::error::Error;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Filename of the sidecar record written next to the segment files.
pub const METADATA_FILENAME: &str = "segments_metadata.json";

/// One planned slice of an input duration.
///
/// Core bounds `[start, end]` are contiguous with the neighboring
/// segments; `[overlap_start, overlap_end]` bound the slice actually
/// extracted.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentDescriptor {
    /// Core segment start, seconds from the beginning of the input.
    pub start: f64,
    /// Core segment end, seconds.
    pub end: f64,
    /// Start of the extraction window, `<= start`, never negative.
    pub overlap_start: f64,
    /// End of the extraction window, `>= end`, never past the total.
    pub overlap_end: f64,
}

impl SegmentDescriptor {
    /// Length of the extracted window, overlap included.
    pub fn extracted_duration(&self) -> f64 {
        self.overlap_end - self.overlap_start
    }
}

/// Plan contiguous segments covering `[0, total_duration]`.
///
/// The plan holds `ceil(total_duration / segment_duration)` segments;
/// the final one may be shorter than `segment_duration`. A
/// `total_duration <= 0` yields an empty plan, which callers treat as
/// having nothing to segment.
///
/// # Errors
/// `segment_duration <= 0` would never terminate and is rejected, as is
/// a negative `overlap_duration`. An overlap at least as long as the
/// segments is permitted and only warned about.
pub fn plan_segments(
    total_duration: f64,
    segment_duration: f64,
    overlap_duration: f64,
) -> Result<Vec<SegmentDescriptor>, Error> {
    if !segment_duration.is_finite() || segment_duration <= 0.0 {
        return Err(Error::validation(format!(
            "segment_duration must be a positive number of seconds, got {}",
            segment_duration
        )));
    }
    if !overlap_duration.is_finite() || overlap_duration < 0.0 {
        return Err(Error::validation(format!(
            "overlap_duration must be a non-negative number of seconds, got {}",
            overlap_duration
        )));
    }
    if overlap_duration >= segment_duration {
        warn!(
            overlap_duration,
            segment_duration, "overlap is at least as long as the segments; windows will overlap heavily"
        );
    }

    let mut segments = Vec::new();
    if total_duration <= 0.0 {
        return Ok(segments);
    }

    let mut cursor = 0.0;
    while cursor < total_duration {
        let end = (cursor + segment_duration).min(total_duration);
        segments.push(SegmentDescriptor {
            start: cursor,
            end,
            overlap_start: (cursor - overlap_duration).max(0.0),
            overlap_end: (end + overlap_duration).min(total_duration),
        });
        cursor = end;
    }

    Ok(segments)
}

/// Derive a segment filename from a `{number}` naming pattern.
///
/// The index is 1-based and zero-padded to three digits:
/// `segment_filename("clip_{number}", 2, "wav")` is `clip_002.wav`.
pub fn segment_filename(pattern: &str, index: usize, format: &str) -> String {
    format!(
        "{}.{}",
        pattern.replace("{number}", &format!("{:03}", index)),
        format
    )
}

// =============================================================================
// Metadata Record
// =============================================================================

/// Sidecar record describing a completed segmentation job, written as
/// [`METADATA_FILENAME`] into the output directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentsMetadata {
    /// Path of the segmented source file, as given by the caller.
    pub original_file: String,
    /// Configured core segment length in seconds.
    pub segment_duration: f64,
    /// Configured overlap length in seconds.
    pub overlap_duration: f64,
    /// Probed total duration of the source, seconds.
    pub total_duration: f64,
    /// Number of segments written.
    pub segment_count: usize,
    /// Per-segment bounds, in playback order.
    pub segments: Vec<SegmentRecord>,
}

/// Per-segment entry of [`SegmentsMetadata`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub filename: String,
    pub start: f64,
    pub end: f64,
    pub overlap_start: f64,
    pub overlap_end: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_matches_expected_bounds() {
        // 65 seconds in 30-second segments with 5 seconds of overlap
        let plan = plan_segments(65.0, 30.0, 5.0).unwrap();

        assert_eq!(plan.len(), 3);

        assert_eq!(plan[0].start, 0.0);
        assert_eq!(plan[0].end, 30.0);
        assert_eq!(plan[0].overlap_start, 0.0);
        assert_eq!(plan[0].overlap_end, 35.0);

        assert_eq!(plan[1].start, 30.0);
        assert_eq!(plan[1].end, 60.0);
        assert_eq!(plan[1].overlap_start, 25.0);
        assert_eq!(plan[1].overlap_end, 65.0);

        assert_eq!(plan[2].start, 60.0);
        assert_eq!(plan[2].end, 65.0);
        assert_eq!(plan[2].overlap_start, 55.0);
        assert_eq!(plan[2].overlap_end, 65.0);
    }

    #[test]
    fn test_plan_exact_multiple() {
        let plan = plan_segments(60.0, 30.0, 0.0).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[1].end, 60.0);
    }

    #[test]
    fn test_plan_single_short_segment() {
        let plan = plan_segments(10.0, 30.0, 5.0).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].start, 0.0);
        assert_eq!(plan[0].end, 10.0);
        // Overlap clamped on both sides
        assert_eq!(plan[0].overlap_start, 0.0);
        assert_eq!(plan[0].overlap_end, 10.0);
    }

    #[test]
    fn test_plan_empty_for_non_positive_total() {
        assert!(plan_segments(0.0, 30.0, 5.0).unwrap().is_empty());
        assert!(plan_segments(-10.0, 30.0, 5.0).unwrap().is_empty());
    }

    #[test]
    fn test_plan_rejects_non_positive_segment_duration() {
        assert!(plan_segments(65.0, 0.0, 5.0).is_err());
        assert!(plan_segments(65.0, -30.0, 5.0).is_err());
    }

    #[test]
    fn test_plan_rejects_negative_overlap() {
        assert!(plan_segments(65.0, 30.0, -1.0).is_err());
    }

    #[test]
    fn test_plan_permits_overlap_exceeding_segment() {
        // Heavily overlapping windows are allowed, just noisy
        let plan = plan_segments(30.0, 10.0, 15.0).unwrap();
        assert_eq!(plan.len(), 3);
        assert_eq!(plan[1].overlap_start, 0.0);
        assert_eq!(plan[1].overlap_end, 30.0);
    }

    #[test]
    fn test_extracted_duration() {
        let segment = SegmentDescriptor {
            start: 30.0,
            end: 60.0,
            overlap_start: 25.0,
            overlap_end: 65.0,
        };
        assert_eq!(segment.extracted_duration(), 40.0);
    }

    #[test]
    fn test_segment_filename_padding() {
        assert_eq!(segment_filename("segment_{number}", 1, "wav"), "segment_001.wav");
        assert_eq!(segment_filename("clip_{number}", 2, "wav"), "clip_002.wav");
        assert_eq!(segment_filename("part_{number}", 42, "mp3"), "part_042.mp3");
        assert_eq!(segment_filename("s_{number}", 1000, "wav"), "s_1000.wav");
    }

    #[test]
    fn test_metadata_serializes_expected_fields() {
        let metadata = SegmentsMetadata {
            original_file: "/audio/show.wav".to_string(),
            segment_duration: 30.0,
            overlap_duration: 5.0,
            total_duration: 65.0,
            segment_count: 3,
            segments: vec![SegmentRecord {
                filename: "segment_001.wav".to_string(),
                start: 0.0,
                end: 30.0,
                overlap_start: 0.0,
                overlap_end: 35.0,
            }],
        };

        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["original_file"], "/audio/show.wav");
        assert_eq!(json["segment_count"], 3);
        assert_eq!(json["segments"][0]["filename"], "segment_001.wav");
        assert_eq!(json["segments"][0]["overlap_end"], 35.0);
    }
}

// =============================================================================
// Property-Based Tests
// =============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    // Integer-valued durations keep the coverage and count assertions
    // exact; fractional inputs go through the same arithmetic.

    fn total_strategy() -> impl Strategy<Value = f64> {
        (1u32..=36_000u32).prop_map(f64::from)
    }

    fn segment_strategy() -> impl Strategy<Value = f64> {
        (1u32..=600u32).prop_map(f64::from)
    }

    fn overlap_strategy() -> impl Strategy<Value = f64> {
        (0u32..=60u32).prop_map(f64::from)
    }

    proptest! {
        /// Core segments are contiguous and cover the full duration.
        #[test]
        fn segments_are_contiguous_and_cover(
            total in total_strategy(),
            segment in segment_strategy(),
            overlap in overlap_strategy()
        ) {
            let plan = plan_segments(total, segment, overlap).unwrap();

            prop_assert!(!plan.is_empty());
            prop_assert_eq!(plan[0].start, 0.0, "First segment starts at zero");
            prop_assert_eq!(
                plan[plan.len() - 1].end,
                total,
                "Last segment ends at the total duration"
            );

            for pair in plan.windows(2) {
                prop_assert_eq!(
                    pair[0].end,
                    pair[1].start,
                    "Adjacent core segments must be contiguous"
                );
            }
        }

        /// The plan holds the minimal number of segments.
        #[test]
        fn segment_count_is_minimal(
            total in total_strategy(),
            segment in segment_strategy()
        ) {
            let plan = plan_segments(total, segment, 0.0).unwrap();
            let expected = (total / segment).ceil() as usize;

            prop_assert_eq!(plan.len(), expected);
        }

        /// No segment is longer than the configured duration.
        #[test]
        fn segments_respect_max_length(
            total in total_strategy(),
            segment in segment_strategy(),
            overlap in overlap_strategy()
        ) {
            let plan = plan_segments(total, segment, overlap).unwrap();

            for s in &plan {
                prop_assert!(s.end > s.start, "Segments have positive length");
                prop_assert!(
                    s.end - s.start <= segment,
                    "Core segment of {} exceeds configured duration {}",
                    s.end - s.start,
                    segment
                );
            }
        }

        /// Overlap bounds are clamped to the media bounds.
        #[test]
        fn overlap_bounds_are_clamped(
            total in total_strategy(),
            segment in segment_strategy(),
            overlap in overlap_strategy()
        ) {
            let plan = plan_segments(total, segment, overlap).unwrap();

            for s in &plan {
                prop_assert!(s.overlap_start >= 0.0, "Overlap start never negative");
                prop_assert!(s.overlap_start <= s.start, "Overlap start never past core start");
                prop_assert!(s.overlap_end >= s.end, "Overlap end never before core end");
                prop_assert!(s.overlap_end <= total, "Overlap end never exceeds total");
            }
        }

        /// Filenames substitute the padded 1-based index.
        #[test]
        fn filename_substitutes_index(index in 1usize..=999usize) {
            let name = segment_filename("segment_{number}", index, "wav");
            prop_assert_eq!(name, format!("segment_{:03}.wav", index));
        }
    }
}
