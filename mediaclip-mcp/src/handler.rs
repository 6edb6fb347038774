//! Media tool handler and parameter types.
//!
//! This module provides the `MediaHandler` struct and the typed,
//! schema-validated parameter structs for the tools exposed by the
//! server. Each operation pre-validates its arguments, checks that the
//! input file exists, and only then drives the FFmpeg engine.

use crate::ffmpeg::FfmpegEngine;
use crate::segment::{
    plan_segments, segment_filename, SegmentRecord, SegmentsMetadata, METADATA_FILENAME,
};
use crate::time::{time_difference, timestamp_to_seconds};
use mediaclip_mcp_common::config::Config;
use mediaclip_mcp_common::error::Error;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

// =============================================================================
// Constants
// =============================================================================

/// Default container format for trimmed videos.
pub const DEFAULT_TRIM_FORMAT: &str = "mp4";

/// Default image format for extracted frames.
pub const DEFAULT_FRAME_FORMAT: &str = "png";

/// Default audio format for segments.
pub const DEFAULT_SEGMENT_FORMAT: &str = "wav";

/// Default overlap between adjacent segments, in seconds.
pub const DEFAULT_OVERLAP_SECONDS: f64 = 2.0;

/// Default naming pattern for segment files.
pub const DEFAULT_NAMING_PATTERN: &str = "segment_{number}";

// =============================================================================
// Parameter Types
// =============================================================================

/// Parameters for trimming a video.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct TrimVideoParams {
    /// Input video file path.
    pub video_path: String,
    /// Trim start, as an `HH:MM:SS` timestamp.
    pub start_time: String,
    /// Trim end, as an `HH:MM:SS` timestamp. Must be after `start_time`.
    pub end_time: String,
    /// Output container format. Default: "mp4".
    #[serde(default = "default_trim_format")]
    pub output_format: String,
}

fn default_trim_format() -> String {
    DEFAULT_TRIM_FORMAT.to_string()
}

/// Parameters for extracting a still frame from a video.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ExtractFrameParams {
    /// Input video file path.
    pub video_path: String,
    /// Position of the frame, as an `HH:MM:SS` timestamp.
    pub timestamp: String,
    /// Output image format. Default: "png".
    #[serde(default = "default_frame_format")]
    pub output_format: String,
}

fn default_frame_format() -> String {
    DEFAULT_FRAME_FORMAT.to_string()
}

/// Parameters for splitting an audio file into overlapping segments.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct SegmentAudioParams {
    /// Input audio file path.
    pub audio_path: String,
    /// Core segment length in seconds. Must be positive.
    pub segment_duration: f64,
    /// Extra seconds extracted on both sides of each segment. Default: 2.
    #[serde(default = "default_overlap")]
    pub overlap_duration: f64,
    /// Output audio format. Default: "wav".
    #[serde(default = "default_segment_format")]
    pub output_format: String,
    /// Directory the segments and metadata are written to. Created if absent.
    pub output_directory: String,
    /// Segment filename pattern; `{number}` is replaced with the 3-digit,
    /// 1-based segment index. Default: "segment_{number}".
    #[serde(default = "default_naming_pattern")]
    pub naming_pattern: String,
}

fn default_overlap() -> f64 {
    DEFAULT_OVERLAP_SECONDS
}

fn default_segment_format() -> String {
    DEFAULT_SEGMENT_FORMAT.to_string()
}

fn default_naming_pattern() -> String {
    DEFAULT_NAMING_PATTERN.to_string()
}

/// Parameters for probing a media file's duration.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct GetMediaDurationParams {
    /// Input media file path.
    pub media_path: String,
}

// =============================================================================
// Output Types
// =============================================================================

/// Result of a completed `segment_audio` job.
#[derive(Debug, Clone)]
pub struct SegmentJobSummary {
    /// Number of segment files written.
    pub segment_count: usize,
    /// Directory holding the segments.
    pub output_directory: PathBuf,
    /// Path of the metadata record.
    pub metadata_path: PathBuf,
}

// =============================================================================
// MediaHandler
// =============================================================================

/// Handler for the FFmpeg-backed media tools.
#[derive(Debug, Clone)]
pub struct MediaHandler {
    engine: FfmpegEngine,
}

impl MediaHandler {
    /// Create a new MediaHandler with the given configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            engine: FfmpegEngine::new(config),
        }
    }

    /// Trim a video between two timestamps.
    ///
    /// The output lands alongside the input as `<stem>_trimmed.<format>`.
    #[instrument(level = "info", skip(self))]
    pub async fn trim_video(&self, params: TrimVideoParams) -> Result<PathBuf, Error> {
        let input = require_input(&params.video_path).await?;

        let start = timestamp_to_seconds(&params.start_time)?;
        let duration = time_difference(&params.start_time, &params.end_time)?;

        let output = derive_sibling(&input, "_trimmed", &params.output_format);
        self.engine.trim(&input, start, duration, &output).await?;

        info!(output = %output.display(), duration, "Trimmed video");
        Ok(output)
    }

    /// Extract a single still frame from a video.
    ///
    /// The output lands alongside the input as
    /// `<stem>_frame_<HH-MM-SS>.<format>`.
    #[instrument(level = "info", skip(self))]
    pub async fn extract_frame(&self, params: ExtractFrameParams) -> Result<PathBuf, Error> {
        let input = require_input(&params.video_path).await?;

        let timestamp = timestamp_to_seconds(&params.timestamp)?;

        let label = params.timestamp.trim().replace(':', "-");
        let output = derive_sibling(&input, &format!("_frame_{}", label), &params.output_format);
        self.engine
            .extract_frame(&input, timestamp, &output)
            .await?;

        info!(output = %output.display(), timestamp, "Extracted frame");
        Ok(output)
    }

    /// Split an audio file into overlapping segments.
    ///
    /// Segments are transcoded strictly one after another; a failure
    /// aborts the job, leaving already-written segment files in place
    /// and writing no metadata record. The metadata record lands in the
    /// output directory as `segments_metadata.json` once every segment
    /// succeeded.
    #[instrument(level = "info", skip(self))]
    pub async fn segment_audio(
        &self,
        params: SegmentAudioParams,
    ) -> Result<SegmentJobSummary, Error> {
        // Argument validation happens before any file or engine access.
        if !params.segment_duration.is_finite() || params.segment_duration <= 0.0 {
            return Err(Error::validation(format!(
                "segment_duration must be a positive number of seconds, got {}",
                params.segment_duration
            )));
        }
        if !params.overlap_duration.is_finite() || params.overlap_duration < 0.0 {
            return Err(Error::validation(format!(
                "overlap_duration must be a non-negative number of seconds, got {}",
                params.overlap_duration
            )));
        }
        if !params.naming_pattern.contains("{number}") {
            return Err(Error::validation(format!(
                "naming_pattern '{}' must contain a {{number}} placeholder",
                params.naming_pattern
            )));
        }

        let input = require_input(&params.audio_path).await?;

        let output_dir = PathBuf::from(&params.output_directory);
        tokio::fs::create_dir_all(&output_dir).await?;

        let total_duration = self.engine.probe_duration(&input).await?;
        let plan = plan_segments(
            total_duration,
            params.segment_duration,
            params.overlap_duration,
        )?;
        if plan.is_empty() {
            return Err(Error::validation(format!(
                "'{}' has no duration to segment",
                params.audio_path
            )));
        }

        let mut records = Vec::with_capacity(plan.len());
        for (i, segment) in plan.iter().enumerate() {
            let filename = segment_filename(&params.naming_pattern, i + 1, &params.output_format);
            let output = output_dir.join(&filename);

            debug!(
                index = i + 1,
                count = plan.len(),
                output = %output.display(),
                "Transcoding segment"
            );
            self.engine
                .transcode_segment(
                    &input,
                    segment.overlap_start,
                    segment.extracted_duration(),
                    &output,
                )
                .await?;

            records.push(SegmentRecord {
                filename,
                start: segment.start,
                end: segment.end,
                overlap_start: segment.overlap_start,
                overlap_end: segment.overlap_end,
            });
        }

        let metadata = SegmentsMetadata {
            original_file: params.audio_path.clone(),
            segment_duration: params.segment_duration,
            overlap_duration: params.overlap_duration,
            total_duration,
            segment_count: records.len(),
            segments: records,
        };

        let metadata_path = output_dir.join(METADATA_FILENAME);
        let json = serde_json::to_string_pretty(&metadata)?;
        tokio::fs::write(&metadata_path, json).await?;

        info!(
            segments = metadata.segment_count,
            metadata = %metadata_path.display(),
            "Segmented audio"
        );

        Ok(SegmentJobSummary {
            segment_count: metadata.segment_count,
            output_directory: output_dir,
            metadata_path,
        })
    }

    /// Duration of a media file in seconds.
    #[instrument(level = "info", skip(self))]
    pub async fn get_media_duration(&self, params: GetMediaDurationParams) -> Result<f64, Error> {
        let input = require_input(&params.media_path).await?;
        self.engine.probe_duration(&input).await
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Resolve an input path, failing if no file exists there.
async fn require_input(path: &str) -> Result<PathBuf, Error> {
    let input = PathBuf::from(path);
    match tokio::fs::try_exists(&input).await {
        Ok(true) => Ok(input),
        _ => Err(Error::not_found(path)),
    }
}

/// Build `<stem><suffix>.<extension>` next to `input`.
fn derive_sibling(input: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    input.with_file_name(format!("{}{}.{}", stem, suffix, extension))
}

// =============================================================================
// Unit Tests
// =============================================================================
