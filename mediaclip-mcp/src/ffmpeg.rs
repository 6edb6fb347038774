//! FFmpeg/FFprobe process adapter.
//!
//! The external engine is an opaque capability: every operation here is
//! a single `ffmpeg`/`ffprobe` invocation awaited to completion. A
//! non-zero exit status surfaces the engine's stderr in the returned
//! error and is never retried.

use mediaclip_mcp_common::config::Config;
use mediaclip_mcp_common::error::Error;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Handle to the external media engine.
#[derive(Debug, Clone)]
pub struct FfmpegEngine {
    ffmpeg: String,
    ffprobe: String,
}

impl FfmpegEngine {
    /// Create an engine handle from the configured binary paths.
    pub fn new(config: &Config) -> Self {
        Self {
            ffmpeg: config.ffmpeg_path.clone(),
            ffprobe: config.ffprobe_path.clone(),
        }
    }

    /// Total duration of a media file in seconds, via ffprobe.
    pub async fn probe_duration(&self, input: &Path) -> Result<f64, Error> {
        let output = Command::new(&self.ffprobe)
            .args(["-v", "quiet", "-print_format", "json", "-show_format"])
            .arg(input)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::ffmpeg(format!(
                "ffprobe failed for '{}': {}",
                input.display(),
                stderr
            )));
        }

        let json: serde_json::Value = serde_json::from_slice(&output.stdout)
            .map_err(|e| Error::ffmpeg(format!("Failed to parse ffprobe output: {}", e)))?;

        json.get("format")
            .and_then(|f| f.get("duration"))
            .and_then(|d| d.as_str())
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| {
                Error::ffmpeg(format!(
                    "ffprobe reported no duration for '{}'",
                    input.display()
                ))
            })
    }

    /// Cut `duration` seconds starting at `start` out of `input`.
    ///
    /// Streams are copied, not re-encoded, so the cut lands on the
    /// nearest keyframe.
    pub async fn trim(
        &self,
        input: &Path,
        start: f64,
        duration: f64,
        output: &Path,
    ) -> Result<(), Error> {
        let input_str = input.to_string_lossy();
        let output_str = output.to_string_lossy();
        let start_str = start.to_string();
        let duration_str = duration.to_string();

        self.run(&[
            "-ss", &start_str,
            "-i", &input_str,
            "-t", &duration_str,
            "-c", "copy",
            &output_str,
        ])
        .await
    }

    /// Extract a single still frame at `timestamp` seconds.
    pub async fn extract_frame(
        &self,
        input: &Path,
        timestamp: f64,
        output: &Path,
    ) -> Result<(), Error> {
        let input_str = input.to_string_lossy();
        let output_str = output.to_string_lossy();
        let timestamp_str = timestamp.to_string();

        self.run(&[
            "-ss", &timestamp_str,
            "-i", &input_str,
            "-frames:v", "1",
            &output_str,
        ])
        .await
    }

    /// Re-encode `duration` seconds of `input` starting at `start` into
    /// `output`. Called once per planned segment.
    pub async fn transcode_segment(
        &self,
        input: &Path,
        start: f64,
        duration: f64,
        output: &Path,
    ) -> Result<(), Error> {
        let input_str = input.to_string_lossy();
        let output_str = output.to_string_lossy();
        let start_str = start.to_string();
        let duration_str = duration.to_string();

        self.run(&[
            "-ss", &start_str,
            "-i", &input_str,
            "-t", &duration_str,
            &output_str,
        ])
        .await
    }

    /// Execute ffmpeg with the given arguments.
    async fn run(&self, args: &[&str]) -> Result<(), Error> {
        debug!(args = ?args, "Running ffmpeg");

        let output = Command::new(&self.ffmpeg)
            .args(["-y"]) // Overwrite output files
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::ffmpeg(format!("ffmpeg failed: {}", stderr)));
        }

        Ok(())
    }
}
