//! Mediaclip MCP Server
//!
//! MCP server for media clipping using FFmpeg.
//!
//! # Tools
//!
//! - `trim_video` - Trim a video between two timestamps
//! - `extract_frame` - Extract a still frame from a video
//! - `segment_audio` - Split audio into overlapping segments
//! - `get_media_duration` - Probe a media file's duration
//!
//! # Usage
//!
//! ```bash
//! # Run with stdio transport (default)
//! mediaclip-mcp
//!
//! # Run with HTTP transport
//! mediaclip-mcp --transport http --port 8080
//! ```

use anyhow::Result;
use clap::Parser;
use mediaclip_mcp::MediaServer;
use mediaclip_mcp_common::{Config, McpServerBuilder, TransportArgs};

#[derive(Parser, Debug)]
#[command(name = "mediaclip-mcp")]
#[command(about = "MCP server for media trimming, frame extraction, and audio segmentation using FFmpeg")]
#[command(version)]
struct Args {
    #[command(flatten)]
    transport: TransportArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    mediaclip_mcp_common::tracing::init_tracing();

    // Parse command-line arguments
    let args = Args::parse();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!(
        ffmpeg = %config.ffmpeg_path,
        ffprobe = %config.ffprobe_path,
        "Starting mediaclip-mcp server"
    );

    // Create server
    let server = MediaServer::new(config);

    // Get transport configuration
    let transport = args.transport.into_transport();

    // Run server
    McpServerBuilder::new(server)
        .with_transport(transport)
        .run()
        .await?;

    Ok(())
}
