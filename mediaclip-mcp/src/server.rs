//! MCP server implementation for the mediaclip tools.
//!
//! Declares the tool catalog, validates and unpacks incoming calls,
//! routes them to the matching handler operation, and classifies
//! handler errors into JSON-RPC error codes.

use crate::handler::{
    ExtractFrameParams, GetMediaDurationParams, MediaHandler, SegmentAudioParams, TrimVideoParams,
};
use mediaclip_mcp_common::config::Config;
use mediaclip_mcp_common::error::Error;
use rmcp::{
    model::{
        CallToolResult, Content, ErrorCode, ListResourcesResult, ReadResourceResult,
        ServerCapabilities, ServerInfo,
    },
    ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::info;

/// MCP server for media trimming, frame extraction, and segmentation.
///
/// The transport delivers one call at a time; the server holds no
/// cross-call state beyond the handler's engine configuration.
#[derive(Clone)]
pub struct MediaServer {
    handler: MediaHandler,
}

impl MediaServer {
    /// Create a new MediaServer with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            handler: MediaHandler::new(&config),
        }
    }

    /// Trim a video between two timestamps.
    pub async fn trim_video(&self, params: TrimVideoParams) -> Result<CallToolResult, McpError> {
        info!(video = %params.video_path, "Trimming video");

        let output = self
            .handler
            .trim_video(params)
            .await
            .map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Trimmed video saved to: {}",
            output.display()
        ))]))
    }

    /// Extract a still frame from a video.
    pub async fn extract_frame(
        &self,
        params: ExtractFrameParams,
    ) -> Result<CallToolResult, McpError> {
        info!(video = %params.video_path, timestamp = %params.timestamp, "Extracting frame");

        let output = self
            .handler
            .extract_frame(params)
            .await
            .map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Extracted frame saved to: {}",
            output.display()
        ))]))
    }

    /// Split an audio file into overlapping segments.
    pub async fn segment_audio(
        &self,
        params: SegmentAudioParams,
    ) -> Result<CallToolResult, McpError> {
        info!(
            audio = %params.audio_path,
            segment_duration = params.segment_duration,
            "Segmenting audio"
        );

        let summary = self
            .handler
            .segment_audio(params)
            .await
            .map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Created {} segments in {} (metadata: {})",
            summary.segment_count,
            summary.output_directory.display(),
            summary.metadata_path.display()
        ))]))
    }

    /// Probe a media file's duration.
    pub async fn get_media_duration(
        &self,
        params: GetMediaDurationParams,
    ) -> Result<CallToolResult, McpError> {
        info!(media = %params.media_path, "Probing media duration");

        let duration = self
            .handler
            .get_media_duration(params)
            .await
            .map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Duration: {} seconds",
            duration
        ))]))
    }
}

impl ServerHandler for MediaServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Media clipping server using FFmpeg. \
                 Provides tools for trimming videos, extracting still frames, \
                 and splitting audio into overlapping segments."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _params: Option<rmcp::model::PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<rmcp::model::ListToolsResult, McpError>> + Send + '_
    {
        async move {
            use rmcp::model::ListToolsResult;

            let tools = vec![
                create_tool::<TrimVideoParams>(
                    "trim_video",
                    "Trim a video between two HH:MM:SS timestamps; the cut is written next to the input.",
                ),
                create_tool::<ExtractFrameParams>(
                    "extract_frame",
                    "Extract a single still frame from a video at an HH:MM:SS timestamp.",
                ),
                create_tool::<SegmentAudioParams>(
                    "segment_audio",
                    "Split an audio file into overlapping segments and write a JSON metadata record.",
                ),
                create_tool::<GetMediaDurationParams>(
                    "get_media_duration",
                    "Get the duration of a media file in seconds.",
                ),
            ];

            Ok(ListToolsResult {
                tools,
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn call_tool(
        &self,
        params: rmcp::model::CallToolRequestParam,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move {
            match params.name.as_ref() {
                "trim_video" => {
                    let tool_params: TrimVideoParams = parse_params(params.arguments)?;
                    self.trim_video(tool_params).await
                }
                "extract_frame" => {
                    let tool_params: ExtractFrameParams = parse_params(params.arguments)?;
                    self.extract_frame(tool_params).await
                }
                "segment_audio" => {
                    let tool_params: SegmentAudioParams = parse_params(params.arguments)?;
                    self.segment_audio(tool_params).await
                }
                "get_media_duration" => {
                    let tool_params: GetMediaDurationParams = parse_params(params.arguments)?;
                    self.get_media_duration(tool_params).await
                }
                _ => Err(McpError::new(
                    ErrorCode::METHOD_NOT_FOUND,
                    format!("Unknown tool: {}", params.name),
                    None,
                )),
            }
        }
    }

    fn list_resources(
        &self,
        _params: Option<rmcp::model::PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListResourcesResult, McpError>> + Send + '_ {
        async move {
            // This server doesn't expose any resources
            Ok(ListResourcesResult {
                resources: vec![],
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn read_resource(
        &self,
        params: rmcp::model::ReadResourceRequestParam,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ReadResourceResult, McpError>> + Send + '_ {
        async move {
            Err(McpError::resource_not_found(
                format!("Unknown resource: {}", params.uri),
                None,
            ))
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Classify a handler error into the matching JSON-RPC error code.
///
/// Bad input (missing file, malformed timestamp, bad durations) is the
/// caller's fault; engine and filesystem failures are the server's.
fn to_mcp_error(err: Error) -> McpError {
    match err {
        Error::Validation(_) | Error::NotFound(_) | Error::Config(_) => {
            McpError::invalid_params(err.to_string(), None)
        }
        Error::Ffmpeg(_) | Error::Io(_) | Error::Json(_) => {
            McpError::internal_error(err.to_string(), None)
        }
    }
}

/// Create a tool definition from a parameter type.
fn create_tool<T: JsonSchema>(name: &'static str, description: &'static str) -> rmcp::model::Tool {
    use schemars::schema_for;

    let schema = schema_for!(T);
    let schema_value = serde_json::to_value(&schema).unwrap_or_default();

    let input_schema = match schema_value {
        serde_json::Value::Object(map) => Arc::new(map),
        _ => Arc::new(serde_json::Map::new()),
    };

    rmcp::model::Tool {
        name: Cow::Borrowed(name),
        description: Some(Cow::Borrowed(description)),
        input_schema,
        annotations: None,
        icons: None,
        meta: None,
        output_schema: None,
        title: None,
    }
}

/// Parse tool parameters from JSON arguments.
fn parse_params<T: for<'de> Deserialize<'de>>(
    arguments: Option<serde_json::Map<String, serde_json::Value>>,
) -> Result<T, McpError> {
    arguments
        .map(|args| serde_json::from_value(serde_json::Value::Object(args)))
        .transpose()
        .map_err(|e| McpError::invalid_params(format!("Invalid parameters: {}", e), None))?
        .ok_or_else(|| McpError::invalid_params("Missing parameters", None))
}

// =============================================================================
// Tests
// =============================================================================
