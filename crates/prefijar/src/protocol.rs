//! Typed message protocol between the host and the transform worker.
//!
//! Requests and replies are tagged unions over a `type` field, serialized as
//! camelCase JSON. Decoding is two-stage: the envelope is parsed as raw JSON
//! first so that an unknown `type` tag can be reported back verbatim as a
//! generic error reply instead of an opaque deserialization failure.

use crate::report::TestReport;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Plugin toggles carried by the `init` message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfig {
    /// Per-plugin on/off switches
    #[serde(default)]
    pub plugins: PluginToggles,
}

/// Which pipeline plugins are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginToggles {
    /// Vendor-prefixing step
    #[serde(default = "default_true")]
    pub prefixer: bool,
}

impl Default for PluginToggles {
    fn default() -> Self {
        Self { prefixer: true }
    }
}

fn default_true() -> bool {
    true
}

/// Options accompanying a transform request.
///
/// `css`, when present, silently overrides the positional payload. That
/// precedence is documented behavior; callers should avoid sending both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOptions {
    /// Replacement CSS source (wins over the positional payload)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
    /// Logical input filename for diagnostics and source maps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Logical output filename
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Emit a source map alongside the output
    #[serde(default)]
    pub map: bool,
}

/// Successful transform payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOutput {
    /// Transformed CSS
    pub css: String,
    /// Source map JSON, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<Value>,
    /// Informational pipeline messages. Always empty with the current
    /// pipeline, which reports nothing below warning severity; kept on the
    /// wire for hosts that decode the field.
    pub messages: Vec<String>,
    /// Parser warnings recovered during the run
    pub warnings: Vec<String>,
    /// Always true on success
    pub processed: bool,
    /// When the transform completed (RFC 3339)
    pub timestamp: String,
    /// Configuration active for this transform, if any was stored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<PipelineConfig>,
    /// Whether the prefixing step ran
    pub prefixer_used: bool,
}

/// Worker state snapshot returned by `getStatus`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerStatus {
    /// An `init` message has been handled
    pub initialized: bool,
    /// Stored configuration, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<PipelineConfig>,
    /// The CSS pipeline loaded successfully
    pub pipeline_available: bool,
    /// The prefixing step loaded successfully
    pub prefix_plugin_available: bool,
}

/// Inbound messages the worker understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WorkerRequest {
    /// Store a pipeline configuration
    #[serde(rename = "init")]
    Init {
        /// Configuration to store
        #[serde(default)]
        config: Option<PipelineConfig>,
    },
    /// Transform a stylesheet
    #[serde(rename = "transform")]
    Transform {
        /// Positional CSS payload
        #[serde(rename = "cssText", default)]
        css_text: String,
        /// Optional transform options
        #[serde(default, skip_serializing_if = "Option::is_none")]
        options: Option<TransformOptions>,
    },
    /// Run the bundled fixture suite
    #[serde(rename = "test")]
    Test,
    /// Snapshot the worker state
    #[serde(rename = "getStatus")]
    GetStatus,
}

/// Outbound replies. Exactly one is produced per inbound request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
#[allow(clippy::large_enum_variant)]
pub enum WorkerReply {
    /// Configuration stored
    #[serde(rename = "init_success")]
    InitSuccess {
        /// Human-readable confirmation
        message: String,
        /// The CSS pipeline loaded successfully
        #[serde(rename = "pipelineAvailable")]
        pipeline_available: bool,
        /// The prefixing step loaded successfully
        #[serde(rename = "prefixPluginAvailable")]
        prefix_plugin_available: bool,
    },
    /// Configuration could not be stored
    #[serde(rename = "init_error")]
    InitError {
        /// Error message
        error: String,
    },
    /// Transform succeeded
    #[serde(rename = "transform_success")]
    TransformSuccess {
        /// Transform payload
        data: TransformOutput,
    },
    /// Transform failed
    #[serde(rename = "transform_error")]
    TransformError {
        /// Error message, prefixed `"transform failed: "`
        error: String,
        /// Best-effort trace of the underlying failure
        #[serde(skip_serializing_if = "Option::is_none")]
        stack: Option<String>,
    },
    /// Fixture suite completed
    #[serde(rename = "test_success")]
    TestSuccess {
        /// The aggregated report
        data: TestReport,
    },
    /// Fixture suite aborted
    #[serde(rename = "test_error")]
    TestError {
        /// Error message, prefixed `"test run failed: "`
        error: String,
    },
    /// State snapshot
    #[serde(rename = "status")]
    Status {
        /// Current worker state
        data: WorkerStatus,
    },
    /// Generic protocol-level error (unknown or malformed envelope)
    #[serde(rename = "error")]
    Error {
        /// Error message
        error: String,
    },
}

impl WorkerReply {
    /// Wire tag of this reply, for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InitSuccess { .. } => "init_success",
            Self::InitError { .. } => "init_error",
            Self::TransformSuccess { .. } => "transform_success",
            Self::TransformError { .. } => "transform_error",
            Self::TestSuccess { .. } => "test_success",
            Self::TestError { .. } => "test_error",
            Self::Status { .. } => "status",
            Self::Error { .. } => "error",
        }
    }

    /// Whether this reply carries an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::InitError { .. }
                | Self::TransformError { .. }
                | Self::TestError { .. }
                | Self::Error { .. }
        )
    }
}

const KNOWN_TAGS: [&str; 4] = ["init", "transform", "test", "getStatus"];

/// Decode a raw JSON envelope into a request.
///
/// Returns the ready-made error reply on failure so the caller can forward it
/// without touching worker state. An unknown `type` tag is echoed back
/// verbatim in the error message.
pub fn decode_request(text: &str) -> Result<WorkerRequest, WorkerReply> {
    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            return Err(WorkerReply::Error {
                error: format!("invalid message envelope: {e}"),
            })
        }
    };

    let tag = value
        .get("type")
        .and_then(Value::as_str)
        .map(ToString::to_string);

    match serde_json::from_value::<WorkerRequest>(value) {
        Ok(request) => Ok(request),
        Err(e) => match tag {
            Some(tag) if KNOWN_TAGS.contains(&tag.as_str()) => Err(WorkerReply::Error {
                error: format!("invalid {tag} message: {e}"),
            }),
            Some(tag) => Err(WorkerReply::Error {
                error: format!("unknown message type: {tag}"),
            }),
            None => Err(WorkerReply::Error {
                error: "unknown message type: <missing>".to_string(),
            }),
        },
    }
}
