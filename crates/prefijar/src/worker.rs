//! The background transform worker.
//!
//! All worker state lives inside a single actor task. Requests funnel through
//! one mpsc channel and are handled strictly one at a time, so `init` can
//! never race a `transform` and arrival order is reply order. Each request
//! carries its own oneshot sender and the handler sends exactly one reply on
//! it; there are no timeouts and nothing is retried.

use crate::pipeline::Prefixer;
use crate::protocol::{
    decode_request, PipelineConfig, TransformOptions, TransformOutput, WorkerReply, WorkerRequest,
    WorkerStatus,
};
use crate::result::{PrefijarError, PrefijarResult};
use crate::runner;
use tokio::sync::{mpsc, oneshot};

const REQUEST_QUEUE_DEPTH: usize = 64;

struct Envelope {
    request: WorkerRequest,
    reply_tx: oneshot::Sender<WorkerReply>,
}

/// Spawns the worker actor task.
#[derive(Debug)]
pub struct TransformWorker;

impl TransformWorker {
    /// Spawn a worker with the default browser targets.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn() -> WorkerHandle {
        Self::spawn_with(Prefixer::default())
    }

    /// Spawn a worker around an explicit pipeline.
    #[must_use]
    pub fn spawn_with(prefixer: Prefixer) -> WorkerHandle {
        let (pipeline_available, prefix_plugin_available) = probe_pipeline(&prefixer);
        tracing::info!(
            pipeline_available,
            prefix_plugin_available,
            "transform worker starting"
        );

        let mut state = WorkerState {
            prefixer,
            config: None,
            initialized: false,
            pipeline_available,
            prefix_plugin_available,
        };

        let (tx, mut rx) = mpsc::channel::<Envelope>(REQUEST_QUEUE_DEPTH);
        tokio::spawn(async move {
            while let Some(envelope) = rx.recv().await {
                let reply = state.handle(envelope.request);
                tracing::debug!(reply = reply.kind(), "request handled");
                // receiver gone means the caller stopped waiting; nothing to do
                let _ = envelope.reply_tx.send(reply);
            }
            tracing::debug!("transform worker stopped");
        });

        WorkerHandle { tx }
    }
}

/// Availability flags are decided once, by pushing a trivial stylesheet
/// through the pipeline with and without targets. They never change while
/// the worker runs.
fn probe_pipeline(prefixer: &Prefixer) -> (bool, bool) {
    let options = TransformOptions::default();
    let pipeline = prefixer.process(".probe { color: red; }", &options, false).is_ok();
    let plugin = prefixer
        .process(".probe { display: flex; }", &options, true)
        .map(|out| out.css.contains("-webkit-"))
        .unwrap_or(false);
    (pipeline, plugin)
}

/// Cloneable handle to a running worker.
#[derive(Debug, Clone)]
pub struct WorkerHandle {
    tx: mpsc::Sender<Envelope>,
}

impl WorkerHandle {
    /// Send one request and wait for its reply.
    pub async fn request(&self, request: WorkerRequest) -> PrefijarResult<WorkerReply> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Envelope { request, reply_tx })
            .await
            .map_err(|_| PrefijarError::channel("transform worker is not running"))?;
        reply_rx
            .await
            .map_err(|_| PrefijarError::channel("transform worker dropped the reply"))
    }

    /// Decode a raw JSON envelope and dispatch it.
    ///
    /// Protocol-level failures (unknown or malformed `type`) come back as a
    /// normal error reply without touching worker state; only a dead channel
    /// is an `Err`.
    pub async fn request_raw(&self, text: &str) -> PrefijarResult<WorkerReply> {
        match decode_request(text) {
            Ok(request) => self.request(request).await,
            Err(reply) => Ok(reply),
        }
    }

    /// Store a pipeline configuration.
    pub async fn init(&self, config: Option<PipelineConfig>) -> PrefijarResult<WorkerReply> {
        self.request(WorkerRequest::Init { config }).await
    }

    /// Transform a stylesheet.
    pub async fn transform(
        &self,
        css: impl Into<String>,
        options: Option<TransformOptions>,
    ) -> PrefijarResult<WorkerReply> {
        self.request(WorkerRequest::Transform {
            css_text: css.into(),
            options,
        })
        .await
    }

    /// Run the bundled fixture suite.
    pub async fn run_tests(&self) -> PrefijarResult<WorkerReply> {
        self.request(WorkerRequest::Test).await
    }

    /// Snapshot the worker state.
    pub async fn status(&self) -> PrefijarResult<WorkerStatus> {
        match self.request(WorkerRequest::GetStatus).await? {
            WorkerReply::Status { data } => Ok(data),
            other => Err(PrefijarError::protocol(format!(
                "expected status reply, got {}",
                other.kind()
            ))),
        }
    }
}

struct WorkerState {
    prefixer: Prefixer,
    config: Option<PipelineConfig>,
    initialized: bool,
    pipeline_available: bool,
    prefix_plugin_available: bool,
}

impl WorkerState {
    fn handle(&mut self, request: WorkerRequest) -> WorkerReply {
        match request {
            WorkerRequest::Init { config } => self.handle_init(config),
            WorkerRequest::Transform { css_text, options } => {
                self.handle_transform(css_text, options)
            }
            WorkerRequest::Test => self.handle_test(),
            WorkerRequest::GetStatus => WorkerReply::Status { data: self.status() },
        }
    }

    fn handle_init(&mut self, config: Option<PipelineConfig>) -> WorkerReply {
        if !self.pipeline_available {
            return WorkerReply::InitError {
                error: "css pipeline failed to load".to_string(),
            };
        }
        self.config = Some(config.unwrap_or_default());
        self.initialized = true;
        WorkerReply::InitSuccess {
            message: "transform pipeline ready".to_string(),
            pipeline_available: self.pipeline_available,
            prefix_plugin_available: self.prefix_plugin_available,
        }
    }

    fn handle_transform(
        &self,
        css_text: String,
        options: Option<TransformOptions>,
    ) -> WorkerReply {
        let options = options.unwrap_or_default();
        // options.css wins over the positional payload
        let source = match &options.css {
            Some(css) => {
                if !css_text.is_empty() && css_text != *css {
                    tracing::warn!("options.css overrides the positional payload");
                }
                css.clone()
            }
            None => css_text,
        };

        let prefixer_used = self.prefixer_enabled();
        match self.prefixer.process(&source, &options, prefixer_used) {
            Ok(output) => WorkerReply::TransformSuccess {
                data: TransformOutput {
                    css: output.css,
                    map: output.map,
                    messages: Vec::new(),
                    warnings: output.warnings,
                    processed: true,
                    timestamp: chrono::Utc::now().to_rfc3339(),
                    config: self.config.clone(),
                    prefixer_used,
                },
            },
            Err(e) => WorkerReply::TransformError {
                error: format!("transform failed: {e}"),
                stack: Some(format!("{e:?}")),
            },
        }
    }

    fn handle_test(&self) -> WorkerReply {
        WorkerReply::TestSuccess {
            data: runner::run_fixture_suite(&self.prefixer, self.prefixer_enabled()),
        }
    }

    fn status(&self) -> WorkerStatus {
        WorkerStatus {
            initialized: self.initialized,
            config: self.config.clone(),
            pipeline_available: self.pipeline_available,
            prefix_plugin_available: self.prefix_plugin_available,
        }
    }

    fn prefixer_enabled(&self) -> bool {
        self.prefix_plugin_available
            && self.config.as_ref().map_or(true, |c| c.plugins.prefixer)
    }
}
