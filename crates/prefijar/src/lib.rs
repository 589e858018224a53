//! Prefijar: CSS Vendor-Prefixing Transform Worker
//!
//! Prefijar (Spanish: "to prefix") wraps a CSS transformation pipeline in a
//! background worker with a typed message protocol, plus a bundled fixture
//! suite that checks the prefixing step actually produces the expected
//! vendor prefixes.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     PREFIJAR Architecture                        │
//! ├──────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────────┐         │
//! │   │ Host       │    │ Worker     │    │ CSS Pipeline   │         │
//! │   │ (CLI/HTTP) │───►│ Actor      │───►│ (lightningcss) │         │
//! │   │            │◄───│ (1 queue)  │◄───│                │         │
//! │   └────────────┘    └────────────┘    └────────────────┘         │
//! │        JSON envelopes      │                                     │
//! │                            ▼                                     │
//! │                     fixture runner ──► TestReport                │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The worker owns all mutable state and handles one request at a time, so
//! callers get exactly one reply per request in arrival order.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

pub mod fixtures;
pub mod pipeline;
pub mod protocol;
pub mod report;
pub mod result;
pub mod runner;
pub mod validator;
pub mod worker;

pub use fixtures::{Fixture, FIXTURES};
pub use pipeline::{default_browsers, PipelineOutput, Prefixer};
pub use protocol::{
    decode_request, PipelineConfig, PluginToggles, TransformOptions, TransformOutput, WorkerReply,
    WorkerRequest, WorkerStatus,
};
pub use report::{CategoryStats, FixtureOutcome, ReportSummary, TestReport};
pub use result::{PrefijarError, PrefijarResult};
pub use runner::run_fixture_suite;
pub use validator::{validate_output, ValidationOutcome};
pub use worker::{TransformWorker, WorkerHandle};
