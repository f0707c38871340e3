//! # findoc-analyzer
//!
//! Analyze financial PDF documents with role-specialized LLM agents.
//!
//! An uploaded PDF and a natural-language query are run through a fixed
//! sequential pipeline: the document's text is extracted page by page, a
//! role-conditioned agent reads it, and the model's structured report is
//! returned verbatim. Nothing is persisted beyond the lifetime of one
//! request.
//!
//! ## Pipeline Overview
//!
//! ```text
//! upload
//!  │
//!  ├─ 1. Validate  .pdf extension, non-empty bytes, default query
//!  ├─ 2. Store     transient uuid-named file (removed on every exit path)
//!  ├─ 3. Extract   page-ordered plain text via lopdf (spawn_blocking)
//!  ├─ 4. Agent     role persona + task prompt → LLM chat round-trips
//!  └─ 5. Respond   {"status", "file_processed", "analysis"}
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use findoc_analyzer::{analyze, AnalyzerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Provider auto-detected from OPENAI_API_KEY / ANTHROPIC_API_KEY / …
//!     let config = AnalyzerConfig::default();
//!     let output = analyze("Summarize cash flow", "q3_report.pdf", &config).await?;
//!     println!("{}", output.analysis);
//!     Ok(())
//! }
//! ```
//!
//! ## Roles and tasks
//!
//! Four roles (analyst, verifier, advisor, risk assessor) and four tasks
//! are defined as process-wide constants. Only the analysis task is wired
//! into the live pipeline; the rest are documented extension points — see
//! [`tasks::wired_tasks`].
//!
//! ## Feature Flags
//!
//! | Feature  | Default | Description |
//! |----------|---------|-------------|
//! | `server` | on      | Enables the `findoc-server` binary and the axum [`server`] module |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod agents;
pub mod analyze;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod prompts;
pub mod search;
pub mod tasks;

#[cfg(feature = "server")]
pub mod server;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use agents::{Capability, Role};
pub use analyze::analyze;
pub use config::{AnalyzerConfig, AnalyzerConfigBuilder};
pub use error::{AnalyzerError, ExtractError};
pub use output::{AnalysisOutput, AnalysisStats};
pub use prompts::DEFAULT_QUERY;
pub use search::SearchTool;
pub use tasks::Task;
