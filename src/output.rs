//! Output types returned by the analysis pipeline.

use serde::{Deserialize, Serialize};

/// The result of running the pipeline against one document.
///
/// `analysis` is the model's report verbatim — the report structure is a
/// prompt instruction, not a verified schema, so the text is opaque here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutput {
    /// The assembled textual analysis.
    pub analysis: String,
    /// Accounting for the run.
    pub stats: AnalysisStats,
}

/// Timing and token accounting for one pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisStats {
    /// Tasks executed (currently always 1).
    pub tasks_run: usize,
    /// Total prompt tokens across all tasks.
    pub total_input_tokens: u64,
    /// Total completion tokens across all tasks.
    pub total_output_tokens: u64,
    /// Chat round-trips used across all tasks.
    pub total_iterations: u32,
    /// Wall-clock time spent extracting document text.
    pub extract_duration_ms: u64,
    /// Wall-clock time spent in LLM calls.
    pub llm_duration_ms: u64,
    /// End-to-end pipeline duration.
    pub total_duration_ms: u64,
}
