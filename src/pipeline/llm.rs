//! Agent execution: build the role-conditioned conversation and call the
//! language model.
//!
//! This module is intentionally thin — all prompt text lives in
//! [`crate::prompts`] so the conversation shape can change without touching
//! the iteration or error-handling logic here.
//!
//! ## Iteration budget
//!
//! Each role caps its internal reasoning round-trips (`max_iterations`).
//! A round-trip that yields a blank completion consumes one iteration and
//! is attempted again; exhausting the budget fails the task. Provider
//! errors are not retried at this layer — retry policy, if any, belongs to
//! the provider client itself.

use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::prompts::{document_context, role_system_prompt, task_user_prompt};
use crate::tasks::Task;
use edgequake_llm::{ChatMessage, CompletionOptions, LLMProvider};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// The accounting record of one executed task.
#[derive(Debug, Clone)]
pub struct TaskRun {
    /// Task identifier, for logs.
    pub task_name: &'static str,
    /// The model's textual report, verbatim.
    pub text: String,
    /// Prompt tokens consumed by the final round-trip.
    pub input_tokens: usize,
    /// Completion tokens produced by the final round-trip.
    pub output_tokens: usize,
    /// Wall-clock duration of the task, including all iterations.
    pub duration_ms: u64,
    /// Number of chat round-trips actually used (1-based).
    pub iterations: u32,
}

/// Execute one role/task pair to completion.
///
/// ## Message layout
///
/// 1. **System message** — the role persona (name, backstory, goal)
/// 2. **Context message** *(document-reader tasks only)* — the extracted
///    document text, supplied by the pipeline runner
/// 3. **User message** — the task instruction body, the caller's query, and
///    the expected report shape
pub async fn execute_task(
    provider: &Arc<dyn LLMProvider>,
    task: &Task,
    query: &str,
    document_text: Option<&str>,
    config: &AnalyzerConfig,
) -> Result<TaskRun, AnalyzerError> {
    let start = Instant::now();
    let role = task.role;

    let mut messages = vec![ChatMessage::system(role_system_prompt(role))];
    if let Some(text) = document_text {
        messages.push(ChatMessage::system(document_context(text)));
    }
    messages.push(ChatMessage::user(task_user_prompt(task, query)));

    let options = build_options(config);

    for iteration in 1..=role.max_iterations {
        debug!(
            "Task '{}' ({}): iteration {}/{}",
            task.name, role.name, iteration, role.max_iterations
        );

        let response = with_api_timeout(
            config.api_timeout_secs,
            provider.chat(&messages, Some(&options)),
        )
        .await?
        .map_err(|e| AnalyzerError::LlmApi {
            message: e.to_string(),
        })?;

        if !response.content.trim().is_empty() {
            let duration = start.elapsed();
            debug!(
                "Task '{}': {} input tokens, {} output tokens, {:?}",
                task.name, response.prompt_tokens, response.completion_tokens, duration
            );

            return Ok(TaskRun {
                task_name: task.name,
                text: response.content,
                input_tokens: response.prompt_tokens,
                output_tokens: response.completion_tokens,
                duration_ms: duration.as_millis() as u64,
                iterations: iteration,
            });
        }

        warn!(
            "Task '{}': blank completion on iteration {}/{}",
            task.name, iteration, role.max_iterations
        );
    }

    Err(AnalyzerError::IterationBudgetExhausted {
        role: role.name.to_string(),
        limit: role.max_iterations,
    })
}

/// Bound one chat round-trip by the configured API timeout.
///
/// A stalled provider call surfaces as [`AnalyzerError::LlmApi`] rather than
/// hanging the request; the timeout applies per round-trip, not per task.
async fn with_api_timeout<T>(
    secs: u64,
    fut: impl Future<Output = T>,
) -> Result<T, AnalyzerError> {
    tokio::time::timeout(Duration::from_secs(secs), fut)
        .await
        .map_err(|_| AnalyzerError::LlmApi {
            message: format!("LLM call timed out after {secs}s"),
        })
}

/// Build `CompletionOptions` from the analyzer config.
fn build_options(config: &AnalyzerConfig) -> CompletionOptions {
    CompletionOptions {
        temperature: Some(config.temperature),
        max_tokens: Some(config.max_tokens),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_options_defaults() {
        let config = AnalyzerConfig::default();
        let opts = build_options(&config);
        assert_eq!(opts.temperature, Some(0.2));
        assert_eq!(opts.max_tokens, Some(4096));
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_call_times_out_with_the_configured_bound() {
        let err = with_api_timeout(5, std::future::pending::<()>())
            .await
            .unwrap_err();
        assert!(
            err.to_string().contains("timed out after 5s"),
            "got: {err}"
        );
    }

    #[tokio::test]
    async fn prompt_call_within_the_timeout_passes_through() {
        let value = with_api_timeout(60, async { 42 }).await.unwrap();
        assert_eq!(value, 42);
    }
}
