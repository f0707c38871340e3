//! Pipeline runner: the top-level analysis entry point.
//!
//! The pipeline is strictly sequential — each wired task runs to
//! completion, including all of its language-model round-trips, before the
//! next begins. Roles never delegate to each other, a failure anywhere
//! aborts the run with no partial result, and nothing is retried at this
//! layer.

use crate::agents::Capability;
use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::output::{AnalysisOutput, AnalysisStats};
use crate::pipeline::{extract, llm};
use crate::search::SearchTool;
use crate::tasks::{wired_tasks, Task};
use edgequake_llm::{LLMProvider, ProviderFactory};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Model used when none is configured.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Run the analysis pipeline against one document.
///
/// # Arguments
/// * `query` — the caller's instruction; must already be non-blank (the
///   request handler substitutes [`crate::prompts::DEFAULT_QUERY`] first)
/// * `document_path` — path to a PDF reachable by the text extractor
/// * `config` — pipeline configuration
///
/// # Errors
/// Any extraction or LLM failure aborts the run; no partial result is
/// returned.
pub async fn analyze(
    query: &str,
    document_path: impl AsRef<Path>,
    config: &AnalyzerConfig,
) -> Result<AnalysisOutput, AnalyzerError> {
    let total_start = Instant::now();
    let document_path = document_path.as_ref();
    info!("Starting analysis of '{}'", document_path.display());

    // ── Step 1: Resolve provider ─────────────────────────────────────────
    let provider = resolve_provider(config)?;

    // The web-search collaborator is optional: a missing credential means
    // "capability unavailable", never a failure.
    match SearchTool::from_env() {
        Some(_) => debug!("Web-search capability available"),
        None => debug!("Web-search capability unavailable (SERPER_API_KEY not set)"),
    }

    // ── Step 2: Extract document text ────────────────────────────────────
    // Run the document-reader capability once; every wired task that binds
    // it shares the same extraction.
    let extract_start = Instant::now();
    let document_text = if wired_tasks().iter().any(needs_document) {
        Some(extract::extract_text(document_path).await?)
    } else {
        None
    };
    let extract_duration_ms = extract_start.elapsed().as_millis() as u64;

    // ── Step 3: Execute tasks sequentially ───────────────────────────────
    let llm_start = Instant::now();
    let mut stats = AnalysisStats {
        extract_duration_ms,
        ..Default::default()
    };
    let mut sections: Vec<String> = Vec::new();

    for task in wired_tasks() {
        let text_for_task = if needs_document(task) {
            document_text.as_deref()
        } else {
            None
        };

        let run = llm::execute_task(&provider, task, query, text_for_task, config).await?;
        info!(
            "Task '{}' complete: {} chars, {} iterations, {}ms",
            run.task_name,
            run.text.len(),
            run.iterations,
            run.duration_ms
        );

        stats.tasks_run += 1;
        stats.total_input_tokens += run.input_tokens as u64;
        stats.total_output_tokens += run.output_tokens as u64;
        stats.total_iterations += run.iterations;
        sections.push(run.text);
    }

    stats.llm_duration_ms = llm_start.elapsed().as_millis() as u64;
    stats.total_duration_ms = total_start.elapsed().as_millis() as u64;

    info!(
        "Analysis complete: {} task(s), {}ms total",
        stats.tasks_run, stats.total_duration_ms
    );

    Ok(AnalysisOutput {
        analysis: sections.join("\n\n"),
        stats,
    })
}

/// Whether a task requires the extracted document text.
fn needs_document(task: &&Task) -> bool {
    task.capability == Some(Capability::DocumentReader)
        || task.role.capability == Some(Capability::DocumentReader)
}

/// Instantiate a named provider with the given model.
fn create_provider(
    provider_name: &str,
    model: &str,
) -> Result<Arc<dyn LLMProvider>, AnalyzerError> {
    ProviderFactory::create_llm_provider(provider_name, model).map_err(|e| {
        AnalyzerError::ProviderNotConfigured {
            provider: provider_name.to_string(),
            hint: format!("{e}"),
        }
    })
}

/// Resolve the LLM provider, from most-specific to least-specific.
///
/// 1. **Pre-built provider** (`config.provider`) — the caller constructed
///    and configured the provider entirely; used as-is. Useful in tests or
///    when the caller needs custom middleware.
///
/// 2. **Named provider + model** (`config.provider_name`) — the factory
///    reads the corresponding API key (`OPENAI_API_KEY`, etc.) from the
///    environment.
///
/// 3. **Environment pair** (`FINDOC_LLM_PROVIDER` + `FINDOC_MODEL`) —
///    honoured before full auto-detection so an explicit deployment choice
///    wins even when multiple API keys are present.
///
/// 4. **Full auto-detection** — prefer OpenAI when `OPENAI_API_KEY` is set,
///    otherwise let `ProviderFactory::from_env` scan the known key
///    variables.
fn resolve_provider(config: &AnalyzerConfig) -> Result<Arc<dyn LLMProvider>, AnalyzerError> {
    if let Some(ref provider) = config.provider {
        return Ok(Arc::clone(provider));
    }

    if let Some(ref name) = config.provider_name {
        let model = config.model.as_deref().unwrap_or(DEFAULT_MODEL);
        return create_provider(name, model);
    }

    if let (Ok(prov), Ok(model)) = (
        std::env::var("FINDOC_LLM_PROVIDER"),
        std::env::var("FINDOC_MODEL"),
    ) {
        if !prov.is_empty() && !model.is_empty() {
            return create_provider(&prov, &model);
        }
    }

    if let Ok(openai_key) = std::env::var("OPENAI_API_KEY") {
        if !openai_key.is_empty() {
            let model = config.model.as_deref().unwrap_or(DEFAULT_MODEL);
            return create_provider("openai", model);
        }
    }

    let (llm_provider, _embedding) =
        ProviderFactory::from_env().map_err(|e| AnalyzerError::ProviderNotConfigured {
            provider: "auto".to_string(),
            hint: format!(
                "No LLM provider could be auto-detected from environment.\n\
                Set OPENAI_API_KEY, ANTHROPIC_API_KEY, or configure a provider.\n\
                Error: {}",
                e
            ),
        })?;

    Ok(llm_provider)
}
