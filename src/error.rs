//! Error types for the findoc-analyzer library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ExtractError`] — the uploaded document itself is unusable (missing
//!   file, corrupt bytes, image-only scan with no text layer). These map to
//!   the text-extraction contract and carry the offending path.
//!
//! * [`AnalyzerError`] — the analysis pipeline cannot proceed (provider not
//!   configured, LLM API failure, iteration budget exhausted, bad config).
//!   Extraction failures fold into this type via `#[from]` so the pipeline
//!   surfaces a single error to its caller.
//!
//! The HTTP layer collapses both into two status codes: upload validation
//! problems become 400 before any pipeline work starts, and everything that
//! fails inside the pipeline becomes a 500 carrying the underlying message.
//! Transient-file cleanup failures are swallowed at the boundary and never
//! appear in either type.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while extracting plain text from a PDF document.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'")]
    NotFound { path: PathBuf },

    /// The PDF decoder could not open or parse the file (corrupt file, or
    /// non-PDF content behind a `.pdf` extension).
    #[error("Error reading PDF file '{path}': {detail}")]
    Parse { path: PathBuf, detail: String },

    /// Every page decoded but none yielded text — a scanned/image-only PDF.
    #[error("PDF '{path}' appears empty or unreadable (no extractable text)")]
    EmptyContent { path: PathBuf },
}

/// All fatal errors returned by the analysis pipeline.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    // ── Document errors ───────────────────────────────────────────────────
    /// Text extraction failed; see [`ExtractError`] for the case split.
    #[error(transparent)]
    Extraction(#[from] ExtractError),

    // ── LLM errors ────────────────────────────────────────────────────────
    /// The configured provider is not initialised (missing API key etc.).
    #[error("LLM provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    /// The LLM API returned an error. Not retried at this layer.
    #[error("LLM API error: {message}")]
    LlmApi { message: String },

    /// A role used up its reasoning-iteration budget without producing a
    /// usable completion.
    #[error("Role '{role}' exhausted its iteration budget ({limit} iterations) without a result")]
    IterationBudgetExhausted { role: String, limit: u32 },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_carries_path() {
        let e = ExtractError::NotFound {
            path: PathBuf::from("/tmp/q3_report.pdf"),
        };
        assert!(e.to_string().contains("q3_report.pdf"), "got: {e}");
    }

    #[test]
    fn extraction_error_is_transparent() {
        let e: AnalyzerError = ExtractError::EmptyContent {
            path: PathBuf::from("scan.pdf"),
        }
        .into();
        let msg = e.to_string();
        assert!(msg.contains("scan.pdf"));
        assert!(msg.contains("no extractable text"));
    }

    #[test]
    fn iteration_budget_display() {
        let e = AnalyzerError::IterationBudgetExhausted {
            role: "Senior Financial Analyst".into(),
            limit: 3,
        };
        assert!(e.to_string().contains("3 iterations"));
        assert!(e.to_string().contains("Senior Financial Analyst"));
    }

    #[test]
    fn provider_not_configured_display() {
        let e = AnalyzerError::ProviderNotConfigured {
            provider: "openai".into(),
            hint: "Set OPENAI_API_KEY".into(),
        };
        assert!(e.to_string().contains("openai"));
        assert!(e.to_string().contains("OPENAI_API_KEY"));
    }
}
