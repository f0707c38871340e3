//! PDF text extraction: the document-reader capability.
//!
//! ## Why spawn_blocking?
//!
//! `lopdf` parses the whole document synchronously and decoding content
//! streams is CPU-bound. `tokio::task::spawn_blocking` moves the work onto
//! the blocking thread pool so the async workers serving other requests are
//! never stalled by a large upload.
//!
//! ## Whitespace normalisation
//!
//! Extracted page text arrives with ragged blank-line runs (PDF text
//! operators emit positioning, not paragraphs). Each page is trimmed and
//! runs of consecutive newlines are collapsed to one before pages are
//! joined, so downstream prompts carry compact text in page order.

use crate::error::ExtractError;
use lopdf::Document;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::{debug, info};

static RE_NEWLINE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());

/// Extract the full plain-text content of a PDF.
///
/// Iterates every page in document order, trims and collapses each page's
/// text, and joins the pages with single newlines.
///
/// # Errors
/// - [`ExtractError::NotFound`] — the path does not exist
/// - [`ExtractError::Parse`] — the decoder cannot open or parse the file
/// - [`ExtractError::EmptyContent`] — no page yielded any text (typically a
///   scanned, image-only PDF)
pub async fn extract_text(path: impl AsRef<Path>) -> Result<String, ExtractError> {
    let path = path.as_ref().to_path_buf();
    let path_for_err = path.clone();

    tokio::task::spawn_blocking(move || extract_text_blocking(&path))
        .await
        .map_err(|e| ExtractError::Parse {
            path: path_for_err,
            detail: format!("extraction task panicked: {e}"),
        })?
}

/// Blocking implementation of [`extract_text`].
pub fn extract_text_blocking(path: &Path) -> Result<String, ExtractError> {
    if !path.exists() {
        return Err(ExtractError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let doc = Document::load(path).map_err(|e| ExtractError::Parse {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    let pages = doc.get_pages();
    debug!("PDF loaded: {} pages", pages.len());

    let mut full_text = String::new();
    for (&page_num, _) in pages.iter() {
        // A page that fails to decode (e.g. image-only content with no text
        // operators) contributes nothing rather than failing the document.
        let page_text = match doc.extract_text(&[page_num]) {
            Ok(t) => t,
            Err(e) => {
                debug!("Page {page_num}: no extractable text ({e})");
                continue;
            }
        };

        let trimmed = page_text.trim();
        if trimmed.is_empty() {
            continue;
        }

        let collapsed = RE_NEWLINE_RUNS.replace_all(trimmed, "\n");
        full_text.push_str(&collapsed);
        full_text.push('\n');
    }

    let full_text = full_text.trim();
    if full_text.is_empty() {
        return Err(ExtractError::EmptyContent {
            path: path.to_path_buf(),
        });
    }

    info!(
        "Extracted {} chars from {} pages of '{}'",
        full_text.len(),
        pages.len(),
        path.display()
    );
    Ok(full_text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newline_runs_collapse_to_single() {
        let collapsed = RE_NEWLINE_RUNS.replace_all("a\n\n\n\nb\n\nc", "\n");
        assert_eq!(collapsed, "a\nb\nc");
    }

    #[test]
    fn single_newlines_are_preserved() {
        let collapsed = RE_NEWLINE_RUNS.replace_all("a\nb\nc", "\n");
        assert_eq!(collapsed, "a\nb\nc");
    }

    #[test]
    fn nonexistent_path_is_not_found() {
        let err = extract_text_blocking(Path::new("/definitely/not/here.pdf")).unwrap_err();
        assert!(matches!(err, ExtractError::NotFound { .. }), "got: {err}");
    }
}
