//! Pipeline stages for document analysis.
//!
//! Each submodule implements exactly one step, so stages are independently
//! testable and the extraction backend could be swapped without touching
//! the agent-execution code.
//!
//! ## Data Flow
//!
//! ```text
//! upload ──▶ extract ──▶ llm
//! (path)     (lopdf)     (role-conditioned chat)
//! ```
//!
//! 1. [`extract`] — pull plain text from the PDF in page order; runs in
//!    `spawn_blocking` because lopdf parsing is CPU-bound
//! 2. [`llm`] — build the role/task conversation and drive the chat
//!    round-trips under the role's iteration budget; the only stage with
//!    network I/O

pub mod extract;
pub mod llm;
