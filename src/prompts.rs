//! Prompt assembly for agent execution.
//!
//! Centralising prompt construction here serves two purposes:
//!
//! 1. **Single source of truth** — the mapping from role/task data to chat
//!    messages lives in exactly one place, so changing the conversation
//!    shape never touches pipeline or error-handling code.
//!
//! 2. **Testability** — unit tests inspect assembled prompts directly
//!    without calling a real LLM, so prompt regressions are cheap to catch.

use crate::agents::Role;
use crate::tasks::Task;

/// Query substituted when the caller supplies none (or only whitespace).
pub const DEFAULT_QUERY: &str = "Analyze this financial document";

/// Build the system message conditioning the model as the given role.
pub fn role_system_prompt(role: &Role) -> String {
    format!(
        "You are {name}.\n\n{backstory}\n\nYour goal: {goal}",
        name = role.name,
        backstory = role.backstory,
        goal = role.goal,
    )
}

/// Build the context message carrying the extracted document text.
///
/// Sent as a separate system message so the instruction body stays clean and
/// the document can be dropped for roles without the reading capability.
pub fn document_context(text: &str) -> String {
    format!(
        "The full text of the uploaded financial document follows:\n\n\"\"\"\n{text}\n\"\"\""
    )
}

/// Build the user message for a task: instruction body, caller query, and
/// the expected shape of the report.
pub fn task_user_prompt(task: &Task, query: &str) -> String {
    format!(
        "{description}\n\nUser query: {query}\n\nExpected output:\n{expected}",
        description = task.description,
        query = query,
        expected = task.expected_output,
    )
}
