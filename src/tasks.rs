//! Task definitions: the four prompt specifications of the pipeline.
//!
//! Each task binds an instruction body and an expected-output shape to a
//! role. The "structure" of the expected output is a prompt instruction to
//! the language model, not a verified schema — the pipeline returns the
//! model's text verbatim.
//!
//! Only [`ANALYZE_FINANCIAL_DOCUMENT`] is wired into the live pipeline via
//! [`wired_tasks`]. The other three tasks are deliberate extension points:
//! a future multi-stage pipeline (verify → analyze → assess risk → advise)
//! would add them to the wired slice without touching anything else.

use crate::agents::{Capability, Role, FINANCIAL_ANALYST, INVESTMENT_ADVISOR, RISK_ASSESSOR, VERIFIER};

/// A bound instruction executed by a role.
#[derive(Debug, Clone, Copy)]
pub struct Task {
    /// Short identifier used in logs.
    pub name: &'static str,
    /// The instruction body sent as the user turn.
    pub description: &'static str,
    /// Free-text description of the report shape the model should produce.
    pub expected_output: &'static str,
    /// The role that executes this task.
    pub role: &'static Role,
    /// Capability the task itself requires, independent of the role.
    pub capability: Option<Capability>,
    /// Tasks run to completion before the next starts; none execute
    /// asynchronously relative to the pipeline.
    pub async_execution: bool,
}

/// Structured financial analysis of the uploaded document.
pub const ANALYZE_FINANCIAL_DOCUMENT: Task = Task {
    name: "analyze_financial_document",
    description: "Read the uploaded financial document using the provided tool.\n\
                  \n\
                  Perform a structured financial analysis including:\n\
                  1. Executive summary of the company's performance\n\
                  2. Key financial metrics (Revenue, Net Income, Operating Margin, EPS, Cash Flow)\n\
                  3. Year-over-year or quarterly performance trends (if available)\n\
                  4. Operational highlights\n\
                  \n\
                  Only use information explicitly available in the document.\n\
                  Do NOT fabricate data.",
    expected_output: "A structured financial report containing:\n\
                      \n\
                      - Executive Summary\n\
                      - Key Financial Metrics\n\
                      - Performance Trends\n\
                      - Operational Insights",
    role: &FINANCIAL_ANALYST,
    capability: Some(Capability::DocumentReader),
    async_execution: false,
};

/// Balanced investment insights. Dormant.
pub const INVESTMENT_ANALYSIS: Task = Task {
    name: "investment_analysis",
    description: "Based strictly on the analyzed financial data:\n\
                  \n\
                  1. Provide balanced investment insights.\n\
                  2. Highlight strengths and weaknesses.\n\
                  3. Discuss growth potential and financial stability.\n\
                  4. Avoid recommending specific financial products.\n\
                  5. Avoid exaggerated claims.\n\
                  \n\
                  Use professional, compliance-aware language.",
    expected_output: "Structured investment insights including:\n\
                      \n\
                      - Strengths\n\
                      - Weaknesses\n\
                      - Growth Outlook\n\
                      - Balanced Investment Perspective",
    role: &INVESTMENT_ADVISOR,
    capability: None,
    async_execution: false,
};

/// Categorized risk analysis. Dormant.
pub const RISK_ASSESSMENT: Task = Task {
    name: "risk_assessment",
    description: "Identify financial and operational risks explicitly mentioned \
                  in the document.\n\
                  \n\
                  Categorize risks such as:\n\
                  - Market Risk\n\
                  - Operational Risk\n\
                  - Liquidity Risk\n\
                  - Regulatory Risk\n\
                  \n\
                  Do not exaggerate or fabricate risks.\n\
                  Only include risks supported by document evidence.",
    expected_output: "A categorized risk analysis including:\n\
                      \n\
                      - Identified Risks\n\
                      - Risk Severity (Low / Medium / High)\n\
                      - Potential Impact\n\
                      - Risk Mitigation Discussion (if mentioned)",
    role: &RISK_ASSESSOR,
    capability: None,
    async_execution: false,
};

/// Document authenticity verification. Dormant.
pub const VERIFICATION: Task = Task {
    name: "verification",
    description: "Verify that the uploaded file is a financial document.\n\
                  \n\
                  Confirm:\n\
                  - Presence of financial statements\n\
                  - Company name\n\
                  - Reporting period\n\
                  - Key financial terminology\n\
                  \n\
                  If document is not financial in nature, clearly state so.",
    expected_output: "Verification report including:\n\
                      \n\
                      - Document Type Confirmation\n\
                      - Extracted Company Name\n\
                      - Reporting Period\n\
                      - Financial Content Validation",
    role: &VERIFIER,
    capability: None,
    async_execution: false,
};

/// The tasks the pipeline actually executes, in order.
///
/// Currently a single-task pipeline. Extending to the full four-stage
/// sequence is a one-line change here, which is why the dormant tasks above
/// are kept fully specified.
pub fn wired_tasks() -> &'static [&'static Task] {
    &[&ANALYZE_FINANCIAL_DOCUMENT]
}
