//! Role definitions for the four analysis agents.
//!
//! Roles are process-wide constants: each pairs a persona (goal + backstory)
//! with an iteration budget and, optionally, a capability the role may invoke
//! during execution. They are constructed once, never mutated, and passed by
//! reference into the pipeline — no synchronisation needed.
//!
//! A role either has a capability or it does not. The binding is a typed
//! [`Capability`] value rather than a dynamic tool list, so "can this role
//! read the document?" is answered by pattern matching, not runtime
//! inspection.

/// An external function a role is permitted to invoke during execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Read the uploaded PDF and inject its text into the conversation.
    DocumentReader,
    /// Query the optional web-search collaborator (Serper). No role binds
    /// this today; it exists so the capability can be wired without touching
    /// the role type.
    WebSearch,
}

/// A named persona used to condition a language-model call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Role {
    /// Human-readable role title, also used in error messages.
    pub name: &'static str,
    /// What the role is trying to achieve.
    pub goal: &'static str,
    /// Persona description that constrains the model's behaviour.
    pub backstory: &'static str,
    /// The single capability this role may invoke, if any.
    pub capability: Option<Capability>,
    /// Maximum internal reasoning round-trips before the run is failed.
    pub max_iterations: u32,
    /// Whether the role may hand work to another role. Always false here:
    /// the pipeline is strictly sequential with no delegation.
    pub allow_delegation: bool,
}

/// Primary analysis agent. The only role with document-reading capability
/// and the only one wired into the live pipeline.
pub const FINANCIAL_ANALYST: Role = Role {
    name: "Senior Financial Analyst",
    goal: "Analyze the uploaded financial document and extract factual financial insights \
           based strictly on the document content.",
    backstory: "You are a highly experienced financial analyst specializing in corporate \
                financial statements, earnings reports, and investment analysis. \
                You rely strictly on verifiable data from the provided document. \
                You do not speculate, hallucinate, or fabricate financial advice.",
    capability: Some(Capability::DocumentReader),
    max_iterations: 3,
    allow_delegation: false,
};

/// Compliance-focused reviewer. Dormant: defined but not wired.
pub const VERIFIER: Role = Role {
    name: "Financial Document Verifier",
    goal: "Verify that the uploaded file is a valid financial document and ensure \
           that extracted information matches the document content.",
    backstory: "You are a compliance-focused financial document reviewer. \
                Your job is to validate authenticity, detect inconsistencies, \
                and ensure that all financial insights are grounded in the source document.",
    capability: None,
    max_iterations: 2,
    allow_delegation: false,
};

/// Investment research agent. Dormant: defined but not wired.
pub const INVESTMENT_ADVISOR: Role = Role {
    name: "Investment Research Analyst",
    goal: "Provide balanced, document-based investment insights derived from \
           the financial data presented in the report.",
    backstory: "You are a professional investment research analyst. \
                You provide risk-aware, data-backed insights. \
                You do not promote specific financial products. \
                You avoid exaggerated claims and ensure regulatory-safe language.",
    capability: None,
    max_iterations: 2,
    allow_delegation: false,
};

/// Risk assessment agent. Dormant: defined but not wired.
pub const RISK_ASSESSOR: Role = Role {
    name: "Financial Risk Analyst",
    goal: "Identify and assess financial risks explicitly mentioned in the document, \
           including operational, market, credit, or liquidity risks.",
    backstory: "You are a professional risk management specialist with experience \
                in corporate financial risk analysis. \
                You evaluate risk factors conservatively and based only on documented evidence.",
    capability: None,
    max_iterations: 2,
    allow_delegation: false,
};
