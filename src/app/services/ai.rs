use thiserror::Error;

/// Whether a usable AI credential is currently configured.
/// `Unknown` only before the first check completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialState {
    Unknown,
    Present,
    Absent,
}

/// Failure reported by a capability, already classified at the boundary.
/// Replaces message-substring sniffing with a tagged condition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("the AI credential is no longer valid")]
    CredentialInvalid,

    #[error("{0}")]
    Transient(String),
}

pub type CapabilityResult = Result<String, CapabilityError>;

/// The generative-AI boundary consumed by the orchestrator.
///
/// Implementations wrap the actual transport (model selection, wire
/// format, timeouts). They are expected to be idempotent no-ops on
/// degenerate input: empty text in, empty or unchanged text out, never
/// an error for that reason alone.
pub trait AiCapabilities: Send + Sync {
    /// Rewrite `content` following `instruction`, preserving markup
    /// structure. Returns the full replacement content.
    fn refine(&self, content: &str, instruction: &str) -> CapabilityResult;

    /// Transform raw or badly structured text into structured markup.
    fn restructure(&self, content: &str) -> CapabilityResult;

    /// OCR: extract text from a base64-encoded image and return it as
    /// markup paragraphs.
    fn extract_text(&self, image_base64: &str, mime_type: &str) -> CapabilityResult;

    /// Suggest footnotes for plain document text, newline-delimited.
    fn summarize_footnotes(&self, content: &str) -> CapabilityResult;
}

/// Credential management surface (the host environment's key selector).
pub trait CredentialProvider: Send + Sync {
    /// Probe whether a usable credential is configured.
    fn has_credential(&self) -> Result<bool, String>;

    /// Open the host's credential selection flow; `Ok` means a
    /// credential was selected.
    fn select_credential(&self) -> Result<(), String>;
}
