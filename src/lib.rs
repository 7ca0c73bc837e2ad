//! Core engine for the DocuStyle document editor.
//!
//! Everything the UI chrome needs lives behind [`app::EditorSession`]:
//! the page layout model with its derived paper metrics, the template
//! catalog, saved-project persistence, document export, and the AI
//! operation orchestrator with its credential state machine. The editor
//! surface, camera and file-download plumbing stay outside the crate
//! and drive it through that session API.

pub mod app;

pub use app::{
    AiCapabilities, AiOrchestrator, AiRequest, AppError, CapabilityError,
    CapabilityResult, CredentialProvider, CredentialState, DocumentTemplate,
    EditorSession, ExportArtifact, FileBackend, FontFamily, FontSizeKind,
    MarginSide, Margins, MemoryBackend, NumberPosition, Orientation, PageFormat,
    PageNumbering, PageSettings, Panel, PaperSize, ProjectStore, Result,
    SavedProject, StorageBackend, predefined_templates,
};
