//! Application core - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (PageSettings, templates, projects)
//! - `controllers/` - Orchestration (AiOrchestrator)
//! - `services/` - Business operations (projects, export, AI boundary, text ops)
//! - `infrastructure/` - External integrations (storage, error)
//! - `state.rs` - Editor session coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use controllers::ai::{AiOrchestrator, AiRequest};
pub use domain::{
    DocumentTemplate, FontFamily, FontSizeKind, MarginSide, Margins, NumberPosition,
    Orientation, PageFormat, PageNumbering, PageSettings, PaperSize, SavedProject,
    predefined_templates,
};
pub use infrastructure::error::{AppError, Result};
pub use infrastructure::storage::{FileBackend, MemoryBackend, StorageBackend};
pub use services::ai::{
    AiCapabilities, CapabilityError, CapabilityResult, CredentialProvider, CredentialState,
};
pub use services::export::ExportArtifact;
pub use services::projects::ProjectStore;
pub use state::{DEFAULT_REFINE_INSTRUCTION, EditorSession, Panel};
