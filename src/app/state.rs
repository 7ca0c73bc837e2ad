use std::sync::Arc;
use uuid::Uuid;

use super::controllers::ai::{AiOrchestrator, AiRequest};
use super::domain::layout::PageSettings;
use super::domain::template::DocumentTemplate;
use super::domain::project::SavedProject;
use super::infrastructure::error::{AppError, Result};
use super::infrastructure::storage::StorageBackend;
use super::services::ai::CredentialState;
use super::services::export::{self, ExportArtifact};
use super::services::projects::ProjectStore;
use super::services::text_ops::footnote_markup;

/// Instruction sent with the one-click refine action.
pub const DEFAULT_REFINE_INSTRUCTION: &str =
    "Rendi il testo più professionale e scorrevole seguendo regole di videoscrittura istituzionale";

/// Sidebar panel the UI should be showing. Failed AI calls that need a
/// credential route the session here to `CredentialSetup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Layout,
    Templates,
    Projects,
    CredentialSetup,
}

/// The editing session: current layout settings, current document
/// content, and the components that mutate them.
///
/// All state lives here rather than in ambient globals; layout setters
/// produce new `PageSettings` values which the caller hands back via
/// [`update_settings`](Self::update_settings). Content has exactly one
/// writer at a time: synchronous editor updates via
/// [`set_content`](Self::set_content), or the single in-flight AI
/// operation's result.
pub struct EditorSession<S: StorageBackend> {
    settings: PageSettings,
    content: String,
    panel: Panel,
    orchestrator: Arc<AiOrchestrator>,
    projects: ProjectStore<S>,
}

impl<S: StorageBackend> EditorSession<S> {
    /// Start a session from the simple-document template, like a fresh
    /// editor launch.
    pub fn new(orchestrator: Arc<AiOrchestrator>, projects: ProjectStore<S>) -> Self {
        let template = DocumentTemplate::simple();
        Self {
            settings: template.settings,
            content: template.initial_content.to_string(),
            panel: Panel::Layout,
            orchestrator,
            projects,
        }
    }

    pub fn settings(&self) -> &PageSettings {
        &self.settings
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn set_panel(&mut self, panel: Panel) {
        self.panel = panel;
    }

    pub fn orchestrator(&self) -> &Arc<AiOrchestrator> {
        &self.orchestrator
    }

    /// Replace the current layout settings with a value produced by the
    /// functional setters on [`PageSettings`].
    pub fn update_settings(&mut self, settings: PageSettings) {
        self.settings = settings;
    }

    /// Replace the document content (the editor surface reporting an
    /// edit or a formatting command result).
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    // --- Templates ---

    /// Replace both settings and content with the template's snapshot.
    /// Rejected while an AI operation is in flight, since the result of
    /// that operation would clobber (or be clobbered by) the template
    /// content.
    pub fn apply_template(&mut self, template: &DocumentTemplate) -> Result<()> {
        if self.orchestrator.is_busy() {
            return Err(AppError::AiBusy);
        }
        self.settings = template.settings.clone();
        self.content = template.initial_content.to_string();
        self.panel = Panel::Layout;
        Ok(())
    }

    /// Replace only the layout settings, leaving content untouched.
    /// Safe while busy: settings and content are independent.
    pub fn apply_layout_only(&mut self, template: &DocumentTemplate) {
        self.settings = template.settings.clone();
    }

    // --- Projects ---

    pub fn save_project(&mut self, name: &str) -> Result<SavedProject> {
        self.projects.save(name, &self.settings, &self.content)
    }

    /// Restore a saved snapshot. Busy-gated for the same reason as
    /// [`apply_template`](Self::apply_template).
    pub fn load_project(&mut self, id: Uuid) -> Result<()> {
        if self.orchestrator.is_busy() {
            return Err(AppError::AiBusy);
        }
        let (settings, content) = self.projects.load(id)?;
        self.settings = settings;
        self.content = content;
        self.panel = Panel::Layout;
        Ok(())
    }

    pub fn delete_project(&mut self, id: Uuid) -> Result<()> {
        self.projects.delete(id)
    }

    pub fn projects(&self) -> &[SavedProject] {
        self.projects.list()
    }

    // --- AI operations ---

    /// Rewrite the document with the standard institutional style
    /// instruction. Replaces content on success.
    pub fn ai_refine(&mut self) -> Result<()> {
        self.ai_refine_with(DEFAULT_REFINE_INSTRUCTION)
    }

    pub fn ai_refine_with(&mut self, instruction: &str) -> Result<()> {
        let request = AiRequest::Refine {
            content: self.content.clone(),
            instruction: instruction.to_string(),
        };
        let text = self.dispatch(request)?;
        self.content = text;
        Ok(())
    }

    /// Re-structure the document into clean markup. Replaces content.
    pub fn ai_auto_structure(&mut self) -> Result<()> {
        let request = AiRequest::Restructure { content: self.content.clone() };
        let text = self.dispatch(request)?;
        self.content = text;
        Ok(())
    }

    /// OCR an image and append the extracted text as-is.
    pub fn ai_extract_from_image(&mut self, data: Vec<u8>, mime_type: &str) -> Result<()> {
        let request = AiRequest::ExtractFromImage {
            data,
            mime_type: mime_type.to_string(),
        };
        let text = self.dispatch(request)?;
        self.content.push_str(&text);
        Ok(())
    }

    /// OCR a captured image and append the structured result.
    pub fn ai_scan_image(&mut self, data: Vec<u8>, mime_type: &str) -> Result<()> {
        let request = AiRequest::ScanImage {
            data,
            mime_type: mime_type.to_string(),
        };
        let text = self.dispatch(request)?;
        self.content.push_str(&text);
        Ok(())
    }

    /// Ask for footnote suggestions and append them as footnote
    /// paragraphs.
    pub fn ai_suggest_footnotes(&mut self) -> Result<()> {
        let request = AiRequest::SummarizeFootnotes { content: self.content.clone() };
        let text = self.dispatch(request)?;
        self.content.push_str(&footnote_markup(&text));
        Ok(())
    }

    /// Run a request and, when the failure needs a credential, route the
    /// UI to credential setup before reporting it.
    fn dispatch(&mut self, request: AiRequest) -> Result<String> {
        self.orchestrator.execute(request).map_err(|e| {
            if e.requires_credential_setup() {
                self.panel = Panel::CredentialSetup;
            }
            e
        })
    }

    // --- Credentials ---

    pub fn refresh_credentials(&self) {
        self.orchestrator.refresh_credentials();
    }

    pub fn select_credential(&self) -> Result<()> {
        self.orchestrator.select_credential()
    }

    pub fn credential_state(&self) -> CredentialState {
        self.orchestrator.credential_state()
    }

    pub fn is_ai_busy(&self) -> bool {
        self.orchestrator.is_busy()
    }

    // --- Export ---

    pub fn export_plain_text(&self) -> ExportArtifact {
        export::plain_text(&self.content)
    }

    pub fn export_word_document(&self) -> ExportArtifact {
        export::word_document(&self.content)
    }

    pub fn export_html_document(&self) -> ExportArtifact {
        export::html_document(&self.settings, &self.content)
    }
}
