use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::app::infrastructure::error::{AppError, Result};
use crate::app::services::ai::{
    AiCapabilities, CapabilityError, CapabilityResult, CredentialProvider, CredentialState,
};
use crate::app::services::text_ops::strip_tags;

/// One generative request, carrying everything the capability needs.
/// Image payloads are raw bytes; encoding happens at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiRequest {
    /// Rewrite the content following an instruction. Replaces content.
    Refine { content: String, instruction: String },
    /// Re-structure raw text into markup. Replaces content.
    Restructure { content: String },
    /// OCR an image. The result is appended to content.
    ExtractFromImage { data: Vec<u8>, mime_type: String },
    /// Suggest footnotes for the document text. Appended to content.
    SummarizeFootnotes { content: String },
    /// The camera flow: OCR an image, then structure the extracted text,
    /// all within one busy window. Appended to content.
    ScanImage { data: Vec<u8>, mime_type: String },
}

/// Gates and sequences every call into the AI capability boundary.
///
/// Exactly one request may be in flight at a time; a second caller is
/// rejected, never queued, so the shared document content has a single
/// writer by construction. Methods take `&self` so a shared
/// `Arc<AiOrchestrator>` keeps that guarantee across threads.
pub struct AiOrchestrator {
    capabilities: Arc<dyn AiCapabilities>,
    credentials: Arc<dyn CredentialProvider>,
    credential_state: Mutex<CredentialState>,
    busy: AtomicBool,
    fallback_key: bool,
}

/// Returns the busy flag to idle on every exit path.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl AiOrchestrator {
    pub fn new(
        capabilities: Arc<dyn AiCapabilities>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            capabilities,
            credentials,
            credential_state: Mutex::new(CredentialState::Unknown),
            busy: AtomicBool::new(false),
            fallback_key: false,
        }
    }

    /// Treat an ambient (environment-provided) credential as usable even
    /// when the provider reports none selected.
    pub fn with_fallback_key(mut self, fallback_key: bool) -> Self {
        self.fallback_key = fallback_key;
        self
    }

    pub fn credential_state(&self) -> CredentialState {
        *self.credential_state.lock().unwrap()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Probe the provider and settle `Unknown` into Present/Absent.
    /// A failed probe counts as no credential.
    pub fn refresh_credentials(&self) {
        let present = match self.credentials.has_credential() {
            Ok(present) => present,
            Err(e) => {
                eprintln!("Credential check failed: {}", e);
                false
            }
        };
        *self.credential_state.lock().unwrap() = if present {
            CredentialState::Present
        } else {
            CredentialState::Absent
        };
    }

    /// Open the provider's selection flow. Success marks the credential
    /// present; failure leaves the state unchanged.
    pub fn select_credential(&self) -> Result<()> {
        match self.credentials.select_credential() {
            Ok(()) => {
                *self.credential_state.lock().unwrap() = CredentialState::Present;
                Ok(())
            }
            Err(e) => Err(AppError::CredentialSelection(e)),
        }
    }

    /// Run one request through the gate -> busy -> execute -> classify
    /// protocol and return the produced text.
    pub fn execute(&self, request: AiRequest) -> Result<String> {
        self.gate()?;

        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(AppError::AiBusy);
        }
        let _guard = BusyGuard(&self.busy);

        match self.run(request) {
            Ok(text) => Ok(text),
            Err(CapabilityError::CredentialInvalid) => {
                *self.credential_state.lock().unwrap() = CredentialState::Absent;
                Err(AppError::CredentialInvalid)
            }
            Err(CapabilityError::Transient(message)) => {
                Err(AppError::AiRequestFailed(message))
            }
        }
    }

    /// Pre-flight credential check. Rejects before any capability
    /// interaction unless a credential is present or an ambient fallback
    /// key is configured.
    fn gate(&self) -> Result<()> {
        if self.credential_state() == CredentialState::Present || self.fallback_key {
            Ok(())
        } else {
            Err(AppError::ConfigurationRequired)
        }
    }

    fn run(&self, request: AiRequest) -> CapabilityResult {
        match request {
            AiRequest::Refine { content, instruction } => {
                self.capabilities.refine(&content, &instruction)
            }
            AiRequest::Restructure { content } => self.capabilities.restructure(&content),
            AiRequest::ExtractFromImage { data, mime_type } => {
                let image = STANDARD.encode(&data);
                self.capabilities.extract_text(&image, &mime_type)
            }
            AiRequest::SummarizeFootnotes { content } => {
                self.capabilities.summarize_footnotes(&strip_tags(&content))
            }
            AiRequest::ScanImage { data, mime_type } => {
                let image = STANDARD.encode(&data);
                let extracted = self.capabilities.extract_text(&image, &mime_type)?;
                self.capabilities.restructure(&extracted)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::mpsc;
    use std::thread;

    /// Capability double that counts invocations and returns a scripted
    /// outcome. `hold` makes the call block until released, to exercise
    /// the busy gate from another thread.
    struct FakeCapabilities {
        calls: AtomicUsize,
        outcome: Mutex<CapabilityResult>,
        hold: Option<Mutex<mpsc::Receiver<()>>>,
        last_payload: Mutex<Option<(String, String)>>,
    }

    impl FakeCapabilities {
        fn returning(outcome: CapabilityResult) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                outcome: Mutex::new(outcome),
                hold: None,
                last_payload: Mutex::new(None),
            })
        }

        fn blocking_until(release: mpsc::Receiver<()>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                outcome: Mutex::new(Ok("done".to_string())),
                hold: Some(Mutex::new(release)),
                last_payload: Mutex::new(None),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn answer(&self) -> CapabilityResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(hold) = &self.hold {
                hold.lock().unwrap().recv().unwrap();
            }
            self.outcome.lock().unwrap().clone()
        }
    }

    impl AiCapabilities for FakeCapabilities {
        fn refine(&self, _content: &str, _instruction: &str) -> CapabilityResult {
            self.answer()
        }

        fn restructure(&self, content: &str) -> CapabilityResult {
            let outcome = self.answer();
            outcome.map(|text| format!("{}[{}]", text, content))
        }

        fn extract_text(&self, image_base64: &str, mime_type: &str) -> CapabilityResult {
            *self.last_payload.lock().unwrap() =
                Some((image_base64.to_string(), mime_type.to_string()));
            self.answer()
        }

        fn summarize_footnotes(&self, content: &str) -> CapabilityResult {
            *self.last_payload.lock().unwrap() =
                Some((content.to_string(), String::new()));
            self.answer()
        }
    }

    struct FakeProvider {
        has_key: bool,
        select_ok: bool,
    }

    impl CredentialProvider for FakeProvider {
        fn has_credential(&self) -> std::result::Result<bool, String> {
            Ok(self.has_key)
        }

        fn select_credential(&self) -> std::result::Result<(), String> {
            if self.select_ok {
                Ok(())
            } else {
                Err("selection cancelled".to_string())
            }
        }
    }

    fn orchestrator_with(
        caps: Arc<FakeCapabilities>,
        has_key: bool,
    ) -> AiOrchestrator {
        let orchestrator = AiOrchestrator::new(
            caps,
            Arc::new(FakeProvider { has_key, select_ok: true }),
        );
        orchestrator.refresh_credentials();
        orchestrator
    }

    fn refine_request() -> AiRequest {
        AiRequest::Refine {
            content: "<p>testo</p>".to_string(),
            instruction: "migliora".to_string(),
        }
    }

    #[test]
    fn test_initial_state_is_unknown() {
        let caps = FakeCapabilities::returning(Ok(String::new()));
        let orchestrator = AiOrchestrator::new(
            caps,
            Arc::new(FakeProvider { has_key: true, select_ok: true }),
        );
        assert_eq!(orchestrator.credential_state(), CredentialState::Unknown);
        assert!(!orchestrator.is_busy());
    }

    #[test]
    fn test_refresh_settles_credential_state() {
        let caps = FakeCapabilities::returning(Ok(String::new()));
        let orchestrator = orchestrator_with(caps, true);
        assert_eq!(orchestrator.credential_state(), CredentialState::Present);

        let caps = FakeCapabilities::returning(Ok(String::new()));
        let orchestrator = orchestrator_with(caps, false);
        assert_eq!(orchestrator.credential_state(), CredentialState::Absent);
    }

    #[test]
    fn test_gate_rejects_without_credential() {
        let caps = FakeCapabilities::returning(Ok("never".to_string()));
        let orchestrator = orchestrator_with(caps.clone(), false);

        let result = orchestrator.execute(refine_request());
        assert!(matches!(result, Err(AppError::ConfigurationRequired)));
        // The capability is never reached, and no busy transition happened.
        assert_eq!(caps.calls(), 0);
        assert!(!orchestrator.is_busy());
    }

    #[test]
    fn test_gate_rejects_while_unknown_without_fallback() {
        let caps = FakeCapabilities::returning(Ok("never".to_string()));
        let orchestrator = AiOrchestrator::new(
            caps.clone(),
            Arc::new(FakeProvider { has_key: true, select_ok: true }),
        );
        let result = orchestrator.execute(refine_request());
        assert!(matches!(result, Err(AppError::ConfigurationRequired)));
        assert_eq!(caps.calls(), 0);
    }

    #[test]
    fn test_fallback_key_opens_gate() {
        let caps = FakeCapabilities::returning(Ok("ok".to_string()));
        let orchestrator = AiOrchestrator::new(
            caps.clone(),
            Arc::new(FakeProvider { has_key: false, select_ok: true }),
        )
        .with_fallback_key(true);

        assert_eq!(orchestrator.execute(refine_request()).unwrap(), "ok");
        assert_eq!(caps.calls(), 1);
    }

    #[test]
    fn test_single_flight_rejects_second_call() {
        let (release, hold) = mpsc::channel();
        let caps = FakeCapabilities::blocking_until(hold);
        let orchestrator = Arc::new(orchestrator_with(caps.clone(), true));

        let worker = {
            let orchestrator = Arc::clone(&orchestrator);
            thread::spawn(move || orchestrator.execute(refine_request()))
        };

        // Wait until the first call is inside the capability.
        while caps.calls() == 0 {
            thread::yield_now();
        }
        assert!(orchestrator.is_busy());

        let second = orchestrator.execute(refine_request());
        assert!(matches!(second, Err(AppError::AiBusy)));

        release.send(()).unwrap();
        assert_eq!(worker.join().unwrap().unwrap(), "done");
        assert!(!orchestrator.is_busy());

        // Exactly one execution happened; a later call goes through.
        assert_eq!(caps.calls(), 1);
        release.send(()).unwrap();
        assert!(orchestrator.execute(refine_request()).is_ok());
        assert_eq!(caps.calls(), 2);
    }

    #[test]
    fn test_transient_failure_leaves_credentials_alone() {
        let caps = FakeCapabilities::returning(Err(CapabilityError::Transient(
            "quota exceeded".to_string(),
        )));
        let orchestrator = orchestrator_with(caps, true);

        let result = orchestrator.execute(refine_request());
        match result {
            Err(AppError::AiRequestFailed(message)) => {
                assert_eq!(message, "quota exceeded")
            }
            other => panic!("unexpected outcome: {:?}", other.map(|_| ())),
        }
        assert_eq!(orchestrator.credential_state(), CredentialState::Present);
        assert!(!orchestrator.is_busy());
    }

    #[test]
    fn test_credential_failure_revokes_and_gates() {
        let caps = FakeCapabilities::returning(Err(CapabilityError::CredentialInvalid));
        let orchestrator = orchestrator_with(caps.clone(), true);

        let result = orchestrator.execute(refine_request());
        assert!(matches!(result, Err(AppError::CredentialInvalid)));
        assert_eq!(orchestrator.credential_state(), CredentialState::Absent);
        assert_eq!(caps.calls(), 1);

        // The next call is gated before any capability interaction.
        let again = orchestrator.execute(refine_request());
        assert!(matches!(again, Err(AppError::ConfigurationRequired)));
        assert_eq!(caps.calls(), 1);
    }

    #[test]
    fn test_select_credential_marks_present() {
        let caps = FakeCapabilities::returning(Ok(String::new()));
        let orchestrator = orchestrator_with(caps, false);
        assert_eq!(orchestrator.credential_state(), CredentialState::Absent);

        orchestrator.select_credential().unwrap();
        assert_eq!(orchestrator.credential_state(), CredentialState::Present);
    }

    #[test]
    fn test_failed_selection_leaves_state_unchanged() {
        let caps = FakeCapabilities::returning(Ok(String::new()));
        let orchestrator = AiOrchestrator::new(
            caps,
            Arc::new(FakeProvider { has_key: false, select_ok: false }),
        );
        orchestrator.refresh_credentials();

        let result = orchestrator.select_credential();
        assert!(matches!(result, Err(AppError::CredentialSelection(_))));
        assert_eq!(orchestrator.credential_state(), CredentialState::Absent);
    }

    #[test]
    fn test_image_bytes_are_base64_encoded() {
        let caps = FakeCapabilities::returning(Ok("testo estratto".to_string()));
        let orchestrator = orchestrator_with(caps.clone(), true);

        let data = vec![0xde, 0xad, 0xbe, 0xef];
        orchestrator
            .execute(AiRequest::ExtractFromImage {
                data: data.clone(),
                mime_type: "image/jpeg".to_string(),
            })
            .unwrap();

        let (payload, mime) = caps.last_payload.lock().unwrap().clone().unwrap();
        assert_eq!(payload, STANDARD.encode(&data));
        assert_eq!(mime, "image/jpeg");
    }

    #[test]
    fn test_footnote_prompt_is_stripped_of_markup() {
        let caps = FakeCapabilities::returning(Ok("nota".to_string()));
        let orchestrator = orchestrator_with(caps.clone(), true);

        orchestrator
            .execute(AiRequest::SummarizeFootnotes {
                content: "<h1>Titolo</h1><p>Testo</p>".to_string(),
            })
            .unwrap();

        let (payload, _) = caps.last_payload.lock().unwrap().clone().unwrap();
        assert_eq!(payload, "TitoloTesto");
    }

    #[test]
    fn test_scan_chains_extract_and_restructure() {
        let caps = FakeCapabilities::returning(Ok("ocr".to_string()));
        let orchestrator = orchestrator_with(caps.clone(), true);

        let result = orchestrator
            .execute(AiRequest::ScanImage {
                data: vec![1, 2, 3],
                mime_type: "image/png".to_string(),
            })
            .unwrap();

        // extract_text returned "ocr"; restructure tagged its input.
        assert_eq!(result, "ocr[ocr]");
        assert_eq!(caps.calls(), 2);
    }

    #[test]
    fn test_scan_stops_after_failed_extract() {
        let caps = FakeCapabilities::returning(Err(CapabilityError::Transient(
            "no signal".to_string(),
        )));
        let orchestrator = orchestrator_with(caps.clone(), true);

        let result = orchestrator.execute(AiRequest::ScanImage {
            data: vec![1],
            mime_type: "image/png".to_string(),
        });
        assert!(matches!(result, Err(AppError::AiRequestFailed(_))));
        assert_eq!(caps.calls(), 1);
    }

    #[test]
    fn test_empty_content_passes_through() {
        let caps = FakeCapabilities::returning(Ok(String::new()));
        let orchestrator = orchestrator_with(caps.clone(), true);

        let result = orchestrator.execute(AiRequest::Refine {
            content: String::new(),
            instruction: String::new(),
        });
        assert_eq!(result.unwrap(), "");
        assert_eq!(caps.calls(), 1);
    }
}
