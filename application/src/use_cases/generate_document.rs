//! Document generation pipeline.
//!
//! Linear, no retries:
//! validate -> prompt the generator -> compile the PDF -> record to
//! history (best-effort) -> debit the balance. A failure at any step is
//! terminal for this invocation; validation and both remote steps leave
//! the credit balance untouched.

use crate::ports::compiler_gateway::CompilerGateway;
use crate::ports::generator_gateway::GeneratorGateway;
use crate::ports::notifier::{GenerationProgress, SessionNotifier};
use crate::ports::remote::RemoteError;
use crate::ports::transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
use crate::use_cases::account_access::AppendOutcome;
use crate::use_cases::session_manager::SessionContext;
use pdraft_domain::{
    DocumentRequest, GenerationPhase, HistoryDraft, Message, Settings, ValidationError,
    estimate_cost, latex_prompt,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that abort a generation run.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("LaTeX generation failed: {0}")]
    Generation(RemoteError),

    #[error("PDF compilation failed: {0}")]
    Compilation(RemoteError),
}

/// Input for the [`GenerateDocumentUseCase`].
#[derive(Debug, Clone)]
pub struct GenerateInput {
    pub title: String,
    pub description: String,
    /// Effective settings at submission time.
    pub settings: Settings,
}

impl GenerateInput {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        settings: Settings,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            settings,
        }
    }
}

/// Result of a completed generation run.
#[derive(Debug, Clone)]
pub struct GenerateOutput {
    /// Absolute URL of the produced PDF.
    pub pdf_url: String,
    /// The generated LaTeX source.
    pub latex: String,
    /// Credits debited for this run.
    pub cost: u64,
    /// Balance after the debit.
    pub balance: u64,
    /// Whether a history entry was persisted.
    pub saved: bool,
}

/// Use case for running one generation.
///
/// The caller guarantees at most one in-flight run per session; the
/// pipeline itself is a plain sequential flow over the injected ports.
pub struct GenerateDocumentUseCase {
    generator: Arc<dyn GeneratorGateway>,
    compiler: Arc<dyn CompilerGateway>,
    transcript_logger: Arc<dyn TranscriptLogger>,
}

impl GenerateDocumentUseCase {
    pub fn new(generator: Arc<dyn GeneratorGateway>, compiler: Arc<dyn CompilerGateway>) -> Self {
        Self {
            generator,
            compiler,
            transcript_logger: Arc::new(NoTranscriptLogger),
        }
    }

    /// Create with a transcript logger.
    pub fn with_transcript_logger(mut self, logger: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript_logger = logger;
        self
    }

    /// Execute one generation run against the active session.
    pub async fn execute(
        &self,
        input: GenerateInput,
        ctx: &mut SessionContext,
        notifier: &dyn SessionNotifier,
        progress: &dyn GenerationProgress,
    ) -> Result<GenerateOutput, GenerateError> {
        let request = DocumentRequest::new(input.title, input.description);

        // No remote calls happen before this passes.
        progress.on_phase(GenerationPhase::Validating);
        if let Err(e) = request.validate(ctx.session().credits()) {
            progress.on_phase(GenerationPhase::Failed);
            progress.on_done();
            return Err(e.into());
        }

        info!("Generating document '{}'", request.title());
        ctx.push_message(Message::user(request.transcript_text()));
        let uid = ctx.session().uid().to_string();

        progress.on_phase(GenerationPhase::Prompting);
        let prompt = latex_prompt(&request, &input.settings);
        let latex = match self
            .generator
            .generate_latex(&prompt, input.settings.max_tokens, &uid)
            .await
        {
            Ok(latex) => latex,
            Err(e) => return Err(self.fail(ctx, progress, GenerateError::Generation(e))),
        };
        debug!("Generator returned {} bytes of LaTeX", latex.len());

        progress.on_phase(GenerationPhase::Compiling);
        let pdf_url = match self
            .compiler
            .compile_pdf(&latex, request.title(), &uid)
            .await
        {
            Ok(url) => url,
            Err(e) => return Err(self.fail(ctx, progress, GenerateError::Compilation(e))),
        };

        ctx.push_message(Message::assistant_with_pdf(
            "PDF generated successfully!",
            pdf_url.as_str(),
        ));

        // Best-effort: a successful compilation is never lost because the
        // history write failed.
        progress.on_phase(GenerationPhase::Recording);
        let draft = HistoryDraft::for_generation(
            request.title(),
            request.description(),
            latex.as_str(),
            pdf_url.as_str(),
        );
        let saved = match ctx.access().append_history(&draft).await {
            Ok(AppendOutcome::Saved { id }) => {
                debug!("Recorded history entry {}", id);
                true
            }
            Ok(AppendOutcome::NotSaved) => false,
            Err(e) => {
                warn!("History entry was not saved: {}", e);
                false
            }
        };

        progress.on_phase(GenerationPhase::Debiting);
        let cost = estimate_cost(
            request.title(),
            request.description(),
            input.settings.max_tokens,
        );
        let balance = ctx.debit(cost).await;
        notifier.on_balance_changed(balance);

        self.transcript_logger.log(TranscriptEvent::new(
            "generation_completed",
            serde_json::json!({
                "title": request.title(),
                "cost": cost,
                "balance": balance,
                "pdfUrl": pdf_url,
                "latexBytes": latex.len(),
                "saved": saved,
            }),
        ));
        info!(
            "Generated '{}' for {} credits ({} remaining)",
            request.title(),
            cost,
            balance
        );

        progress.on_done();
        Ok(GenerateOutput {
            pdf_url,
            latex,
            cost,
            balance,
            saved,
        })
    }

    /// Remote failure: append the notice to the transcript, log, and
    /// hand the error back. The balance is untouched.
    fn fail(
        &self,
        ctx: &mut SessionContext,
        progress: &dyn GenerationProgress,
        error: GenerateError,
    ) -> GenerateError {
        ctx.push_message(Message::assistant(
            "Sorry, there was an error generating your PDF. Please try again.",
        ));
        self.transcript_logger.log(TranscriptEvent::new(
            "generation_failed",
            serde_json::json!({ "error": error.to_string() }),
        ));
        progress.on_phase(GenerationPhase::Failed);
        progress.on_done();
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::notifier::{NoGenerationProgress, NoSessionNotifier};
    use crate::ports::persistence::PersistenceError;
    use crate::use_cases::account_access::AccountAccess;
    use async_trait::async_trait;
    use pdraft_domain::{HistoryView, Identity, Role, Session, SettingsPatch};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ==================== Test Mocks ====================

    struct MockGenerator {
        responses: Mutex<VecDeque<Result<String, RemoteError>>>,
        calls: AtomicUsize,
    }

    impl MockGenerator {
        fn returning(responses: Vec<Result<String, RemoteError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(VecDeque::from(responses)),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl GeneratorGateway for MockGenerator {
        async fn generate_latex(
            &self,
            _prompt: &str,
            _max_tokens: u32,
            _uid: &str,
        ) -> Result<String, RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(RemoteError::InvalidResponse("no more responses".into())))
        }
    }

    struct MockCompiler {
        responses: Mutex<VecDeque<Result<String, RemoteError>>>,
        calls: AtomicUsize,
    }

    impl MockCompiler {
        fn returning(responses: Vec<Result<String, RemoteError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(VecDeque::from(responses)),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl CompilerGateway for MockCompiler {
        async fn compile_pdf(
            &self,
            _latex: &str,
            _title: &str,
            _uid: &str,
        ) -> Result<String, RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(RemoteError::InvalidResponse("no more responses".into())))
        }
    }

    /// AccountAccess that records appends and persisted balances.
    #[derive(Default)]
    struct RecordingAccess {
        appends: Mutex<Vec<HistoryDraft>>,
        persisted_credits: Mutex<Vec<u64>>,
        fail_appends: bool,
    }

    #[async_trait]
    impl AccountAccess for RecordingAccess {
        async fn persist_credits(&self, credits: u64) -> Result<(), PersistenceError> {
            self.persisted_credits.lock().unwrap().push(credits);
            Ok(())
        }

        async fn persist_settings(&self, _settings: &Settings) -> Result<(), PersistenceError> {
            Ok(())
        }

        async fn remote_settings(&self) -> Result<Option<SettingsPatch>, PersistenceError> {
            Ok(None)
        }

        async fn list_history(&self) -> Result<HistoryView, PersistenceError> {
            Ok(HistoryView::Entries(vec![]))
        }

        async fn append_history(
            &self,
            draft: &HistoryDraft,
        ) -> Result<AppendOutcome, PersistenceError> {
            if self.fail_appends {
                return Err(PersistenceError::RequestFailed("store down".into()));
            }
            self.appends.lock().unwrap().push(draft.clone());
            Ok(AppendOutcome::Saved {
                id: "h-1".to_string(),
            })
        }

        async fn remove_history(&self, _id: &str) -> Result<(), PersistenceError> {
            Ok(())
        }
    }

    fn context(credits: u64, access: Arc<RecordingAccess>) -> SessionContext {
        let identity = Identity::Authenticated {
            uid: "u-1".to_string(),
            email: "ada@example.com".to_string(),
            display_name: "Ada".to_string(),
        };
        SessionContext::new(Session::new(identity, credits), access)
    }

    fn input(title: &str, description: &str) -> GenerateInput {
        GenerateInput::new(title, description, Settings::default())
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_successful_generation_debits_documented_cost() {
        let generator = MockGenerator::returning(vec![Ok("\\documentclass{article}".into())]);
        let compiler =
            MockCompiler::returning(vec![Ok("http://localhost:5000/api/download-pdf/a.pdf".into())]);
        let access = Arc::new(RecordingAccess::default());
        let mut ctx = context(10_000, access.clone());
        let use_case = GenerateDocumentUseCase::new(generator, compiler);

        let output = use_case
            .execute(
                input("Report", "Quarterly results"),
                &mut ctx,
                &NoSessionNotifier,
                &NoGenerationProgress,
            )
            .await
            .unwrap();

        // ceil((6 + 17) / 4) = 6
        assert_eq!(output.cost, 6);
        assert_eq!(output.balance, 9_994);
        assert!(output.saved);
        assert_eq!(ctx.session().credits(), 9_994);
        assert_eq!(*access.persisted_credits.lock().unwrap(), vec![9_994]);
        assert_eq!(access.appends.lock().unwrap().len(), 1);

        // Transcript: user request then assistant result with the artifact
        let messages = ctx.transcript().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(
            messages[1].pdf_url.as_deref(),
            Some("http://localhost:5000/api/download-pdf/a.pdf")
        );
    }

    #[tokio::test]
    async fn test_generator_failure_leaves_balance_and_history_untouched() {
        let generator = MockGenerator::returning(vec![Err(RemoteError::Status {
            status: 500,
            message: "upstream error".into(),
        })]);
        let compiler = MockCompiler::returning(vec![]);
        let access = Arc::new(RecordingAccess::default());
        let mut ctx = context(10_000, access.clone());
        let use_case = GenerateDocumentUseCase::new(generator, compiler.clone());

        let result = use_case
            .execute(
                input("Report", "Quarterly results"),
                &mut ctx,
                &NoSessionNotifier,
                &NoGenerationProgress,
            )
            .await;

        assert!(matches!(result, Err(GenerateError::Generation(_))));
        assert_eq!(ctx.session().credits(), 10_000);
        assert!(access.appends.lock().unwrap().is_empty());
        assert!(access.persisted_credits.lock().unwrap().is_empty());
        assert_eq!(compiler.calls.load(Ordering::SeqCst), 0);

        // Failure notice is appended to the transcript
        let messages = ctx.transcript().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, Role::Assistant);
        assert!(messages[1].text.contains("error"));
    }

    #[tokio::test]
    async fn test_compiler_failure_aborts_without_debit() {
        let generator = MockGenerator::returning(vec![Ok("\\documentclass{article}".into())]);
        let compiler = MockCompiler::returning(vec![Err(RemoteError::Status {
            status: 500,
            message: "compilation failed".into(),
        })]);
        let access = Arc::new(RecordingAccess::default());
        let mut ctx = context(10_000, access.clone());
        let use_case = GenerateDocumentUseCase::new(generator.clone(), compiler);

        let result = use_case
            .execute(
                input("Report", "Quarterly results"),
                &mut ctx,
                &NoSessionNotifier,
                &NoGenerationProgress,
            )
            .await;

        assert!(matches!(result, Err(GenerateError::Compilation(_))));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(ctx.session().credits(), 10_000);
        assert!(access.appends.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_title_rejected_before_any_remote_call() {
        let generator = MockGenerator::returning(vec![]);
        let compiler = MockCompiler::returning(vec![]);
        let access = Arc::new(RecordingAccess::default());
        let mut ctx = context(10_000, access);
        let use_case = GenerateDocumentUseCase::new(generator.clone(), compiler.clone());

        let result = use_case
            .execute(
                input("", "Quarterly results"),
                &mut ctx,
                &NoSessionNotifier,
                &NoGenerationProgress,
            )
            .await;

        assert!(matches!(
            result,
            Err(GenerateError::Validation(ValidationError::EmptyTitle))
        ));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(compiler.calls.load(Ordering::SeqCst), 0);
        assert!(ctx.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_empty_description_rejected_before_any_remote_call() {
        let generator = MockGenerator::returning(vec![]);
        let compiler = MockCompiler::returning(vec![]);
        let access = Arc::new(RecordingAccess::default());
        let mut ctx = context(10_000, access);
        let use_case = GenerateDocumentUseCase::new(generator.clone(), compiler);

        let result = use_case
            .execute(
                input("Report", "   "),
                &mut ctx,
                &NoSessionNotifier,
                &NoGenerationProgress,
            )
            .await;

        assert!(matches!(
            result,
            Err(GenerateError::Validation(ValidationError::EmptyDescription))
        ));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_low_balance_rejected_even_with_valid_input() {
        let generator = MockGenerator::returning(vec![]);
        let compiler = MockCompiler::returning(vec![]);
        let access = Arc::new(RecordingAccess::default());
        let mut ctx = context(99, access);
        let use_case = GenerateDocumentUseCase::new(generator.clone(), compiler);

        let result = use_case
            .execute(
                input("Report", "Quarterly results"),
                &mut ctx,
                &NoSessionNotifier,
                &NoGenerationProgress,
            )
            .await;

        assert!(matches!(
            result,
            Err(GenerateError::Validation(
                ValidationError::InsufficientCredits { .. }
            ))
        ));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_recording_failure_is_swallowed_and_debit_still_happens() {
        let generator = MockGenerator::returning(vec![Ok("\\documentclass{article}".into())]);
        let compiler = MockCompiler::returning(vec![Ok("/api/download-pdf/a.pdf".into())]);
        let access = Arc::new(RecordingAccess {
            fail_appends: true,
            ..Default::default()
        });
        let mut ctx = context(10_000, access.clone());
        let use_case = GenerateDocumentUseCase::new(generator, compiler);

        let output = use_case
            .execute(
                input("Report", "Quarterly results"),
                &mut ctx,
                &NoSessionNotifier,
                &NoGenerationProgress,
            )
            .await
            .unwrap();

        assert!(!output.saved);
        assert_eq!(output.balance, 9_994);
        assert_eq!(*access.persisted_credits.lock().unwrap(), vec![9_994]);
    }
}
