//! The conversion controller: the library's primary entry point.
//!
//! [`ConversionController`] wires the pieces together — catalog loaded once
//! at [`ConversionController::connect`], validator publishing into the state
//! machine, orchestrator driving the one outbound request, retriever
//! resolving the result. Presentation layers (the CLI, an embedding GUI)
//! hold one controller and project its state; they make no workflow
//! decisions of their own.

use crate::catalog::{self, LanguageCatalog};
use crate::config::ClientConfig;
use crate::error::ConvertError;
use crate::retrieve;
use crate::workflow::input::{self, Candidate, SelectedInput};
use crate::workflow::request::{self, ConversionOutcome};
use crate::workflow::state::{BeginRefused, ConversionState, Workflow};
use std::path::Path;
use tracing::info;

/// Client-side workflow controller for the PDF→audio conversion service.
///
/// # Example
/// ```rust,no_run
/// use pdf2audio::{ClientConfig, ConversionController};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut controller = ConversionController::connect(ClientConfig::default()).await?;
/// controller.select_path("book.pdf".as_ref())?;
/// controller.select_language("fr")?;
/// controller.start_conversion().await?;
/// if let Some(url) = controller.retrieval_url() {
///     println!("audio ready at {url}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConversionController {
    config: ClientConfig,
    http: reqwest::Client,
    catalog: LanguageCatalog,
    workflow: Workflow,
    status_message: Option<String>,
}

impl ConversionController {
    /// Build the controller and load the language catalog.
    ///
    /// The catalog fetch happens exactly once, here. Its failure is not
    /// fatal: the controller comes up with an empty catalog and the default
    /// language, and file selection works normally.
    pub async fn connect(config: ClientConfig) -> Result<Self, ConvertError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ConvertError::InvalidConfig(format!("HTTP client: {e}")))?;

        let catalog =
            catalog::load_languages(&http, &config.base_url, config.catalog_timeout_secs).await;
        info!(
            "Connected to {} ({} languages)",
            config.base_url,
            catalog.len()
        );

        let controller = Self {
            workflow: Workflow::new(config.language.clone()),
            config,
            http,
            catalog,
            status_message: None,
        };
        // The startup language obeys the same rule as a user selection.
        if !controller.catalog.is_empty() && !controller.catalog.contains(controller.workflow.language())
        {
            return Err(ConvertError::UnknownLanguage {
                code: controller.workflow.language().to_string(),
            });
        }
        Ok(controller)
    }

    // ── Read side ────────────────────────────────────────────────────────

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The session's language catalog; empty if the startup fetch failed.
    pub fn catalog(&self) -> &LanguageCatalog {
        &self.catalog
    }

    /// Current workflow state. The single source of truth for UI gating.
    pub fn state(&self) -> &ConversionState {
        self.workflow.state()
    }

    /// Name of the currently selected file, if any.
    pub fn selected_file(&self) -> Option<&str> {
        self.workflow.input().map(SelectedInput::name)
    }

    pub fn selected_language(&self) -> &str {
        self.workflow.language()
    }

    /// Whether a start would currently be accepted.
    pub fn may_start(&self) -> bool {
        self.workflow.may_start()
    }

    /// The service's status text from the last successful run, for display.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    // ── Selection ────────────────────────────────────────────────────────

    /// File-picker path: read `path`, validate, publish.
    pub fn select_path(&mut self, path: &Path) -> Result<(), ConvertError> {
        let candidate = input::candidate_from_path(path)?;
        self.offer_candidate(candidate)
    }

    /// Validate one candidate and publish it, overwriting any prior
    /// selection. On rejection the prior selection is untouched.
    pub fn offer_candidate(&mut self, candidate: Candidate) -> Result<(), ConvertError> {
        let selected = input::validate(candidate)?;
        self.workflow.select_input(selected);
        Ok(())
    }

    /// Drag-drop path: only the first dropped file is considered; an empty
    /// drop changes nothing.
    pub fn offer_drop(
        &mut self,
        files: impl IntoIterator<Item = Candidate>,
    ) -> Result<(), ConvertError> {
        match input::first_candidate(files) {
            Some(candidate) => self.offer_candidate(candidate),
            None => Ok(()),
        }
    }

    /// Change the selected language.
    ///
    /// Once the catalog is loaded, only its keys are accepted; with an empty
    /// catalog (failed fetch) any code passes and the service has the final
    /// word.
    pub fn select_language(&mut self, code: impl Into<String>) -> Result<(), ConvertError> {
        let code = code.into();
        if !self.catalog.is_empty() && !self.catalog.contains(&code) {
            return Err(ConvertError::UnknownLanguage { code });
        }
        self.workflow.select_language(code);
        Ok(())
    }

    // ── Conversion ───────────────────────────────────────────────────────

    /// Start a conversion and await its completion.
    ///
    /// The inputs are captured here; changing the selection while the
    /// request is outstanding affects only the next run. This is the
    /// controller's only suspension point.
    ///
    /// Returns the resulting state: `Succeeded` or `Failed` after a run, or
    /// the current state unchanged when a run was already in flight (the
    /// guard makes a second start a no-op). A start with no file selected is
    /// refused with [`ConvertError::NoFileSelected`] and no state change.
    pub async fn start_conversion(&mut self) -> Result<&ConversionState, ConvertError> {
        let request = match self.workflow.try_begin() {
            Ok(request) => request,
            Err(BeginRefused::InFlight) => return Ok(self.workflow.state()),
            Err(BeginRefused::NoInput) => return Err(ConvertError::NoFileSelected),
        };
        self.status_message = None;

        let outcome = request::submit(
            &self.http,
            &self.config.base_url,
            &request,
            self.config.convert_timeout_secs,
        )
        .await;

        if let ConversionOutcome::Success {
            message: Some(ref message),
            ..
        } = outcome
        {
            self.status_message = Some(message.clone());
        }
        self.workflow.finish(outcome);
        Ok(self.workflow.state())
    }

    // ── Retrieval ────────────────────────────────────────────────────────

    /// The retrieval URL for the last run's result.
    ///
    /// `Some` only while the state is `Succeeded` — this is the caller-side
    /// gate the retriever relies on.
    pub fn retrieval_url(&self) -> Option<String> {
        self.workflow
            .state()
            .result_id()
            .map(|id| retrieve::audio_url(&self.config.base_url, id))
    }

    /// Download the audio for `result_id` to `dest`, returning bytes
    /// written.
    ///
    /// `result_id` comes from [`ConversionState::result_id`]; calling this
    /// outside `Succeeded` is a caller bug the state machine exists to
    /// prevent — no re-validation happens here.
    pub async fn save_audio(&self, result_id: &str, dest: &Path) -> Result<u64, ConvertError> {
        let url = retrieve::audio_url(&self.config.base_url, result_id);
        retrieve::save_audio(&self.http, &url, dest, self.config.download_timeout_secs).await
    }
}

// ── One-shot entry points ────────────────────────────────────────────────

/// Convert a single file end-to-end: connect, select, run one conversion.
///
/// Returns the controller so the caller can inspect the final
/// [`ConversionState`] and retrieve the audio. `language` of `None` keeps
/// the configured default.
///
/// # Errors
/// Boundary errors only (unreadable file, wrong type, unknown language, no
/// file). A failed run is not an `Err` — it is the returned controller's
/// `Failed` state.
pub async fn convert_path(
    path: &Path,
    language: Option<&str>,
    config: ClientConfig,
) -> Result<ConversionController, ConvertError> {
    let mut controller = ConversionController::connect(config).await?;
    controller.select_path(path)?;
    if let Some(code) = language {
        controller.select_language(code)?;
    }
    controller.start_conversion().await?;
    Ok(controller)
}

/// Synchronous wrapper around [`convert_path`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_path_sync(
    path: &Path,
    language: Option<&str>,
    config: ClientConfig,
) -> Result<ConversionController, ConvertError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ConvertError::InvalidConfig(format!("Failed to create tokio runtime: {e}")))?
        .block_on(convert_path(path, language, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::input::PDF_CONTENT_TYPE;

    fn controller_with_catalog(catalog: LanguageCatalog) -> ConversionController {
        let config = ClientConfig::default();
        ConversionController {
            workflow: Workflow::new(config.language.clone()),
            config,
            http: reqwest::Client::new(),
            catalog,
            status_message: None,
        }
    }

    fn loaded_catalog() -> LanguageCatalog {
        [
            ("en".to_string(), "English".to_string()),
            ("fr".to_string(), "French".to_string()),
        ]
        .into_iter()
        .collect()
    }

    fn pdf_candidate(name: &str) -> Candidate {
        Candidate {
            name: name.to_string(),
            payload: b"%PDF-1.4".to_vec(),
            content_type: PDF_CONTENT_TYPE.to_string(),
        }
    }

    #[test]
    fn loaded_catalog_rejects_unknown_language() {
        let mut c = controller_with_catalog(loaded_catalog());
        assert!(c.select_language("fr").is_ok());
        let err = c.select_language("de").unwrap_err();
        assert!(matches!(err, ConvertError::UnknownLanguage { .. }));
        // Refusal leaves the selection untouched.
        assert_eq!(c.selected_language(), "fr");
    }

    #[test]
    fn empty_catalog_accepts_any_language() {
        let mut c = controller_with_catalog(LanguageCatalog::empty());
        assert!(c.select_language("tlh").is_ok());
        assert_eq!(c.selected_language(), "tlh");
    }

    #[test]
    fn rejected_candidate_preserves_prior_selection() {
        let mut c = controller_with_catalog(loaded_catalog());
        c.offer_candidate(pdf_candidate("keep.pdf")).unwrap();

        let err = c
            .offer_candidate(Candidate {
                name: "nope.txt".into(),
                payload: vec![],
                content_type: "text/plain".into(),
            })
            .unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedType { .. }));
        assert_eq!(c.selected_file(), Some("keep.pdf"));
    }

    #[test]
    fn drop_considers_only_the_first_file() {
        let mut c = controller_with_catalog(loaded_catalog());
        c.offer_drop(vec![pdf_candidate("a.pdf"), pdf_candidate("b.pdf")])
            .unwrap();
        assert_eq!(c.selected_file(), Some("a.pdf"));

        // An empty drop changes nothing.
        c.offer_drop(Vec::new()).unwrap();
        assert_eq!(c.selected_file(), Some("a.pdf"));
    }

    #[tokio::test]
    async fn start_without_selection_is_refused_without_state_change() {
        let mut c = controller_with_catalog(loaded_catalog());
        let err = c.start_conversion().await.unwrap_err();
        assert!(matches!(err, ConvertError::NoFileSelected));
        assert_eq!(*c.state(), ConversionState::Idle);
        assert!(c.retrieval_url().is_none());
    }

    #[test]
    fn retrieval_url_is_gated_on_success() {
        let c = controller_with_catalog(loaded_catalog());
        assert!(c.retrieval_url().is_none());
    }
}
