//! The conversion workflow state machine.
//!
//! [`Workflow`] is the single source of truth for the selected file, the
//! selected language, and the conversion lifecycle. Presentation layers
//! project this state; they never derive or duplicate it.
//!
//! The state machine transitions are:
//!
//! ```text
//! Idle ──try_begin (input present)──▶ Running
//! Running ──finish(Success)─────────▶ Succeeded(result_id)
//! Running ──finish(ServiceFailure)──▶ Failed(message)
//! Running ──finish(TransportFailure)▶ Failed("failed to convert")
//! Succeeded / Failed ──try_begin────▶ Running   (prior payload discarded)
//! ```
//!
//! `Succeeded` and `Failed` end the current run but not the session: a fresh
//! `try_begin` is allowed from either, provided a file is still selected.
//! At most one conversion is in flight at a time — `try_begin` while
//! `Running` is refused, and that refusal is the guard, not a presentation
//! nicety.

use crate::workflow::input::SelectedInput;
use crate::workflow::request::{ConversionOutcome, TRANSPORT_FAILURE_MESSAGE};
use tracing::debug;

// ---------------------------------------------------------------------------
// ConversionState
// ---------------------------------------------------------------------------

/// Lifecycle of the current (or most recent) conversion run.
///
/// Owned exclusively by [`Workflow`]; everything else reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionState {
    /// No conversion attempted yet (or none since construction).
    Idle,

    /// Exactly one request is outstanding against the service.
    Running,

    /// The service produced an audio artifact; `result_id` retrieves it.
    Succeeded {
        /// Opaque identifier returned by the service. Never parsed.
        result_id: String,
    },

    /// The run ended without a result.
    Failed {
        /// Human-readable reason: the service's own words for a service
        /// failure, the fixed generic text for a transport failure.
        message: String,
    },
}

impl ConversionState {
    /// `true` while a request is outstanding.
    ///
    /// The UI uses this to disable the convert trigger; [`Workflow`] uses it
    /// to refuse a second start.
    pub fn is_running(&self) -> bool {
        matches!(self, ConversionState::Running)
    }

    /// The result identifier, if the last run succeeded.
    pub fn result_id(&self) -> Option<&str> {
        match self {
            ConversionState::Succeeded { result_id } => Some(result_id),
            _ => None,
        }
    }

    /// The failure message, if the last run failed.
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            ConversionState::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// A short label for a status line.
    pub fn label(&self) -> &'static str {
        match self {
            ConversionState::Idle => "idle",
            ConversionState::Running => "converting",
            ConversionState::Succeeded { .. } => "done",
            ConversionState::Failed { .. } => "failed",
        }
    }
}

impl Default for ConversionState {
    fn default() -> Self {
        ConversionState::Idle
    }
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

/// The inputs captured at start time, frozen for the duration of the run.
///
/// Selections may change while the request is outstanding; the run completes
/// against this snapshot, not a live re-read.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub input: SelectedInput,
    pub language: String,
}

/// Why a start was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginRefused {
    /// A conversion is already outstanding; the caller treats this as a
    /// no-op.
    InFlight,
    /// No file is selected; surfaced to the user as a prompt.
    NoInput,
}

/// Coordinates the selected file, the selected language, and the conversion
/// lifecycle. Sole writer of [`ConversionState`].
#[derive(Debug)]
pub struct Workflow {
    input: Option<SelectedInput>,
    language: String,
    state: ConversionState,
}

impl Workflow {
    pub fn new(default_language: impl Into<String>) -> Self {
        Self {
            input: None,
            language: default_language.into(),
            state: ConversionState::Idle,
        }
    }

    /// Publish a validated selection, overwriting any prior one.
    ///
    /// Allowed at any time, including while `Running` — the outstanding run
    /// keeps its captured snapshot.
    pub fn select_input(&mut self, input: SelectedInput) {
        debug!("Selected input: {}", input.name());
        self.input = Some(input);
    }

    /// Change the selected language. Same ownership rule as
    /// [`Self::select_input`].
    pub fn select_language(&mut self, code: impl Into<String>) {
        self.language = code.into();
    }

    pub fn input(&self) -> Option<&SelectedInput> {
        self.input.as_ref()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn state(&self) -> &ConversionState {
        &self.state
    }

    /// Whether a start would currently be accepted. Presentation reads this
    /// to enable or disable the trigger; the guard itself lives in
    /// [`Self::try_begin`].
    pub fn may_start(&self) -> bool {
        self.input.is_some() && !self.state.is_running()
    }

    /// Guarded entry into `Running`.
    ///
    /// On success the state becomes `Running` and the returned
    /// [`ConversionRequest`] is the frozen snapshot the orchestrator submits.
    /// Refusals change nothing: a second start while `Running` is a no-op,
    /// a start with no input is a user-visible prompt.
    pub fn try_begin(&mut self) -> Result<ConversionRequest, BeginRefused> {
        if self.state.is_running() {
            debug!("Start refused: conversion already in flight");
            return Err(BeginRefused::InFlight);
        }
        let input = self.input.as_ref().ok_or(BeginRefused::NoInput)?.clone();

        self.state = ConversionState::Running;
        Ok(ConversionRequest {
            input,
            language: self.language.clone(),
        })
    }

    /// Record the outcome of the outstanding run, overwriting any prior
    /// terminal payload.
    ///
    /// Only the orchestrator's completion path calls this, and only ever for
    /// the one run the `Running` guard admitted.
    pub fn finish(&mut self, outcome: ConversionOutcome) {
        debug_assert!(
            self.state.is_running(),
            "finish() without an outstanding run"
        );
        self.state = match outcome {
            ConversionOutcome::Success { result_id, .. } => {
                ConversionState::Succeeded { result_id }
            }
            ConversionOutcome::ServiceFailure { message } => ConversionState::Failed { message },
            ConversionOutcome::TransportFailure => ConversionState::Failed {
                message: TRANSPORT_FAILURE_MESSAGE.to_string(),
            },
        };
        debug!("Conversion finished: {}", self.state.label());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
