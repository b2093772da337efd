//! Error types for the pdf2audio library.
//!
//! Two kinds of failure never meet:
//!
//! * [`ConvertError`] — boundary errors: bad input, a refused start, a broken
//!   config, a failed retrieval write. Returned as `Err(ConvertError)` from
//!   the functions where they occur and handled right there.
//!
//! * Conversion-run failures — the remote service said no, or the transport
//!   broke. These never surface as `Err`: the orchestrator folds them into
//!   [`crate::workflow::state::ConversionState::Failed`] so the controller
//!   stays alive and a fresh run can begin. [`ConvertError::ServiceRefused`]
//!   and [`ConvertError::TransportFailed`] exist only so the CLI can map a
//!   `Failed` run onto a non-zero exit.
//!
//! Service error messages are shown to the user verbatim; transport causes go
//! to the `tracing` sink and the user sees only the fixed
//! [`crate::workflow::request::TRANSPORT_FAILURE_MESSAGE`].

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdf2audio library.
///
/// Run-level failures are not propagated here; they live in
/// [`crate::workflow::state::ConversionState::Failed`].
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The candidate file's declared content type is not PDF.
    #[error("'{name}' is not a PDF (declared content type: {content_type})\nOnly application/pdf files can be converted.")]
    UnsupportedType { name: String, content_type: String },

    /// A conversion was started with no file selected.
    #[error("No PDF file selected.\nSelect a file before starting a conversion.")]
    NoFileSelected,

    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    // ── Language errors ───────────────────────────────────────────────────
    /// The selected language code is not in the loaded catalog.
    #[error("Unknown language '{code}'\nRun with --list-languages to see what the service offers.")]
    UnknownLanguage { code: String },

    // ── Service errors ────────────────────────────────────────────────────
    /// The language catalog could not be fetched. Never fatal — the caller
    /// degrades to an empty catalog.
    #[error("Language catalog unavailable: {reason}")]
    CatalogUnavailable { reason: String },

    /// The conversion service explicitly reported failure.
    #[error("Conversion failed: {message}")]
    ServiceRefused { message: String },

    /// The conversion request never produced a usable reply.
    #[error("Conversion failed: could not reach the conversion service")]
    TransportFailed,

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not write the retrieved audio to disk.
    #[error("Failed to save audio to '{path}': {source}")]
    AudioSaveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
