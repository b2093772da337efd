//! # pdf2audio
//!
//! Client for a remote PDF→audio conversion service: submit a document,
//! pick a spoken language, get back a generated audio rendition.
//!
//! ## Why this crate?
//!
//! The conversion engine (text extraction, speech synthesis, audio encoding)
//! lives behind an HTTP API and is deliberately opaque. What this crate owns
//! is everything in front of it — the part with actual control flow: input
//! validation, unifying drag-drop and picker input, the single-flight
//! request lifecycle, and the state machine that decides when a conversion
//! may start and when a result may be retrieved.
//!
//! ## Workflow Overview
//!
//! ```text
//! file
//!  │
//!  ├─ 1. Validate  one candidate, declared type must be application/pdf
//!  ├─ 2. Select    file + language held by the state machine (last write wins)
//!  ├─ 3. Convert   one multipart POST; Idle → Running → Succeeded / Failed
//!  └─ 4. Retrieve  resolve the result id to /api/audio/{id} and download
//! ```
//!
//! The language catalog is fetched once at startup (`GET /api/languages`);
//! if that fails the controller degrades to an empty catalog and keeps
//! working.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2audio::{convert_path, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::builder()
//!         .base_url("http://localhost:5000")
//!         .build()?;
//!     let controller = convert_path("book.pdf".as_ref(), Some("fr"), config).await?;
//!     match controller.state().result_id() {
//!         Some(id) => {
//!             controller.save_audio(id, "book.mp3".as_ref()).await?;
//!         }
//!         None => eprintln!("{:?}", controller.state().failure_message()),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2audio` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! pdf2audio = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod retrieve;
pub mod workflow;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use catalog::LanguageCatalog;
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL, DEFAULT_LANGUAGE};
pub use controller::{convert_path, convert_path_sync, ConversionController};
pub use error::ConvertError;
pub use workflow::input::{Candidate, DragPhase, DropZone, SelectedInput, PDF_CONTENT_TYPE};
pub use workflow::request::{ConversionOutcome, TRANSPORT_FAILURE_MESSAGE};
pub use workflow::state::ConversionState;
