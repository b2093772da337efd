//! The one outbound conversion request: build the multipart submission and
//! map the reply into a typed outcome.
//!
//! This module is intentionally thin — guarding and state recording live in
//! [`crate::workflow::state`]; this is the only place in the core with
//! network I/O and the controller's single suspension point.
//!
//! ## Service-reported vs. transport failure
//!
//! The distinction matters to the end user: the service's own error ("No
//! readable text found in the PDF") is worth showing verbatim, while a
//! connection reset is not. Transport-level causes are logged through
//! `tracing` for diagnostics; the user-facing message for all of them is the
//! fixed [`TRANSPORT_FAILURE_MESSAGE`].

use crate::workflow::state::ConversionRequest;
use reqwest::multipart;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// The fixed user-facing message for any transport-level failure.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "failed to convert";

/// Result of one conversion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// The service produced an audio artifact.
    Success {
        /// Opaque identifier for retrieval.
        result_id: String,
        /// Optional status text from the service, for display.
        message: Option<String>,
    },
    /// The service explicitly refused; its message is shown verbatim.
    ServiceFailure { message: String },
    /// The request never produced a usable reply (network error, timeout,
    /// malformed body). The cause is logged, not shown.
    TransportFailure,
}

/// Wire format of the `POST /api/convert` reply.
///
/// Success replies carry `success: true`, `audio_file`, and a status
/// `message`; failure replies carry only `error` (no `success` field at
/// all), so everything defaults.
#[derive(Debug, Deserialize)]
struct ConvertReply {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    audio_file: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Submit one conversion request and await its outcome.
///
/// One multipart POST with the raw file payload under `file` and the
/// language code under `language`. No retry, no deduplication: two calls
/// with identical inputs are two independent remote requests.
///
/// The reply body, not the HTTP status, carries the verdict — the service
/// pairs its error bodies with 4xx/5xx statuses, and the body is
/// authoritative.
pub async fn submit(
    client: &reqwest::Client,
    base_url: &str,
    request: &ConversionRequest,
    timeout_secs: u64,
) -> ConversionOutcome {
    let url = format!("{base_url}/api/convert");
    debug!(
        "Submitting '{}' for {} conversion to {url}",
        request.input.name(),
        request.language
    );

    let file_part = match multipart::Part::bytes(request.input.payload().to_vec())
        .file_name(request.input.name().to_string())
        .mime_str(request.input.content_type())
    {
        Ok(part) => part,
        Err(e) => {
            warn!("Could not build multipart body: {e}");
            return ConversionOutcome::TransportFailure;
        }
    };
    let form = multipart::Form::new()
        .part("file", file_part)
        .text("language", request.language.clone());

    let response = match client
        .post(&url)
        .multipart(form)
        .timeout(Duration::from_secs(timeout_secs))
        .send()
        .await
    {
        Ok(r) => r,
        Err(e) => {
            warn!("Conversion request failed in transit: {e}");
            return ConversionOutcome::TransportFailure;
        }
    };

    let status = response.status();
    match response.json::<ConvertReply>().await {
        Ok(reply) => interpret_reply(reply),
        Err(e) => {
            warn!("Conversion reply (HTTP {status}) was not the expected JSON: {e}");
            ConversionOutcome::TransportFailure
        }
    }
}

/// Map a parsed reply onto the outcome union.
///
/// A reply that parses but does not honour the contract (success without a
/// result id, failure without an error message) is a transport failure: the
/// service did not speak the protocol, so it has no words to show verbatim.
fn interpret_reply(reply: ConvertReply) -> ConversionOutcome {
    if reply.success {
        match reply.audio_file {
            Some(result_id) if !result_id.is_empty() => ConversionOutcome::Success {
                result_id,
                message: reply.message,
            },
            _ => {
                warn!("Success reply without a result identifier");
                ConversionOutcome::TransportFailure
            }
        }
    } else {
        match reply.error {
            Some(message) if !message.is_empty() => ConversionOutcome::ServiceFailure { message },
            _ => {
                warn!("Failure reply without an error message");
                ConversionOutcome::TransportFailure
            }
        }
    }
}
