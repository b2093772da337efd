//! Result retrieval: turn a completed run's result identifier into the
//! audio artifact.
//!
//! The controller never parses the audio payload — it only resolves the
//! identifier to a fetchable location and, when asked, streams the bytes to
//! disk (the CLI analogue of a browser opening the download URL). Callers
//! gate on the state machine: retrieval is only meaningful once the state is
//! `Succeeded`, and nothing here re-validates that.

use crate::error::ConvertError;
use futures_util::StreamExt;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Resolve a result identifier to its retrieval URL.
///
/// The identifier is opaque; it is placed in the path verbatim.
pub fn audio_url(base_url: &str, result_id: &str) -> String {
    format!("{base_url}/api/audio/{result_id}")
}

/// Stream the finished audio to `dest`, returning the bytes written.
///
/// Writes to `dest.part` first and renames on completion so an interrupted
/// download never leaves a half-written artifact at the target path.
pub async fn save_audio(
    client: &reqwest::Client,
    url: &str,
    dest: &Path,
    timeout_secs: u64,
) -> Result<u64, ConvertError> {
    debug!("Retrieving audio from {url}");

    let io_err = |e: std::io::Error| ConvertError::AudioSaveFailed {
        path: dest.to_path_buf(),
        source: e,
    };
    let transport_err = |e: reqwest::Error| {
        warn!("Audio retrieval failed: {e}");
        ConvertError::TransportFailed
    };

    let response = client
        .get(url)
        .timeout(Duration::from_secs(timeout_secs))
        .send()
        .await
        .map_err(transport_err)?;

    if !response.status().is_success() {
        warn!("Audio retrieval returned HTTP {}", response.status());
        return Err(ConvertError::TransportFailed);
    }

    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }
    }

    let tmp_path = dest.with_extension("part");
    let mut file = tokio::fs::File::create(&tmp_path).await.map_err(io_err)?;

    let mut written: u64 = 0;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(transport_err)?;
        file.write_all(&chunk).await.map_err(io_err)?;
        written += chunk.len() as u64;
    }
    file.flush().await.map_err(io_err)?;
    drop(file);

    tokio::fs::rename(&tmp_path, dest).await.map_err(io_err)?;

    info!("Saved {} bytes to {}", written, dest.display());
    Ok(written)
}
