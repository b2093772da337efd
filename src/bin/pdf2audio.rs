//! CLI binary for pdf2audio.
//!
//! A thin shim over the library crate that maps CLI flags to a
//! `ConversionController` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2audio::{ClientConfig, ConversionController, ConversionState, ConvertError};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert with the default language (en), download next to the cwd
  pdf2audio book.pdf

  # French audio to a chosen file
  pdf2audio book.pdf --language fr -o book_fr.mp3

  # Just print the retrieval URL, don't download
  pdf2audio book.pdf --url-only

  # Which languages does the service offer?
  pdf2audio --list-languages

  # Against a remote service
  pdf2audio --server http://tts.example.net:5000 book.pdf

ENVIRONMENT VARIABLES:
  PDF2AUDIO_SERVER     Conversion service base URL
  PDF2AUDIO_LANGUAGE   Language code (must be offered by the service)
  PDF2AUDIO_TIMEOUT    Conversion request timeout in seconds

SETUP:
  1. Start (or point at) a conversion service:  PDF2AUDIO_SERVER=http://host:5000
  2. Convert:                                   pdf2audio book.pdf -o book.mp3

  The service catalog is fetched once at startup; if it cannot be reached the
  language list is simply unavailable and conversion still works with codes
  the service accepts.
"#;

/// Convert PDF files to spoken audio via a remote conversion service.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2audio",
    version,
    about = "Convert PDF files to spoken audio via a remote conversion service",
    long_about = "Submit a PDF document to a conversion service and retrieve the generated \
audio rendition in the selected spoken language. The service is treated as atomic: one \
request per conversion, no resume, no partial progress.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file to convert.
    input: Option<PathBuf>,

    /// Write the audio to this file instead of the service-chosen name.
    #[arg(short, long, env = "PDF2AUDIO_OUTPUT")]
    output: Option<PathBuf>,

    /// Spoken language code (e.g. en, fr, ar, es).
    #[arg(short, long, env = "PDF2AUDIO_LANGUAGE", default_value = "en")]
    language: String,

    /// Conversion service base URL.
    #[arg(long, env = "PDF2AUDIO_SERVER", default_value = "http://localhost:5000")]
    server: String,

    /// Conversion request timeout in seconds.
    #[arg(long, env = "PDF2AUDIO_TIMEOUT", default_value_t = 120)]
    timeout: u64,

    /// Print the retrieval URL instead of downloading the audio.
    #[arg(long)]
    url_only: bool,

    /// List the languages the service offers and exit.
    #[arg(long)]
    list_languages: bool,

    /// Output a JSON summary instead of human-readable text.
    #[arg(long, env = "PDF2AUDIO_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2AUDIO_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2AUDIO_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the spinner is active; the
    // spinner provides all the feedback that matters to the user.
    let show_spinner = !cli.quiet && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_spinner {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    // ── Connect ──────────────────────────────────────────────────────────
    let config = ClientConfig::builder()
        .base_url(&cli.server)
        .language(&cli.language)
        .convert_timeout_secs(cli.timeout)
        .build()
        .context("Invalid configuration")?;

    let mut controller = ConversionController::connect(config)
        .await
        .context("Failed to set up the conversion client")?;

    // ── List-languages mode ──────────────────────────────────────────────
    if cli.list_languages {
        let catalog = controller.catalog();
        if catalog.is_empty() {
            eprintln!(
                "{} language catalog unavailable at {}",
                cyan("⚠"),
                cli.server
            );
            return Ok(());
        }
        if cli.json {
            let entries: serde_json::Map<String, serde_json::Value> = catalog
                .iter()
                .map(|(code, name)| (code.to_string(), serde_json::Value::from(name)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        } else {
            for (code, name) in catalog.iter() {
                println!("{}  {}", bold(code), name);
            }
        }
        return Ok(());
    }

    let input = cli
        .input
        .clone()
        .context("No input file given (see --help)")?;

    // ── Select and convert ───────────────────────────────────────────────
    controller.select_path(&input)?;

    let spinner = if show_spinner {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Converting");
        bar.set_message(format!(
            "{} → {} audio",
            input.display(),
            controller
                .catalog()
                .display_name(controller.selected_language())
                .unwrap_or(controller.selected_language()),
        ));
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    } else {
        None
    };

    controller.start_conversion().await?;

    if let Some(bar) = &spinner {
        bar.finish_and_clear();
    }

    // ── Report and retrieve ──────────────────────────────────────────────
    match controller.state().clone() {
        ConversionState::Succeeded { result_id } => {
            if !cli.quiet && !cli.json {
                let status = controller
                    .status_message()
                    .unwrap_or("conversion complete")
                    .to_string();
                eprintln!("{} {}", green("✔"), bold(&status));
            }

            let url = controller
                .retrieval_url()
                .context("retrieval URL must exist in the Succeeded state")?;

            if cli.url_only {
                print_summary(&cli, &controller, &result_id, &url, None)?;
                return Ok(());
            }

            let dest = cli
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(&result_id));
            let bytes = controller.save_audio(&result_id, &dest).await?;
            if !cli.quiet && !cli.json {
                eprintln!(
                    "   {}  →  {}",
                    dim(&format!("{bytes} bytes")),
                    bold(&dest.display().to_string()),
                );
            }
            print_summary(&cli, &controller, &result_id, &url, Some(&dest))?;
            Ok(())
        }
        ConversionState::Failed { message } => {
            if !cli.quiet && !cli.json {
                eprintln!("{} {}", red("✘"), message);
            }
            // Preserve the service/transport split in the exit error.
            let err = if message == pdf2audio::TRANSPORT_FAILURE_MESSAGE {
                ConvertError::TransportFailed
            } else {
                ConvertError::ServiceRefused { message }
            };
            Err(err.into())
        }
        state => anyhow::bail!("conversion ended in unexpected state '{}'", state.label()),
    }
}

/// Print the machine-readable summary when `--json` is set.
fn print_summary(
    cli: &Cli,
    controller: &ConversionController,
    result_id: &str,
    url: &str,
    saved_to: Option<&std::path::Path>,
) -> Result<()> {
    if cli.json {
        let summary = serde_json::json!({
            "state": controller.state().label(),
            "result_id": result_id,
            "url": url,
            "message": controller.status_message(),
            "saved_to": saved_to.map(|p| p.display().to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if cli.url_only {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{url}").context("Failed to write to stdout")?;
    }
    Ok(())
}
