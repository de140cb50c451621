//! homework-status-bot — relays homework review status changes to Telegram.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌───────────┐  raw JSON  ┌─────────────┐  record  ┌───────────┐
//! │ api::     │ ─────────► │ api::       │ ───────► │ status::  │
//! │ ApiClient │            │ validate()  │          │ translate │
//! └───────────┘            └─────────────┘          └───────────┘
//!       ▲                                                 │ message
//!       │ poll(window)                                    ▼
//! ┌───────────┐          error / status text       ┌────────────┐
//! │ poll.rs   │ ─────────────────────────────────► │ notify::   │
//! │ PollLoop  │                                    │ Dispatcher │
//! └───────────┘                                    └────────────┘
//! ```
//!
//! * **`api/`** — the `HttpFetch` capability, the poll request and the shape
//!   checks on its response.
//! * **`status`** — review verdicts and the status-change message.
//! * **`notify`** — the `ChatTransport` capability, the Telegram Bot API
//!   transport and the failure-swallowing dispatcher.
//! * **`poll`** — the cycle: fetch, validate, translate, notify, sleep.
//! * **`config`** — flags / environment, checked once at startup.
//! * **`main`** — wires everything together and sets up logging.

mod api;
mod config;
mod error;
mod notify;
mod poll;
mod status;

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use clap::Parser;

use api::{ApiClient, ReqwestFetch};
use config::Config;
use notify::{Dispatcher, TelegramBot};
use poll::{PollLoop, ThreadSleeper};

/// Filter used when `RUST_LOG` is not set: everything from this crate,
/// only warnings from dependencies.
const DEFAULT_LOG_FILTER: &str = "warn,homework_status_bot=debug";

/// Configure `env_logger` with a `time, LEVEL, message, target` line format,
/// writing to `log_file` (appending) when given, stderr otherwise.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{}, {}, {}, {}",
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            record.level(),
            record.args(),
            record.target()
        )
    });

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // A missing .env file is fine; the values may come from the environment.
    dotenvy::dotenv().ok();
    let config = Config::parse();
    init_logging(config.log_file.as_deref())?;

    // -- the one fatal check -------------------------------------------------
    let settings = match config.validate() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{e}");
            return Err(e).context("cannot start without the required configuration");
        }
    };

    // -- collaborators -------------------------------------------------------
    let fetch = ReqwestFetch::new(settings.http_timeout).context("failed to build HTTP client")?;
    let api = ApiClient::new(fetch, &settings.endpoint, &settings.practicum_token);

    let bot = TelegramBot::new(
        &settings.telegram_api_url,
        &settings.telegram_token,
        settings.http_timeout,
    )
    .context("failed to build Telegram client")?;
    let dispatcher = Dispatcher::new(bot, &settings.telegram_chat_id);

    // -- run until killed ----------------------------------------------------
    let look_back = i64::try_from(settings.look_back.as_secs()).unwrap_or(i64::MAX);
    let window_start = Utc::now().timestamp().saturating_sub(look_back);

    PollLoop::new(
        api,
        dispatcher,
        ThreadSleeper,
        settings.retry_period,
        window_start,
    )
    .run();

    Ok(())
}
