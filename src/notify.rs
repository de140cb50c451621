//! Chat notifications.
//!
//! [`Dispatcher`] is what the poll loop talks to.  It owns the destination
//! chat id and a [`ChatTransport`], and it never returns an error: the loop
//! reports its own failures through the dispatcher, so a failing send must
//! not be able to feed back into the loop.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::TransportError;

/// Something that can deliver a text message to a chat.
pub trait ChatTransport {
    fn send_message(&self, chat_id: &str, text: &str) -> Result<(), TransportError>;
}

/// Sends every message to one fixed chat, logging and swallowing failures.
pub struct Dispatcher<C> {
    transport: C,
    chat_id: String,
}

impl<C: ChatTransport> Dispatcher<C> {
    pub fn new(transport: C, chat_id: impl Into<String>) -> Self {
        Self {
            transport,
            chat_id: chat_id.into(),
        }
    }

    /// Best-effort delivery of `text`.
    pub fn notify(&self, text: &str) {
        match self.transport.send_message(&self.chat_id, text) {
            Ok(()) => log::debug!("Sent message: \"{text}\""),
            Err(e) => log::error!("Failed to send message \"{text}\": {e}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Telegram Bot API
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// The envelope every Bot API method replies with.
#[derive(Deserialize)]
struct BotReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// [`ChatTransport`] over the Telegram Bot API `sendMessage` method.
pub struct TelegramBot {
    client: reqwest::blocking::Client,
    method_url: String,
}

impl TelegramBot {
    /// # Arguments
    ///
    /// * `api_url` — Bot API base, normally `https://api.telegram.org`.
    /// * `token` — bot token issued by BotFather.
    /// * `timeout` — upper bound on a single send.
    pub fn new(api_url: &str, token: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            method_url: send_message_url(api_url, token),
        })
    }
}

fn send_message_url(api_url: &str, token: &str) -> String {
    format!("{}/bot{token}/sendMessage", api_url.trim_end_matches('/'))
}

impl ChatTransport for TelegramBot {
    fn send_message(&self, chat_id: &str, text: &str) -> Result<(), TransportError> {
        let response = self
            .client
            .post(&self.method_url)
            .json(&SendMessage { chat_id, text })
            .send()?;
        let status = response.status().as_u16();

        // Telegram puts the reason in the body for error statuses too.
        let reply: BotReply = response.json()?;
        check_reply(status, &reply)
    }
}

/// Interpret a decoded Bot API reply.  Delivered only when the HTTP status
/// is 2xx and the envelope says `ok`.
fn check_reply(status: u16, reply: &BotReply) -> Result<(), TransportError> {
    if (200..300).contains(&status) && reply.ok {
        return Ok(());
    }
    Err(TransportError(format!(
        "Telegram API rejected the message ({status}): {}",
        reply.description.as_deref().unwrap_or("no description")
    )))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
