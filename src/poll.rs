//! The polling loop.
//!
//! Runs on the main thread.  Each cycle fetches the API once, validates the
//! response, turns the newest homework record into a message and sends it,
//! then sleeps for the retry period.  Errors never leave a cycle: they are
//! logged and, unless they repeat the last reported error word for word,
//! sent to the chat.
//!
//! ## Poll window
//!
//! The window advances as soon as a fetch returns a body carrying an integer
//! `current_date`, even if the rest of that body is rejected later in the
//! cycle.  A single malformed record therefore cannot pin the loop to the
//! same window.  The window never moves backwards.

use std::ops::ControlFlow;
use std::thread;
use std::time::Duration;

use crate::api::{validate, ApiClient, HttpFetch};
use crate::error::CycleError;
use crate::notify::{ChatTransport, Dispatcher};
use crate::status;

/// Sent once when the loop starts.
pub const STARTED_MESSAGE: &str = "Бот включен.";

/// Prefix of every error notification.
const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// The wait between cycles.
///
/// Returning [`ControlFlow::Break`] ends the loop; the production sleeper
/// never does, so the process runs until it is killed.
pub trait Sleeper {
    fn sleep(&mut self, period: Duration) -> ControlFlow<()>;
}

/// Blocks the current thread for the whole period.
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, period: Duration) -> ControlFlow<()> {
        thread::sleep(period);
        ControlFlow::Continue(())
    }
}

pub struct PollLoop<F, C, S> {
    api: ApiClient<F>,
    dispatcher: Dispatcher<C>,
    sleeper: S,
    period: Duration,
    /// Start of the window the next poll asks about.
    window: i64,
    /// Text of the last error sent to the chat.
    last_error: Option<String>,
}

impl<F, C, S> PollLoop<F, C, S>
where
    F: HttpFetch,
    C: ChatTransport,
    S: Sleeper,
{
    pub fn new(
        api: ApiClient<F>,
        dispatcher: Dispatcher<C>,
        sleeper: S,
        period: Duration,
        window_start: i64,
    ) -> Self {
        Self {
            api,
            dispatcher,
            sleeper,
            period,
            window: window_start,
            last_error: None,
        }
    }

    #[cfg(test)]
    pub fn window(&self) -> i64 {
        self.window
    }

    /// Announce the start, then cycle until the sleeper says stop.
    pub fn run(mut self) {
        log::info!(
            "Polling {} every {}s starting from {}",
            self.api.endpoint(),
            self.period.as_secs(),
            self.window
        );
        self.dispatcher.notify(STARTED_MESSAGE);

        loop {
            self.run_cycle();
            if self.sleeper.sleep(self.period).is_break() {
                log::info!("Poll loop stopped");
                return;
            }
        }
    }

    /// One fetch → validate → notify pass.  Never fails.
    pub fn run_cycle(&mut self) {
        if let Err(e) = self.try_cycle() {
            self.report(e);
        }
    }

    fn try_cycle(&mut self) -> Result<(), CycleError> {
        let polled_from = self.window;
        let raw = self.api.poll(polled_from)?;

        if let Some(current_date) = validate::current_date(&raw) {
            self.advance(current_date);
        }

        let response = validate::validate(&raw)?;
        match response.homeworks.first() {
            Some(record) => {
                let message = status::translate(record)?;
                self.dispatcher.notify(&message);
            }
            None => log::debug!("No status changes since {polled_from}"),
        }
        Ok(())
    }

    fn advance(&mut self, current_date: i64) {
        if current_date > self.window {
            log::info!("Poll window advanced from {} to {current_date}", self.window);
            self.window = current_date;
        } else if current_date < self.window {
            log::warn!(
                "Server time {current_date} is behind the poll window {}; keeping the window",
                self.window
            );
        }
    }

    fn report(&mut self, err: CycleError) {
        let text = format!("{FAILURE_PREFIX}: {err}");
        log::error!("[{}] {text}", err.kind());

        if self.last_error.as_deref() == Some(text.as_str()) {
            log::warn!("Same error as last reported, not sending it to the chat again");
            return;
        }
        self.dispatcher.notify(&text);
        self.last_error = Some(text);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
