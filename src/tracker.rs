//! Simulated live tracking.
//!
//! A [`StatusCursor`] walks a fixed list of delivery updates and stops at the
//! last one. [`Tracker`] moves it forward on a timer while the tracking view
//! is open; dropping the tracker cancels the timer.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::time::Duration;
use tokio::runtime::{Handle, TryCurrentError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::debug;

/// Delivery updates, in order.
pub const STATUS_MESSAGES: [&str; 6] = [
    "Searching for nearby riders...",
    "Rider 'Marco' accepted the task!",
    "Marco is 1.2km away from pickup point.",
    "Rider arrived at pickup location.",
    "Package collected and verified.",
    "Navigating to drop-off point...",
];

pub const DEFAULT_TICK: Duration = Duration::from_millis(4000);

/// Position in [`STATUS_MESSAGES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCursor {
    index: usize,
}

impl StatusCursor {
    const LAST: usize = STATUS_MESSAGES.len() - 1;

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn message(&self) -> &'static str {
        STATUS_MESSAGES[self.index]
    }

    /// Statuses reached so far, newest first.
    pub fn history(&self) -> impl Iterator<Item = &'static str> {
        STATUS_MESSAGES[..=self.index].iter().rev().copied()
    }

    pub fn is_terminal(&self) -> bool {
        self.index == Self::LAST
    }

    /// Step forward once. Returns `false` at the last status.
    pub fn advance(&mut self) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.index += 1;
        true
    }
}

impl Serialize for StatusCursor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let history: Vec<&str> = self.history().collect();
        let mut state = serializer.serialize_struct("StatusCursor", 3)?;
        state.serialize_field("index", &self.index)?;
        state.serialize_field("message", self.message())?;
        state.serialize_field("history", &history)?;
        state.end()
    }
}

/// Timer task advancing a [`StatusCursor`] every `period`.
///
/// Starts at index 0. The task ends on its own at the last status and is
/// aborted when the tracker is dropped.
#[derive(Debug)]
pub struct Tracker {
    cursor: watch::Receiver<StatusCursor>,
    task: JoinHandle<()>,
}

impl Tracker {
    /// Spawn the timer on the current Tokio runtime.
    ///
    /// Fails without touching anything when called outside a runtime.
    pub fn start(period: Duration) -> Result<Self, TryCurrentError> {
        let runtime = Handle::try_current()?;
        let (sender, cursor) = watch::channel(StatusCursor::default());

        let task = runtime.spawn(async move {
            let mut ticks = interval(period);
            // the first tick completes immediately
            ticks.tick().await;

            loop {
                ticks.tick().await;
                let mut current = StatusCursor::default();
                sender.send_modify(|cursor| {
                    cursor.advance();
                    current = *cursor;
                });
                debug!(index = current.index(), status = current.message(), "tracking status advanced");
                if current.is_terminal() {
                    break;
                }
            }
        });

        debug!(period_ms = period.as_millis() as u64, "tracker started");
        Ok(Self { cursor, task })
    }

    pub fn status(&self) -> StatusCursor {
        *self.cursor.borrow()
    }

    /// Receiver notified on every advance.
    pub fn subscribe(&self) -> watch::Receiver<StatusCursor> {
        self.cursor.clone()
    }
}

impl Drop for Tracker {
    fn drop(&mut self) {
        self.task.abort();
        debug!(index = self.status().index(), "tracker stopped");
    }
}
