// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: MIT

use crate::MessageInbox;

/// One inbound `(topic, payload)` message.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedMessage {
    pub topic: String,
    pub payload: String,
}

impl FeedMessage {
    pub fn new(topic: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
        }
    }
}

pub type MessageSourcePointer = Box<dyn MessageSource + Send>;

/// A source of feed messages, e.g. a broker subscription or a replay.
pub trait MessageSource {
    /// Blocks until the next message is available.
    ///
    /// Returns `Ok(None)` once the source is exhausted. Errors concern a single message;
    /// callers may keep asking afterwards.
    fn next_message(&mut self) -> Result<Option<FeedMessage>, Box<dyn std::error::Error>>;
}

/// Consecutive errors after which the feed thread gives up on its source.
const MAX_CONSECUTIVE_ERRORS: usize = 10;

/// Pumps `source` on a background thread into `inbox` until it is exhausted.
pub fn spawn_feed(
    mut source: MessageSourcePointer,
    inbox: MessageInbox<FeedMessage>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let mut errors = 0;
        loop {
            match source.next_message() {
                Ok(Some(message)) => {
                    errors = 0;
                    log::debug!("Feed message on {}", message.topic);
                    inbox.push(message);
                }
                Ok(None) => {
                    log::info!("Message feed exhausted");
                    break;
                }
                Err(e) => {
                    errors += 1;
                    log::warn!("Message feed error: {e}");
                    if errors >= MAX_CONSECUTIVE_ERRORS {
                        log::error!("Giving up on message feed after {errors} errors in a row");
                        break;
                    }
                }
            }
        }
    })
}
