// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: MIT

mod messagesource;
mod dummymessagesource;
mod linemessagesource;

pub use messagesource::{spawn_feed, FeedMessage, MessageSource, MessageSourcePointer};

pub use dummymessagesource::DummyMessageSource;
pub use linemessagesource::LineMessageSource;
