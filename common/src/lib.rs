pub mod feed;

use std::collections::VecDeque;

/// Convenience helper for passing values between threads. For example from a thread
/// reading the message feed to the UI thread applying the messages.
///
/// Unlike a channel it never blocks and never disconnects: the producer pushes, the
/// consumer drains whatever has arrived whenever it gets around to it.
#[derive(Debug)]
pub struct MessageInbox<T>(std::sync::Arc<std::sync::Mutex<VecDeque<T>>>);

impl<T> Clone for MessageInbox<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Default for MessageInbox<T> {
    fn default() -> Self {
        Self(Default::default())
    }
}

impl<T> MessageInbox<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn queue(&self) -> std::sync::MutexGuard<'_, VecDeque<T>> {
        // A producer panicking mid push leaves the queue itself intact.
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Appends `value` behind everything not drained yet.
    pub fn push(&self, value: T) {
        self.queue().push_back(value);
    }

    /// Takes all pending values, oldest first.
    pub fn drain(&self) -> Vec<T> {
        self.queue().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue().is_empty()
    }
}

#[test]
fn test_inbox_keeps_order_across_threads() {
    let inbox = MessageInbox::new();

    let producer = inbox.clone();
    std::thread::spawn(move || {
        for i in 0..10 {
            producer.push(i);
        }
    })
    .join()
    .unwrap();

    assert_eq!(inbox.len(), 10);
    assert_eq!(inbox.drain(), (0..10).collect::<Vec<_>>());
    assert!(inbox.is_empty());
    assert!(inbox.drain().is_empty());
}
