//! User notification channel for backend-reported failures.

use parking_lot::Mutex;

/// Fire-and-forget sink for user-facing failure messages.
///
/// The client reports backend failure messages through this seam instead of
/// owning a notification surface, so a UI shell plugs in its own toast or
/// message-bar implementation and tests substitute a recording double. The
/// channel is process-wide from the client's perspective: write-only, no
/// delivery or ordering guarantee beyond what the implementation provides.
pub trait Notifier: Send + Sync {
    /// Deliver one user-facing message.
    fn report(&self, message: &str);
}

/// Default notifier that forwards messages to the tracing subscriber.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn report(&self, message: &str) {
        tracing::error!(target: "picstash_api::notify", "{message}");
    }
}

/// Notifier that buffers messages in memory.
///
/// Useful for headless callers that surface messages on their own schedule,
/// and as a test double.
#[derive(Debug, Default)]
pub struct BufferedNotifier {
    messages: Mutex<Vec<String>>,
}

impl BufferedNotifier {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all buffered messages, oldest first.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock())
    }

    /// Number of buffered messages.
    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    /// Check whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for BufferedNotifier {
    fn report(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}
