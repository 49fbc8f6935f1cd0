//! Notification port for phase completion.

use crate::error::NotifyError;

/// Fire-and-forget completion signal.
///
/// Implementations must be cheap and must not block. The shell logs a
/// failure and moves on; a broken sink never affects timer state.
pub trait NotificationSink {
    fn session_complete(&self) -> Result<(), NotifyError>;
}

/// Sink that does nothing. Default for tests and headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl NotificationSink for NoopSink {
    fn session_complete(&self) -> Result<(), NotifyError> {
        Ok(())
    }
}
