// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::AuditEvent;

/// Errors raised by an audit writer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuditWriteError {
    /// The underlying store rejected the write.
    #[error("Audit write failed: {0}")]
    WriteFailed(String),
}

/// An append-only audit writer.
///
/// Events are appended after the scheduling transaction has committed. A
/// failed append is never a reason to undo the scheduling change.
pub trait AuditSink {
    /// Appends one event and returns its store-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the event could not be written.
    fn append(&mut self, event: &AuditEvent) -> Result<i64, AuditWriteError>;
}

/// An audit sink that keeps events in memory.
#[derive(Debug, Default)]
pub struct InMemoryAuditLog {
    events: Vec<AuditEvent>,
    reject_writes: bool,
}

impl InMemoryAuditLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a log that rejects every write.
    #[must_use]
    pub fn rejecting() -> Self {
        Self {
            events: Vec::new(),
            reject_writes: true,
        }
    }

    /// The events appended so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[AuditEvent] {
        &self.events
    }
}

impl AuditSink for InMemoryAuditLog {
    fn append(&mut self, event: &AuditEvent) -> Result<i64, AuditWriteError> {
        if self.reject_writes {
            return Err(AuditWriteError::WriteFailed(String::from(
                "in-memory log is read-only",
            )));
        }
        let event_id: i64 = i64::try_from(self.events.len())
            .map_err(|e| AuditWriteError::WriteFailed(e.to_string()))?
            + 1;
        self.events.push(event.clone().with_event_id(event_id));
        Ok(event_id)
    }
}
