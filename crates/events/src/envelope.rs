use serde::{Deserialize, Serialize};

/// Envelope for a ledger entry, carrying its position in the log.
///
/// This is the unit an append-only log hands back to readers.
///
/// Notes:
/// - **Append-only**: `sequence_number` is monotonically increasing per log, starting at 1.
/// - Persisted tables are keyed by row order, so the sequence number is the 1-based row
///   position and is reassigned identically on reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    /// Monotonically increasing position in the log.
    sequence_number: u64,

    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(sequence_number: u64, payload: E) -> Self {
        Self {
            sequence_number,
            payload,
        }
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}
