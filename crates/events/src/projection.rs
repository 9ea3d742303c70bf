use crate::{Event, EventEnvelope};

/// A projection builds a read model from an append-only entry log.
///
/// Projections implement the **read model pattern**: they fold entries (the
/// source of truth) into queryable state. Read models are **disposable**: they
/// can be dropped and rebuilt by replaying the log from the first entry, and a
/// rebuild must produce exactly the state that step-by-step application did.
///
/// A projection may consume several entry types (one impl per type) when the
/// read model is derived from more than one log.
///
/// ## Error Handling
///
/// `apply` doesn't return errors. Entries are validated before they are
/// appended, so an entry a projection cannot use (e.g. one naming a holder it
/// doesn't track) is skipped for balance purposes rather than aborting the fold.
pub trait Projection<E: Event> {
    /// Apply a single entry to the projection, updating the read model.
    fn apply(&mut self, envelope: &EventEnvelope<E>);

    /// Apply every entry of a log, in log order.
    fn apply_all<'a, I>(&mut self, envelopes: I)
    where
        I: IntoIterator<Item = &'a EventEnvelope<E>>,
    {
        for envelope in envelopes {
            self.apply(envelope);
        }
    }
}
