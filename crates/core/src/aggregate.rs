//! Aggregate trait for ledger-backed domain models.

/// Aggregate execution semantics (pure, deterministic).
///
/// - **Decision logic**: `handle(&self, cmd)` validates and returns the entries to record.
/// - **State mutation**: `apply(&mut self, entry)` evolves state.
///
/// Aggregates must not perform IO or side effects. Persistence is the caller's
/// concern and happens after `apply` returns.
pub trait Aggregate {
    type Command: Clone + core::fmt::Debug;
    type Event: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    /// Number of events applied so far.
    fn version(&self) -> u64;

    /// Evolve in-memory state from a single event.
    ///
    /// Implementations must stay deterministic: replaying the same events on a
    /// fresh aggregate yields the same state.
    fn apply(&mut self, event: &Self::Event);

    /// Decide which events to record given the current state and a command.
    ///
    /// This must not mutate state. A rejected command leaves the aggregate exactly
    /// as it was.
    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;

    /// `handle` followed by `apply` for every produced event.
    fn execute(&mut self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let events = self.handle(command)?;
        for event in &events {
            self.apply(event);
        }
        Ok(events)
    }
}
