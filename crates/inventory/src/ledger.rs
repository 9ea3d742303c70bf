//! Append-only ledger store: the stock-movement log and the modification log.
//!
//! Appending performs no validation; callers validate first (see
//! [`crate::session::InventorySession`]). Nothing here edits or removes an
//! entry. Loading and persisting are delegated to the storage collaborator.

use stockroom_events::{Event, EventEnvelope};

use crate::entry::{LedgerEntry, Modification, StockMovement};

/// One append-only log. Sequence numbers start at 1 and have no gaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendLog<E> {
    entries: Vec<EventEnvelope<E>>,
}

impl<E> Default for AppendLog<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E: Event> AppendLog<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a log from persisted rows, in row order.
    pub fn from_entries(entries: impl IntoIterator<Item = E>) -> Self {
        let mut log = Self::new();
        for entry in entries {
            log.append(entry);
        }
        log
    }

    pub fn append(&mut self, entry: E) -> &EventEnvelope<E> {
        let next = self.entries.len() as u64 + 1;
        self.entries.push(EventEnvelope::new(next, entry));
        &self.entries[self.entries.len() - 1]
    }

    /// Every entry, in append order.
    pub fn all(&self) -> &[EventEnvelope<E>] {
        &self.entries
    }

    pub fn payloads(&self) -> impl Iterator<Item = &E> {
        self.entries.iter().map(EventEnvelope::payload)
    }

    pub fn last(&self) -> Option<&EventEnvelope<E>> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Both logs of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    movements: AppendLog<StockMovement>,
    modifications: AppendLog<Modification>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restore(
        movements: impl IntoIterator<Item = StockMovement>,
        modifications: impl IntoIterator<Item = Modification>,
    ) -> Self {
        Self {
            movements: AppendLog::from_entries(movements),
            modifications: AppendLog::from_entries(modifications),
        }
    }

    /// Append to the log the entry belongs to.
    pub fn append(&mut self, entry: LedgerEntry) {
        match entry {
            LedgerEntry::Movement(m) => {
                self.movements.append(m);
            }
            LedgerEntry::Modification(m) => {
                self.modifications.append(m);
            }
        }
    }

    pub fn movements(&self) -> &AppendLog<StockMovement> {
        &self.movements
    }

    pub fn modifications(&self) -> &AppendLog<Modification> {
        &self.modifications
    }

    /// Entries across both logs.
    pub fn len(&self) -> usize {
        self.movements.len() + self.modifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::entry::ModificationAction;

    fn movement(item: &str, destination: &str, quantity: i64) -> StockMovement {
        StockMovement {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            category: "Stationary".to_string(),
            item: item.to_string(),
            destination: destination.to_string(),
            quantity,
            current_stock: 0,
            vendor: None,
            invoice_number: None,
            total_price: None,
        }
    }

    #[test]
    fn sequence_numbers_follow_append_order() {
        let mut log = AppendLog::new();
        assert_eq!(log.append(movement("Pen", "Admin", 10)).sequence_number(), 1);
        assert_eq!(log.append(movement("Ink", "Admin", 5)).sequence_number(), 2);

        let items: Vec<_> = log.payloads().map(|m| m.item.as_str()).collect();
        assert_eq!(items, ["Pen", "Ink"]);
        assert_eq!(log.last().unwrap().sequence_number(), 2);
    }

    #[test]
    fn entries_route_to_their_own_log() {
        let mut ledger = Ledger::new();
        ledger.append(LedgerEntry::Movement(movement("Pen", "Admin", 10)));
        ledger.append(LedgerEntry::Modification(Modification {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            category: "Stationary".to_string(),
            item: "Pen".to_string(),
            department: "Sports".to_string(),
            quantity: 1,
            action: ModificationAction::MarkAsBroken,
        }));

        assert_eq!(ledger.movements().len(), 1);
        assert_eq!(ledger.modifications().len(), 1);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.modifications().all()[0].sequence_number(), 1);
    }

    #[test]
    fn restore_renumbers_rows_from_one() {
        let ledger = Ledger::restore(
            vec![movement("Pen", "Admin", 10), movement("Pen", "Sports", 3)],
            Vec::new(),
        );
        let seqs: Vec<_> = ledger
            .movements()
            .all()
            .iter()
            .map(|e| e.sequence_number())
            .collect();
        assert_eq!(seqs, [1, 2]);
    }
}
