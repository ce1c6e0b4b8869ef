//! Accepted slots grouped by calendar date.

use std::collections::BTreeMap;

use crate::date::CalendarDate;
use crate::slot::Slot;

/// Mapping from date to the slots found for it, in the order they were seen.
///
/// Only dates with at least one slot are present. Iteration is in
/// chronological order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityIndex {
    slots: BTreeMap<CalendarDate, Vec<Slot>>,
}

impl AvailabilityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a slot to the date's list.
    pub fn record(&mut self, date: CalendarDate, slot: Slot) {
        self.slots.entry(date).or_default().push(slot);
    }

    /// Append every slot of `other`, keeping per-date order (ours first).
    pub fn merge(&mut self, other: AvailabilityIndex) {
        for (date, slots) in other.slots {
            self.slots.entry(date).or_default().extend(slots);
        }
    }

    pub fn get(&self, date: &CalendarDate) -> Option<&[Slot]> {
        self.slots.get(date).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CalendarDate, &[Slot])> {
        self.slots.iter().map(|(date, slots)| (date, slots.as_slice()))
    }

    /// Number of dates with at least one slot.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot_count(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }
}

impl Extend<(CalendarDate, Slot)> for AvailabilityIndex {
    fn extend<I: IntoIterator<Item = (CalendarDate, Slot)>>(&mut self, iter: I) {
        for (date, slot) in iter {
            self.record(date, slot);
        }
    }
}

impl FromIterator<(CalendarDate, Slot)> for AvailabilityIndex {
    fn from_iter<I: IntoIterator<Item = (CalendarDate, Slot)>>(iter: I) -> Self {
        let mut index = AvailabilityIndex::new();
        index.extend(iter);
        index
    }
}
