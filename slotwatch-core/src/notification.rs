//! Turning collected availability into notification texts.

use serde::{Deserialize, Serialize};

use crate::availability::AvailabilityIndex;
use crate::date::CalendarDate;
use crate::slot::Slot;

/// Separator between the per-slot lines of a message.
pub const LINE_SEPARATOR: &str = "\n";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

/// One notification per date with open slots, earliest date first.
pub fn compose(index: &AvailabilityIndex) -> Vec<Notification> {
    index
        .iter()
        .filter(|(_, slots)| !slots.is_empty())
        .map(|(date, slots)| Notification {
            title: title(date),
            message: message(slots),
        })
        .collect()
}

fn title(date: &CalendarDate) -> String {
    format!("📅 Open slot(s) on {}", date)
}

fn message(slots: &[Slot]) -> String {
    slots
        .iter()
        .map(slot_line)
        .collect::<Vec<_>>()
        .join(LINE_SEPARATOR)
}

fn slot_line(slot: &Slot) -> String {
    let seats = if slot.seats == 1 { "seat" } else { "seats" };
    format!(
        "🕒 {}  •  💶 {}  •  👥 {} {}",
        slot.time, slot.price, slot.seats, seats
    )
}
