//! Decoding of the `data-schedule` attribute.
//!
//! A day's schedule looks like `10:00;50€;25€;3@14:00;50€;25€;1`: entries are
//! separated by `@`, and each entry holds exactly four `;`-separated fields
//! (time, adult price, child price, remaining seats).

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::slot::Slot;

/// Separator between the offerings of one day.
pub const ENTRY_SEPARATOR: char = '@';

/// Separator between the fields of one offering.
pub const FIELD_SEPARATOR: char = ';';

/// Offerings with fewer remaining seats than this are not worth reporting.
pub const DEFAULT_MIN_SEATS: u32 = 2;

/// What to do when a seat count cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseFailurePolicy {
    /// Log the failure and drop the offending entry.
    #[default]
    Skip,
    /// Fail the whole scan.
    Abort,
}

/// Decode one day's schedule string into the slots that have at least
/// `min_seats` seats left, in the order they appear.
pub fn decode_schedule(
    raw: &str,
    min_seats: u32,
    policy: ParseFailurePolicy,
) -> CoreResult<Vec<Slot>> {
    let mut slots = Vec::new();

    for entry in raw.split(ENTRY_SEPARATOR) {
        let fields: Vec<&str> = entry.split(FIELD_SEPARATOR).collect();
        let [time, price, price_child, seats] = fields[..] else {
            tracing::trace!(entry, "Skipping schedule entry with {} fields", fields.len());
            continue;
        };

        let seats: i64 = match seats.trim().parse() {
            Ok(seats) => seats,
            Err(_) => match policy {
                ParseFailurePolicy::Skip => {
                    tracing::warn!(
                        entry,
                        "Skipping schedule entry: seat count '{}' is not an integer",
                        seats
                    );
                    continue;
                }
                ParseFailurePolicy::Abort => return Err(CoreError::SeatCount(seats.to_string())),
            },
        };

        if seats < i64::from(min_seats) {
            tracing::debug!(time, seats, min_seats, "Not enough seats");
            continue;
        }
        let seats = u32::try_from(seats).unwrap_or(u32::MAX);

        slots.push(Slot {
            time: time.to_string(),
            price: price.to_string(),
            price_child: price_child.to_string(),
            seats,
        });
    }

    Ok(slots)
}
