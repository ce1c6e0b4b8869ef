//! Bookable slots.

use serde::{Deserialize, Serialize};

/// One bookable offering on a single day.
///
/// Price fields are carried through as displayed by the booking site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub time: String,
    pub price: String,
    pub price_child: String,
    pub seats: u32,
}
