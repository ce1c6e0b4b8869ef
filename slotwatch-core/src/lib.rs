//! Core of slotwatch.
//!
//! This crate turns a booking calendar page into open slots grouped by date,
//! and those into notification texts:
//! - `schedule` decodes one day's `data-schedule` attribute
//! - `availability` groups accepted slots by date
//! - `extract` walks a month's page through the `document` abstraction
//! - `notification` composes one message per date
//!
//! It performs no network I/O.

pub mod availability;
pub mod date;
pub mod document;
pub mod error;
pub mod extract;
pub mod notification;
pub mod schedule;
pub mod slot;

pub use availability::AvailabilityIndex;
pub use date::{CalendarDate, YearMonth};
pub use document::{Document, HtmlDocument};
pub use error::{CoreError, CoreResult};
pub use extract::PageExtractor;
pub use notification::{Notification, compose};
pub use schedule::{DEFAULT_MIN_SEATS, ParseFailurePolicy, decode_schedule};
pub use slot::Slot;
