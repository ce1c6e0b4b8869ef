//! Booking calendar source.
//!
//! The booking site renders one month of its calendar per request. The page
//! is requested with a form POST naming the booking, the month, and the
//! party size.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Url;
use slotwatch_core::YearMonth;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can hand us the raw HTML of a month's calendar page.
pub trait CalendarSource {
    async fn fetch(&self, month: YearMonth) -> Result<String>;
}

impl<T: CalendarSource> CalendarSource for &T {
    async fn fetch(&self, month: YearMonth) -> Result<String> {
        (**self).fetch(month).await
    }
}

/// Form fields sent alongside the month.
#[derive(Debug, Clone)]
pub struct BookingQuery {
    pub booking_id: u32,
    pub adults: u32,
    pub children: u32,
    /// Opaque value the booking widget always sends.
    pub rnd: u32,
}

impl Default for BookingQuery {
    fn default() -> Self {
        BookingQuery {
            booking_id: 65,
            adults: 2,
            children: 0,
            rnd: 19,
        }
    }
}

impl BookingQuery {
    fn form(&self, month: YearMonth) -> Vec<(&'static str, String)> {
        vec![
            ("bid", self.booking_id.to_string()),
            ("year", month.year.to_string()),
            ("month", month.month.to_string()),
            ("adults", self.adults.to_string()),
            ("children", self.children.to_string()),
            ("rnd", self.rnd.to_string()),
        ]
    }
}

/// The remote booking calendar, reached over HTTP.
pub struct BookingCalendar {
    url: Url,
    query: BookingQuery,
    client: reqwest::Client,
}

impl BookingCalendar {
    pub fn new(url: Url, query: BookingQuery) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(BookingCalendar { url, query, client })
    }
}

impl CalendarSource for BookingCalendar {
    async fn fetch(&self, month: YearMonth) -> Result<String> {
        let response = self
            .client
            .post(self.url.clone())
            .form(&self.query.form(month))
            .send()
            .await
            .with_context(|| format!("Request for {} failed", month))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Booking calendar returned {} for {}", status, month);
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read calendar page for {}", month))
    }
}
