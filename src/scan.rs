//! A single scan: fetch every requested month, collect open slots, notify.
//!
//! Failures are contained as narrowly as possible. A month that cannot be
//! fetched or whose page no longer has the expected layout is skipped, and a
//! notification that cannot be delivered does not stop the others.

use anyhow::Result;
use slotwatch_core::{AvailabilityIndex, HtmlDocument, PageExtractor, YearMonth, compose};

use crate::notify::Notifier;
use crate::source::CalendarSource;

/// Outcome counters of a scan.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub months_scanned: usize,
    pub months_failed: usize,
    pub dates_found: usize,
    pub notifications_sent: usize,
    pub notifications_failed: usize,
}

pub struct ScanSession<S, N> {
    source: S,
    notifier: N,
    extractor: PageExtractor,
}

impl<S: CalendarSource, N: Notifier> ScanSession<S, N> {
    pub fn new(source: S, notifier: N, extractor: PageExtractor) -> Self {
        ScanSession {
            source,
            notifier,
            extractor,
        }
    }

    /// Scan `months` in order, then send one notification per date with
    /// open slots.
    ///
    /// Only errors that must stop the whole scan are returned; with the
    /// abort policy this includes an unreadable seat count.
    pub async fn run(&self, months: &[YearMonth]) -> Result<ScanReport> {
        let mut report = ScanReport::default();
        let mut index = AvailabilityIndex::new();

        for &month in months {
            match self.scan_month(month).await? {
                Some(page) => {
                    tracing::info!(
                        %month,
                        dates = page.len(),
                        slots = page.slot_count(),
                        "Scanned month"
                    );
                    report.months_scanned += 1;
                    index.merge(page);
                }
                None => report.months_failed += 1,
            }
        }

        report.dates_found = index.len();

        for notification in compose(&index) {
            match self.notifier.send(&notification).await {
                Ok(()) => {
                    tracing::info!(title = %notification.title, "Sent notification");
                    report.notifications_sent += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        title = %notification.title,
                        "Failed to send notification: {:#}",
                        e
                    );
                    report.notifications_failed += 1;
                }
            }
        }

        Ok(report)
    }

    /// `Ok(None)` when the month was skipped.
    async fn scan_month(&self, month: YearMonth) -> Result<Option<AvailabilityIndex>> {
        let html = match self.source.fetch(month).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(%month, "Skipping month: {:#}", e);
                return Ok(None);
            }
        };

        let doc = HtmlDocument::parse(&html);
        match self.extractor.extract(&doc, month) {
            Ok(page) => Ok(Some(page)),
            Err(e) if e.is_structural() => {
                tracing::error!(%month, "Skipping month, calendar page layout changed: {}", e);
                Ok(None)
            }
            Err(e) => Err(anyhow::Error::new(e).context(format!("Scan aborted on {}", month))),
        }
    }
}
