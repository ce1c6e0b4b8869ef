//! Extraction of slots from one month's booking calendar page.
//!
//! Every day of the calendar is rendered as a cell holding an anchor with the
//! day number. The cell carries the day's offerings in its `data-schedule`
//! attribute; days without offerings have no such attribute.

use crate::availability::AvailabilityIndex;
use crate::date::YearMonth;
use crate::document::Document;
use crate::error::{CoreError, CoreResult};
use crate::schedule::{DEFAULT_MIN_SEATS, ParseFailurePolicy, decode_schedule};

/// Anchor holding the day number inside each calendar cell.
pub const DAY_ANCHOR_SELECTOR: &str = "a.aero_bcal_day_number";

/// Attribute of the calendar cell holding the encoded schedule.
pub const SCHEDULE_ATTRIBUTE: &str = "data-schedule";

#[derive(Debug, Clone, Copy)]
pub struct PageExtractor {
    pub min_seats: u32,
    pub policy: ParseFailurePolicy,
}

impl Default for PageExtractor {
    fn default() -> Self {
        PageExtractor {
            min_seats: DEFAULT_MIN_SEATS,
            policy: ParseFailurePolicy::default(),
        }
    }
}

impl PageExtractor {
    pub fn new(min_seats: u32, policy: ParseFailurePolicy) -> Self {
        PageExtractor { min_seats, policy }
    }

    /// Collect the accepted slots of every day on the page.
    ///
    /// A day cell whose number cannot be read fails the whole page, since it
    /// means the page layout is no longer the one we know how to read. The
    /// returned index only holds this page's slots.
    pub fn extract<D: Document>(
        &self,
        doc: &D,
        month: YearMonth,
    ) -> CoreResult<AvailabilityIndex> {
        let mut index = AvailabilityIndex::new();

        for anchor in doc.find_all(DAY_ANCHOR_SELECTOR)? {
            let cell = doc.parent(anchor).ok_or(CoreError::MissingCell)?;

            let text = doc.text(cell);
            let day: u32 = text
                .trim()
                .parse()
                .map_err(|_| CoreError::DayNumber(text.trim().to_string()))?;
            let date = month.day(day)?;

            let Some(schedule) = doc.attribute(cell, SCHEDULE_ATTRIBUTE) else {
                tracing::debug!(%date, "No schedule for day");
                continue;
            };

            let slots = decode_schedule(schedule, self.min_seats, self.policy)?;
            if !slots.is_empty() {
                tracing::debug!(%date, count = slots.len(), "Found open slots");
            }
            index.extend(slots.into_iter().map(|slot| (date, slot)));
        }

        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::CalendarDate;
    use crate::document::HtmlDocument;

    /// Minimal in-memory document: a flat list of day cells, each with a
    /// single anchor child.
    struct FakeCalendar {
        cells: Vec<(String, Option<String>)>,
    }

    #[derive(Clone, Copy)]
    enum Node {
        Anchor(usize),
        Cell(usize),
    }

    impl FakeCalendar {
        fn new(cells: &[(&str, Option<&str>)]) -> Self {
            FakeCalendar {
                cells: cells
                    .iter()
                    .map(|(text, schedule)| (text.to_string(), schedule.map(str::to_string)))
                    .collect(),
            }
        }
    }

    impl Document for FakeCalendar {
        type Element<'a> = Node;

        fn find_all(&self, selector: &str) -> CoreResult<Vec<Node>> {
            assert_eq!(selector, DAY_ANCHOR_SELECTOR);
            Ok((0..self.cells.len()).map(Node::Anchor).collect())
        }

        fn text(&self, element: Node) -> String {
            match element {
                Node::Anchor(i) | Node::Cell(i) => self.cells[i].0.clone(),
            }
        }

        fn attribute<'a>(&'a self, element: Node, name: &str) -> Option<&'a str> {
            match element {
                Node::Cell(i) if name == SCHEDULE_ATTRIBUTE => self.cells[i].1.as_deref(),
                _ => None,
            }
        }

        fn parent<'a>(&'a self, element: Node) -> Option<Node> {
            match element {
                Node::Anchor(i) => Some(Node::Cell(i)),
                Node::Cell(_) => None,
            }
        }
    }

    fn april() -> YearMonth {
        YearMonth::new(2025, 4).unwrap()
    }

    fn date(day: u32) -> CalendarDate {
        april().day(day).unwrap()
    }

    #[test]
    fn test_extract_collects_days_with_slots() {
        let doc = FakeCalendar::new(&[
            ("1", Some("10:00;50€;25€;3@14:00;50€;25€;1")),
            ("2", Some("09:00;50€;25€;1")),
            ("3", Some("08:00;45€;20€;6@16:00;45€;20€;2")),
        ]);

        let index = PageExtractor::default().extract(&doc, april()).unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.get(&date(1)).unwrap().len(), 1);
        assert_eq!(index.get(&date(2)), None);
        let times: Vec<_> = index.get(&date(3)).unwrap().iter().map(|s| s.time.as_str()).collect();
        assert_eq!(times, vec!["08:00", "16:00"]);
    }

    #[test]
    fn test_cell_without_schedule_is_skipped() {
        let doc = FakeCalendar::new(&[("4", None), ("5", Some("10:00;50€;25€;4"))]);

        let index = PageExtractor::default().extract(&doc, april()).unwrap();

        assert_eq!(index.len(), 1);
        assert!(index.get(&date(4)).is_none());
        assert!(index.get(&date(5)).is_some());
    }

    #[test]
    fn test_only_empty_cells_leave_index_empty() {
        let doc = FakeCalendar::new(&[("1", None), ("2", None)]);
        let index = PageExtractor::default().extract(&doc, april()).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_non_numeric_day_fails_page() {
        let doc = FakeCalendar::new(&[("1", Some("10:00;50€;25€;4")), ("Mon", None)]);

        let err = PageExtractor::default().extract(&doc, april()).unwrap_err();

        assert!(matches!(&err, CoreError::DayNumber(text) if text == "Mon"));
        assert!(err.is_structural());
    }

    #[test]
    fn test_day_outside_month_fails_page() {
        let doc = FakeCalendar::new(&[("31", None)]);

        let err = PageExtractor::default().extract(&doc, april()).unwrap_err();

        assert!(matches!(err, CoreError::InvalidDate { day: 31, .. }));
        assert!(err.is_structural());
    }

    #[test]
    fn test_bad_seat_count_policy() {
        let doc = FakeCalendar::new(&[("7", Some("10:00;50€;25€;x@11:00;50€;25€;3"))]);

        let index = PageExtractor::default().extract(&doc, april()).unwrap();
        assert_eq!(index.slot_count(), 1);

        let strict = PageExtractor::new(DEFAULT_MIN_SEATS, ParseFailurePolicy::Abort);
        let err = strict.extract(&doc, april()).unwrap_err();
        assert!(matches!(err, CoreError::SeatCount(_)));
        assert!(!err.is_structural());
    }

    #[test]
    fn test_min_seats_respected() {
        let doc = FakeCalendar::new(&[("9", Some("10:00;50€;25€;3@11:00;50€;25€;5"))]);

        let index = PageExtractor::new(4, ParseFailurePolicy::Skip)
            .extract(&doc, april())
            .unwrap();

        assert_eq!(index.get(&date(9)).unwrap()[0].time, "11:00");
    }

    #[test]
    fn test_extract_from_html() {
        let html = r##"<!DOCTYPE html>
<html><body>
<table class="aero_bcal">
  <tr>
    <td class="aero_bcal_day" data-schedule="10:00;50€;25€;3@14:00;50€;25€;1">
      <a class="aero_bcal_day_number" href="#">14</a>
    </td>
    <td class="aero_bcal_day"><a class="aero_bcal_day_number" href="#">15</a></td>
    <td class="aero_bcal_day" data-schedule="09:30;55€;30€;8">
      <a class="aero_bcal_day_number" href="#">16</a>
    </td>
  </tr>
</table>
</body></html>"##;

        let doc = HtmlDocument::parse(html);
        let index = PageExtractor::default().extract(&doc, april()).unwrap();

        let dates: Vec<_> = index.iter().map(|(d, _)| *d).collect();
        assert_eq!(dates, vec![date(14), date(16)]);
        assert_eq!(index.get(&date(14)).unwrap()[0].time, "10:00");
        assert_eq!(index.get(&date(16)).unwrap()[0].price, "55€");
    }
}
