//! Read-only view over a parsed HTML page.

use scraper::{ElementRef, Html, Selector};

use crate::error::{CoreError, CoreResult};

/// The operations the page extractor needs from a parsed document.
pub trait Document {
    type Element<'a>: Copy
    where
        Self: 'a;

    /// All elements matching a CSS selector, in document order.
    fn find_all(&self, selector: &str) -> CoreResult<Vec<Self::Element<'_>>>;

    /// Concatenated text content of an element and its descendants.
    fn text(&self, element: Self::Element<'_>) -> String;

    fn attribute<'a>(&'a self, element: Self::Element<'a>, name: &str) -> Option<&'a str>;

    fn parent<'a>(&'a self, element: Self::Element<'a>) -> Option<Self::Element<'a>>;
}

/// A document parsed with `scraper`.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(raw_html: &str) -> Self {
        HtmlDocument {
            html: Html::parse_document(raw_html),
        }
    }
}

impl Document for HtmlDocument {
    type Element<'a> = ElementRef<'a>;

    fn find_all(&self, selector: &str) -> CoreResult<Vec<ElementRef<'_>>> {
        let selector =
            Selector::parse(selector).map_err(|e| CoreError::Selector(format!("{selector}: {e:?}")))?;
        Ok(self.html.select(&selector).collect())
    }

    fn text(&self, element: ElementRef<'_>) -> String {
        element.text().collect()
    }

    fn attribute<'a>(&'a self, element: ElementRef<'a>, name: &str) -> Option<&'a str> {
        element.value().attr(name)
    }

    fn parent<'a>(&'a self, element: ElementRef<'a>) -> Option<ElementRef<'a>> {
        element.parent().and_then(ElementRef::wrap)
    }
}
