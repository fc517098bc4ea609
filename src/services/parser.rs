//! Listing and draw page extraction.
//!
//! Every field uses a soft-miss policy: a selector that matches nothing
//! yields an empty string (or an empty list), never an error. A blank prize
//! cell stays in its list as an empty string so list positions are stable.
//! A detail page
//! is only rejected when *no* field can be found, which means the document
//! is not a draw page at all (error page, maintenance notice, etc.).

use chrono::{DateTime, Utc};
use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{DrawIdentifier, DrawRecord, DrawSelectors};
use crate::utils::element_text;

/// Compiled selectors for the listing and detail pages.
#[derive(Debug)]
pub struct DrawParser {
    option: Selector,
    identifier_attr: String,
    date: Selector,
    draw_number: Selector,
    first_prize: Selector,
    second_prize: Selector,
    third_prize: Selector,
    starter: Selector,
    consolation: Selector,
}

impl DrawParser {
    /// Compile the configured selectors.
    pub fn new(selectors: &DrawSelectors) -> Result<Self> {
        Ok(Self {
            option: Self::parse_selector(&selectors.option_selector)?,
            identifier_attr: selectors.identifier_attr.clone(),
            date: Self::parse_selector(&selectors.date_selector)?,
            draw_number: Self::parse_selector(&selectors.draw_number_selector)?,
            first_prize: Self::parse_selector(&selectors.first_prize_selector)?,
            second_prize: Self::parse_selector(&selectors.second_prize_selector)?,
            third_prize: Self::parse_selector(&selectors.third_prize_selector)?,
            starter: Self::parse_selector(&selectors.starter_selector)?,
            consolation: Self::parse_selector(&selectors.consolation_selector)?,
        })
    }

    /// Draw identifiers from a listing document, in document order.
    ///
    /// Entries without the identifier attribute are skipped.
    pub fn identifiers(&self, document: &Html) -> Vec<DrawIdentifier> {
        document
            .select(&self.option)
            .filter_map(|option| option.value().attr(&self.identifier_attr))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(DrawIdentifier::new)
            .collect()
    }

    /// Parse a listing body and extract its identifiers.
    pub fn parse_identifiers(&self, body: &str) -> Vec<DrawIdentifier> {
        self.identifiers(&Html::parse_document(body))
    }

    /// Map a detail document to a record. Missing fields are empty.
    pub fn record(&self, document: &Html, captured_at: DateTime<Utc>) -> DrawRecord {
        DrawRecord {
            date: Self::first_text(document, &self.date),
            draw_number: Self::first_text(document, &self.draw_number),
            first_prize: Self::first_text(document, &self.first_prize),
            second_prize: Self::first_text(document, &self.second_prize),
            third_prize: Self::first_text(document, &self.third_prize),
            starter_prizes: Self::all_text(document, &self.starter),
            consolation_prizes: Self::all_text(document, &self.consolation),
            captured_at,
        }
    }

    /// Parse a detail body into a record.
    ///
    /// Fails only when the page has none of the draw fields.
    pub fn parse_record(
        &self,
        body: &str,
        context: &str,
        captured_at: DateTime<Utc>,
    ) -> Result<DrawRecord> {
        let record = self.record(&Html::parse_document(body), captured_at);
        if record.is_blank() {
            return Err(AppError::parse(context, "page contains no draw results"));
        }
        Ok(record)
    }

    fn first_text(document: &Html, selector: &Selector) -> String {
        document
            .select(selector)
            .next()
            .map(|el| element_text(&el))
            .unwrap_or_default()
    }

    fn all_text(document: &Html, selector: &Selector) -> Vec<String> {
        document
            .select(selector)
            .map(|el| element_text(&el))
            .collect()
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
    }
}
