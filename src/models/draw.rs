//! Draw identifiers and parsed draw records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque token naming one historical draw.
///
/// Taken verbatim from the listing page and appended to the detail URL as
/// its query string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawIdentifier(String);

impl DrawIdentifier {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DrawIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Results of a single 4D draw.
///
/// String fields are empty when the page did not provide them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawRecord {
    /// Draw date as printed on the page
    #[serde(default)]
    pub date: String,

    /// Draw number as printed on the page
    #[serde(default)]
    pub draw_number: String,

    #[serde(default)]
    pub first_prize: String,

    #[serde(default)]
    pub second_prize: String,

    #[serde(default)]
    pub third_prize: String,

    /// Starter prizes in page order
    #[serde(default)]
    pub starter_prizes: Vec<String>,

    /// Consolation prizes in page order
    #[serde(default)]
    pub consolation_prizes: Vec<String>,

    /// When the page was parsed
    pub captured_at: DateTime<Utc>,
}

impl DrawRecord {
    /// True when no field carried any content.
    pub fn is_blank(&self) -> bool {
        self.date.is_empty()
            && self.draw_number.is_empty()
            && self.first_prize.is_empty()
            && self.second_prize.is_empty()
            && self.third_prize.is_empty()
            && self.starter_prizes.iter().all(String::is_empty)
            && self.consolation_prizes.iter().all(String::is_empty)
    }

    /// Winning numbers flattened in prize order: 1st, 2nd, 3rd, starters,
    /// consolations. Blank prizes keep their position as empty strings.
    pub fn winning_numbers(&self) -> Vec<String> {
        [&self.first_prize, &self.second_prize, &self.third_prize]
            .into_iter()
            .cloned()
            .chain(self.starter_prizes.iter().cloned())
            .chain(self.consolation_prizes.iter().cloned())
            .collect()
    }

    /// Compare two records ignoring the capture timestamp.
    pub fn same_draw(&self, other: &Self) -> bool {
        Self {
            captured_at: other.captured_at,
            ..self.clone()
        } == *other
    }
}

/// Ordered draw records, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchResult {
    records: Vec<DrawRecord>,
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parsed record.
    pub fn push(&mut self, record: DrawRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[DrawRecord] {
        &self.records
    }

    /// The most recent draw, if any.
    pub fn latest(&self) -> Option<&DrawRecord> {
        self.records.first()
    }
}

impl From<Vec<DrawRecord>> for BatchResult {
    fn from(records: Vec<DrawRecord>) -> Self {
        Self { records }
    }
}
