// src/models/selectors.rs

//! CSS selectors for the listing and draw detail pages.

use serde::{Deserialize, Serialize};

/// CSS selectors for scraping the results archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawSelectors {
    /// Selector for each draw entry on the listing page
    #[serde(default = "defaults::option_selector")]
    pub option_selector: String,

    /// Attribute on a listing entry that carries the draw query string
    #[serde(default = "defaults::identifier_attr")]
    pub identifier_attr: String,

    #[serde(default = "defaults::date_selector")]
    pub date_selector: String,

    #[serde(default = "defaults::draw_number_selector")]
    pub draw_number_selector: String,

    #[serde(default = "defaults::first_prize_selector")]
    pub first_prize_selector: String,

    #[serde(default = "defaults::second_prize_selector")]
    pub second_prize_selector: String,

    #[serde(default = "defaults::third_prize_selector")]
    pub third_prize_selector: String,

    /// Matches every starter prize cell
    #[serde(default = "defaults::starter_selector")]
    pub starter_selector: String,

    /// Matches every consolation prize cell
    #[serde(default = "defaults::consolation_selector")]
    pub consolation_selector: String,
}

impl Default for DrawSelectors {
    fn default() -> Self {
        Self {
            option_selector: defaults::option_selector(),
            identifier_attr: defaults::identifier_attr(),
            date_selector: defaults::date_selector(),
            draw_number_selector: defaults::draw_number_selector(),
            first_prize_selector: defaults::first_prize_selector(),
            second_prize_selector: defaults::second_prize_selector(),
            third_prize_selector: defaults::third_prize_selector(),
            starter_selector: defaults::starter_selector(),
            consolation_selector: defaults::consolation_selector(),
        }
    }
}

impl DrawSelectors {
    /// All selector strings with their config key, for validation.
    pub fn named(&self) -> [(&'static str, &str); 8] {
        [
            ("option_selector", self.option_selector.as_str()),
            ("date_selector", self.date_selector.as_str()),
            ("draw_number_selector", self.draw_number_selector.as_str()),
            ("first_prize_selector", self.first_prize_selector.as_str()),
            ("second_prize_selector", self.second_prize_selector.as_str()),
            ("third_prize_selector", self.third_prize_selector.as_str()),
            ("starter_selector", self.starter_selector.as_str()),
            ("consolation_selector", self.consolation_selector.as_str()),
        ]
    }
}

mod defaults {
    pub fn option_selector() -> String {
        "select option".into()
    }
    pub fn identifier_attr() -> String {
        "querystring".into()
    }
    pub fn date_selector() -> String {
        ".drawDate".into()
    }
    pub fn draw_number_selector() -> String {
        ".drawNumber".into()
    }
    pub fn first_prize_selector() -> String {
        ".tdFirstPrize".into()
    }
    pub fn second_prize_selector() -> String {
        ".tdSecondPrize".into()
    }
    pub fn third_prize_selector() -> String {
        ".tdThirdPrize".into()
    }
    pub fn starter_selector() -> String {
        "tbody.tbodyStarterPrizes td".into()
    }
    pub fn consolation_selector() -> String {
        "tbody.tbodyConsolationPrizes td".into()
    }
}
