//! Canned pages and an in-memory page source for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::utils::http::PageSource;

pub const LISTING_URL: &str = "https://pools.test/draw_list.html";
pub const DETAIL_BASE: &str = "https://pools.test/4d_results.aspx";

/// Listing page with one `<option>` per query string, plus a header option.
pub fn listing_page(query_strings: &[&str]) -> String {
    let options: String = query_strings
        .iter()
        .map(|q| format!(r#"<option querystring="{q}">Draw {q}</option>"#))
        .collect();
    format!(
        "<html><body><select><option>Select draw</option>{options}</select></body></html>"
    )
}

/// Detail page for a draw. Prizes are derived from the draw number.
pub fn detail_page(draw: u32) -> String {
    let starters: String = (1000..1010).map(|n| format!("<td>{n}</td>")).collect();
    let consolations: String = (2000..2010).map(|n| format!("<td>{n}</td>")).collect();
    format!(
        r#"<html><body>
        <table><thead><tr>
            <th class="drawDate">Sun, 19 Oct 2025</th>
            <th class="drawNumber">Draw No. {draw}</th>
        </tr></thead></table>
        <table><tbody>
            <tr><th>1st Prize</th><td class="tdFirstPrize">{first:04}</td></tr>
            <tr><th>2nd Prize</th><td class="tdSecondPrize">{second:04}</td></tr>
            <tr><th>3rd Prize</th><td class="tdThirdPrize">{third:04}</td></tr>
        </tbody></table>
        <table><tbody class="tbodyStarterPrizes"><tr>{starters}</tr></tbody></table>
        <table><tbody class="tbodyConsolationPrizes"><tr>{consolations}</tr></tbody></table>
        </body></html>"#,
        first = draw + 1,
        second = draw + 2,
        third = draw + 3,
    )
}

/// Detail URL for a query string under [`DETAIL_BASE`].
pub fn detail_url(query: &str) -> String {
    format!("{DETAIL_BASE}?{query}")
}

/// Serves fixed bodies by URL and records every request.
#[derive(Default)]
pub struct StaticPages {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl StaticPages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), body.into());
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for StaticPages {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::transport(url, "404 Not Found"))
    }
}
