//! Synchronous client for the **World Bank Indicators API (v2)**.
//!
//! This module covers the `countries/{codes}/indicators/{code}` endpoint and returns
//! results as flattened `models::Observation` rows. One call is one GET: no retry
//! and no pagination, so `per_page` must be large enough for the requested window.
//!
//! ### Notes
//! - The API sometimes serializes `per_page` as a **string**; we accept both string/number.
//! - A response without data comes back as `[meta, null]`; that is an empty result, not an error.
//!
//! Typical usage:
//! ```no_run
//! # use wbi_dashboard::{Client, DateSpec, IndicatorSource};
//! let client = Client::default();
//! let rows = client.fetch_indicator(
//!     "can;usa",
//!     "AG.LND.ARBL.HA.PC",
//!     DateSpec::Range { start: 1992, end: 2018 },
//!     1000,
//! )?;
//! # Ok::<(), wbi_dashboard::Error>(())
//! ```
use crate::error::{Error, Result};
use crate::models::{DateSpec, Entry, Meta, Observation, enc_join};
use log::debug;
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde_json::Value;
use std::time::Duration;

/// Anything that can produce the observations of one indicator.
///
/// `Client` talks to the live API; tests plug in canned data.
pub trait IndicatorSource {
    /// Fetch `indicator` for the countries in `country_filter` (`;`-joined codes).
    fn fetch_indicator(
        &self,
        country_filter: &str,
        indicator: &str,
        date: DateSpec,
        per_page: u32,
    ) -> Result<Vec<Observation>>;
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::new("https://api.worldbank.org/v2")
    }
}

impl Client {
    /// Client against a custom base URL (mirrors, local fixtures).
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("wbi_dashboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client build");
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Build the request URL for one indicator.
    ///
    /// ```
    /// # use wbi_dashboard::{Client, DateSpec};
    /// let url = Client::default().indicator_url(
    ///     "can;usa",
    ///     "SP.RUR.TOTL.ZS",
    ///     DateSpec::Range { start: 1992, end: 2018 },
    ///     1000,
    /// );
    /// assert_eq!(
    ///     url,
    ///     "https://api.worldbank.org/v2/countries/can;usa/indicators/SP.RUR.TOTL.ZS?date=1992:2018&per_page=1000&format=json"
    /// );
    /// ```
    pub fn indicator_url(
        &self,
        country_filter: &str,
        indicator: &str,
        date: DateSpec,
        per_page: u32,
    ) -> String {
        format!(
            "{}/countries/{}/indicators/{}?date={}&per_page={}&format=json",
            self.base_url,
            country_filter,
            enc_join([indicator]),
            date.to_query_param(),
            per_page
        )
    }
}

impl IndicatorSource for Client {
    /// ### Errors
    /// - `Error::Http` on network failure
    /// - `Error::Status` on a non-success HTTP status
    /// - `Error::Decode` / `Error::Shape` / `Error::Api` from `parse_response`
    fn fetch_indicator(
        &self,
        country_filter: &str,
        indicator: &str,
        date: DateSpec,
        per_page: u32,
    ) -> Result<Vec<Observation>> {
        let url = self.indicator_url(country_filter, indicator, date, per_page);
        debug!("GET {}", url);

        let resp = self.http.get(&url).send()?;
        if !resp.status().is_success() {
            return Err(Error::Status {
                status: resp.status().as_u16(),
                url,
            });
        }
        let body = resp.text()?;
        let v: Value = serde_json::from_str(&body)?;
        parse_response(v)
    }
}

/// Turn a decoded `[Meta, [Entry, ...]]` response into observations.
///
/// Only the entries are checked; an unreadable `Meta` header is logged and skipped.
///
/// ```
/// # use wbi_dashboard::api::parse_response;
/// let v = serde_json::json!([{"page": 1, "pages": 1, "per_page": "50", "total": 0}, null]);
/// assert!(parse_response(v)?.is_empty());
/// # Ok::<(), wbi_dashboard::Error>(())
/// ```
pub fn parse_response(v: Value) -> Result<Vec<Observation>> {
    let Value::Array(mut arr) = v else {
        return Err(Error::Shape("not a top-level array"));
    };
    if arr.is_empty() {
        return Err(Error::Shape("empty array"));
    }

    // If first element has "message", surface API error.
    if let Some(msg) = arr[0].get("message") {
        return Err(Error::Api(msg.to_string()));
    }

    let entries: Vec<Entry> = match arr.get_mut(1).map(Value::take) {
        None | Some(Value::Null) => vec![],
        Some(list) => serde_json::from_value(list)?,
    };
    // Meta is only informational; a malformed header must not discard the entries.
    match serde_json::from_value::<Meta>(arr[0].take()) {
        Ok(meta) => debug!(
            "page {}/{}: {} of {} entries",
            meta.page,
            meta.pages,
            entries.len(),
            meta.total
        ),
        Err(e) => debug!("ignoring unreadable page meta: {}", e),
    }

    Ok(entries.into_iter().map(Observation::from).collect())
}
