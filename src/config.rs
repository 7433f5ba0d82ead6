use crate::models::DateSpec;
use serde::{Deserialize, Serialize};

/// Indicator slots, in chart order:
/// 0. arable land (hectares per person), charts 1 and 2
/// 1. rural population (% of total), chart 3
/// 2. rural population (% of total), chart 4 x axis
/// 3. forest area (% of land area), chart 4 y axis
///
/// Slots 1 and 2 name the same series. Override them through `ReportConfig::indicators`
/// if chart 3 should plot something else.
pub const DEFAULT_INDICATORS: [&str; 4] = [
    "AG.LND.ARBL.HA.PC",
    "SP.RUR.TOTL.ZS",
    "SP.RUR.TOTL.ZS",
    "AG.LND.FRST.ZS",
];

pub const DEFAULT_DATE: DateSpec = DateSpec::Range {
    start: 1992,
    end: 2018,
};

pub const DEFAULT_PER_PAGE: u32 = 1000;

/// Everything the report builder needs besides the entity mapping.
///
/// Loadable from JSON; any missing field takes its default.
/// ```
/// # use wbi_dashboard::ReportConfig;
/// let cfg: ReportConfig = serde_json::from_str(r#"{"per_page": 500}"#)?;
/// assert_eq!(cfg.per_page, 500);
/// assert_eq!(cfg.indicators[0], "AG.LND.ARBL.HA.PC");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub indicators: [String; 4],
    pub date: DateSpec,
    pub per_page: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            indicators: DEFAULT_INDICATORS.map(String::from),
            date: DEFAULT_DATE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}
