//! wbi_dashboard
//!
//! Fetches World Bank development indicators for a set of countries and reshapes
//! them into four Plotly-style figures for a web dashboard. Pairs with the
//! `wbi-dashboard` CLI.
//!
//! ### Features
//! - One request per indicator against the World Bank Indicators API (v2)
//! - Flattened observations, optionally exported as CSV
//! - Four chart descriptors (`{data, layout}`) with a consistent country order
//! - Failed indicators degrade to empty charts instead of aborting the report
//!
//! ### Example
//! ```no_run
//! use wbi_dashboard::{Client, EntityMap, ReportConfig};
//!
//! let entities = EntityMap::from_pairs([("Canada", "CAN"), ("Brazil", "BRA")])?;
//! let figures = wbi_dashboard::build_figures(&Client::default(), entities, &ReportConfig::default());
//! wbi_dashboard::storage::save_figures_json(&figures, "figures.json", true)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod chart;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod storage;

pub use api::{Client, IndicatorSource};
pub use chart::Figure;
pub use config::ReportConfig;
pub use error::Error;
pub use models::{DateSpec, EntityMap, Observation};
pub use report::{Report, build_figures, build_report};
