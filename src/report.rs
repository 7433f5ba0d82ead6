//! The report builder: four indicator fetches turned into four dashboard figures.
//!
//! Figures, in order:
//! 1. indicator A per country over the whole window (lines)
//! 2. indicator A for the latest year, countries ranked high to low (bars)
//! 3. indicator B per country over the whole window (lines)
//! 4. indicator C against indicator D per country, one point per year (lines + markers)
//!
//! Every per-country figure plots countries in the same order, taken once from
//! indicator A's data, so a renderer assigns each country the same color everywhere.

use crate::api::IndicatorSource;
use crate::chart::{Axis, Coord, Figure, Layout, Trace};
use crate::config::ReportConfig;
use crate::error::Error;
use crate::models::{EntityMap, Observation};
use log::{debug, warn};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Outcome of fetching one indicator.
#[derive(Debug)]
pub struct IndicatorSlot {
    pub code: String,
    pub result: Result<Vec<Observation>, Error>,
}

impl IndicatorSlot {
    /// The fetched rows, or nothing when the fetch failed.
    pub fn observations(&self) -> &[Observation] {
        self.result.as_deref().unwrap_or(&[])
    }

    pub fn is_available(&self) -> bool {
        self.result.is_ok()
    }
}

/// Figures plus the data they were built from.
#[derive(Debug)]
pub struct Report {
    pub figures: Vec<Figure>,
    pub slots: Vec<IndicatorSlot>,
    pub entities: Vec<String>,
}

/// Fetch, reshape, and return the four figures with their source data.
///
/// An empty `entities` map means the built-in default set.
///
/// ```no_run
/// # use wbi_dashboard::{Client, EntityMap, ReportConfig, report::build_report};
/// let report = build_report(&Client::default(), EntityMap::new(), &ReportConfig::default());
/// assert_eq!(report.figures.len(), 4);
/// ```
pub fn build_report<S: IndicatorSource>(
    source: &S,
    entities: EntityMap,
    config: &ReportConfig,
) -> Report {
    let entities = entities.or_default();
    let slots = fetch_all(source, &entities.country_filter(), config);
    let order = entity_order(&slots);
    let figures = assemble_figures(&slots, &order, config);
    Report {
        figures,
        slots,
        entities: order,
    }
}

/// Same as `build_report`, figures only.
pub fn build_figures<S: IndicatorSource>(
    source: &S,
    entities: EntityMap,
    config: &ReportConfig,
) -> Vec<Figure> {
    build_report(source, entities, config).figures
}

/// One request per configured indicator, in order. Failures are logged and kept as error slots.
pub fn fetch_all<S: IndicatorSource>(
    source: &S,
    country_filter: &str,
    config: &ReportConfig,
) -> Vec<IndicatorSlot> {
    config
        .indicators
        .iter()
        .map(|code| {
            let result = source.fetch_indicator(country_filter, code, config.date, config.per_page);
            match &result {
                Ok(rows) => debug!("{}: {} observations", code, rows.len()),
                Err(e) => warn!("could not load data for {}: {}", code, e),
            }
            IndicatorSlot {
                code: code.clone(),
                result,
            }
        })
        .collect()
}

/// Unique country names in order of first appearance.
fn unique_countries(rows: &[Observation]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for r in rows {
        if !out.contains(&r.country_name) {
            out.push(r.country_name.clone());
        }
    }
    out
}

/// Canonical plotting order, from the first slot (indicator A).
///
/// If A has no rows, the first slot that does is used instead. That departs from
/// "always from indicator A": without it, a failed A would also blank charts 3 and 4.
pub fn entity_order(slots: &[IndicatorSlot]) -> Vec<String> {
    let Some((idx, slot)) = slots
        .iter()
        .enumerate()
        .find(|(_, s)| !s.observations().is_empty())
    else {
        return Vec::new();
    };
    if idx > 0 {
        warn!(
            "no data for {}, taking country order from {}",
            slots[0].code, slot.code
        );
    }
    unique_countries(slot.observations())
}

/// Build all four figures from already-fetched slots. Missing slots count as empty.
pub fn assemble_figures(
    slots: &[IndicatorSlot],
    entities: &[String],
    config: &ReportConfig,
) -> Vec<Figure> {
    let rows = |i: usize| slots.get(i).map(IndicatorSlot::observations).unwrap_or(&[]);
    let (start, end) = (config.date.first_year(), config.date.latest_year());

    vec![
        line_chart(
            rows(0),
            entities,
            Layout {
                title: format!("Change in Arable Land<br>{} to {}", start, end),
                xaxis: Axis::years("Year", start),
                yaxis: Axis::titled("Hectares / person"),
            },
        ),
        latest_bar_chart(
            rows(0),
            end,
            Layout {
                title: format!("Arable Land in {}", end),
                xaxis: Axis::titled("Country"),
                yaxis: Axis::titled("Hectares / person"),
            },
        ),
        line_chart(
            rows(1),
            entities,
            Layout {
                title: format!("Change in Rural Population<br>{}-{}", start, end),
                xaxis: Axis::years("Year", start),
                yaxis: Axis::titled("Percent"),
            },
        ),
        joined_scatter_chart(
            rows(2),
            rows(3),
            entities,
            Layout {
                title: format!("Rural population vs. Forested Land<br>{}-{}", start, end),
                xaxis: Axis::percent("Rural pop. (% of total)"),
                yaxis: Axis::percent("Forested Land (% of total)"),
            },
        ),
    ]
}

/// One line per entity (in `entities` order) with (year, value) points in response order.
/// Entities without rows get no series.
pub fn line_chart(rows: &[Observation], entities: &[String], layout: Layout) -> Figure {
    let data = entities
        .iter()
        .filter_map(|name| {
            let mine: Vec<&Observation> = rows.iter().filter(|r| r.country_name == *name).collect();
            if mine.is_empty() {
                return None;
            }
            Some(Trace::line(
                name,
                mine.iter().map(|r| r.year.into()).collect(),
                mine.iter().map(|r| r.value).collect(),
            ))
        })
        .collect();
    Figure { data, layout }
}

/// Descending by value; rows without a value go last.
fn value_desc(a: &Observation, b: &Observation) -> Ordering {
    match (a.value, b.value) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// A single bar series of `year`'s values, highest first.
pub fn latest_bar_chart(rows: &[Observation], year: i32, layout: Layout) -> Figure {
    let mut slice: Vec<&Observation> = rows.iter().filter(|r| r.year == year).collect();
    slice.sort_by(|a, b| value_desc(a, b));

    let data = if slice.is_empty() {
        vec![]
    } else {
        vec![Trace::bar(
            slice.iter().map(|r| r.country_name.as_str().into()).collect(),
            slice.iter().map(|r| r.value).collect(),
        )]
    };
    Figure { data, layout }
}

/// Row of the (country, year) inner join of two indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedPoint {
    pub country: String,
    pub year: i32,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// Inner join on (country name, year), sorted by year ascending.
///
/// Keeps left-side order within a year; duplicate keys produce every pairing.
pub fn join_on_country_year(left: &[Observation], right: &[Observation]) -> Vec<JoinedPoint> {
    let mut index: HashMap<(&str, i32), Vec<Option<f64>>> = HashMap::new();
    for r in right {
        index
            .entry((r.country_name.as_str(), r.year))
            .or_default()
            .push(r.value);
    }

    let mut out: Vec<JoinedPoint> = left
        .iter()
        .flat_map(|l| {
            index
                .get(&(l.country_name.as_str(), l.year))
                .into_iter()
                .flatten()
                .map(move |&y| JoinedPoint {
                    country: l.country_name.clone(),
                    year: l.year,
                    x: l.value,
                    y,
                })
        })
        .collect();
    out.sort_by_key(|p| p.year);
    out
}

/// Indicator `left` on x, `right` on y, one labelled line per entity present in the join.
pub fn joined_scatter_chart(
    left: &[Observation],
    right: &[Observation],
    entities: &[String],
    layout: Layout,
) -> Figure {
    let joined = join_on_country_year(left, right);
    let data = entities
        .iter()
        .filter_map(|name| {
            let mine: Vec<&JoinedPoint> = joined.iter().filter(|p| p.country == *name).collect();
            if mine.is_empty() {
                return None;
            }
            Some(Trace::labelled_points(
                name,
                mine.iter().map(|p| Coord::from(p.x)).collect(),
                mine.iter().map(|p| p.y).collect(),
                mine.iter().map(|p| format!("{} {}", p.country, p.year)).collect(),
            ))
        })
        .collect();
    Figure { data, layout }
}
