use std::cell::RefCell;
use std::collections::HashMap;

use wbi_dashboard::chart::{Coord, Mode, TraceKind};
use wbi_dashboard::{
    DateSpec, EntityMap, Error, IndicatorSource, Observation, ReportConfig, build_figures,
    build_report,
};

const ARABLE: &str = "AG.LND.ARBL.HA.PC";
const RURAL: &str = "SP.RUR.TOTL.ZS";
const FOREST: &str = "AG.LND.FRST.ZS";

/// Canned responses keyed by indicator; unknown indicators fail like a dead endpoint.
#[derive(Default)]
struct Stub {
    data: HashMap<&'static str, Vec<Observation>>,
    calls: RefCell<Vec<(String, String)>>,
}

impl Stub {
    fn with(mut self, indicator: &'static str, rows: Vec<Observation>) -> Self {
        self.data.insert(indicator, rows);
        self
    }
}

impl IndicatorSource for Stub {
    fn fetch_indicator(
        &self,
        country_filter: &str,
        indicator: &str,
        _date: DateSpec,
        _per_page: u32,
    ) -> Result<Vec<Observation>, Error> {
        self.calls
            .borrow_mut()
            .push((country_filter.to_string(), indicator.to_string()));
        self.data
            .get(indicator)
            .cloned()
            .ok_or_else(|| Error::Status {
                status: 503,
                url: indicator.to_string(),
            })
    }
}

fn obs(indicator: &str, country: &str, year: i32, value: Option<f64>) -> Observation {
    Observation {
        indicator_id: indicator.into(),
        indicator_name: indicator.into(),
        country_id: country[..2].to_uppercase(),
        country_name: country.into(),
        country_iso3: country[..3].to_uppercase(),
        year,
        value,
    }
}

/// API order: newest year first, countries grouped.
fn series(indicator: &str, rows: &[(&str, &[(i32, f64)])]) -> Vec<Observation> {
    rows.iter()
        .flat_map(|(country, points)| {
            points
                .iter()
                .map(move |(y, v)| obs(indicator, country, *y, Some(*v)))
        })
        .collect()
}

fn full_stub() -> Stub {
    Stub::default()
        .with(
            ARABLE,
            series(
                ARABLE,
                &[
                    ("Japan", &[(2018, 0.03), (2017, 0.03)]),
                    ("Canada", &[(2018, 1.03), (2017, 1.05)]),
                    ("Brazil", &[(2018, 0.27), (2017, 0.28)]),
                ],
            ),
        )
        .with(
            RURAL,
            series(
                RURAL,
                &[
                    ("Canada", &[(2018, 18.7), (2017, 18.8)]),
                    ("Japan", &[(2018, 8.4), (2017, 8.5)]),
                    ("Brazil", &[(2018, 13.4)]),
                ],
            ),
        )
        .with(
            FOREST,
            series(
                FOREST,
                &[
                    ("Japan", &[(2018, 68.4), (2017, 68.4)]),
                    ("Canada", &[(2018, 38.7)]),
                ],
            ),
        )
}

fn two_countries() -> EntityMap {
    EntityMap::from_pairs([("Japan", "JPN"), ("Canada", "CAN"), ("Brazil", "BRA")]).unwrap()
}

#[test]
fn always_four_figures() {
    let figs = build_figures(&full_stub(), two_countries(), &ReportConfig::default());
    assert_eq!(figs.len(), 4);
    assert_eq!(figs[0].layout.title, "Change in Arable Land<br>1992 to 2018");
    assert_eq!(figs[1].layout.title, "Arable Land in 2018");
    assert_eq!(figs[2].layout.title, "Change in Rural Population<br>1992-2018");
    assert_eq!(figs[3].layout.xaxis.range, Some([0.0, 100.0]));
}

#[test]
fn one_request_per_indicator_in_order() {
    let stub = full_stub();
    build_report(&stub, two_countries(), &ReportConfig::default());
    let calls = stub.calls.borrow();
    let codes: Vec<&str> = calls.iter().map(|(_, c)| c.as_str()).collect();
    assert_eq!(codes, vec![ARABLE, RURAL, RURAL, FOREST]);
    assert!(calls.iter().all(|(f, _)| f == "jpn;can;bra"));
}

#[test]
fn empty_selection_queries_default_countries() {
    let stub = full_stub();
    build_report(&stub, EntityMap::new(), &ReportConfig::default());
    assert_eq!(
        stub.calls.borrow()[0].0,
        "can;usa;bra;fra;ind;ita;deu;gbr;chn;jpn;rus;tkm"
    );
}

#[test]
fn country_order_is_shared_across_charts() {
    let report = build_report(&full_stub(), two_countries(), &ReportConfig::default());
    // Order comes from indicator A's response, not from the rural series.
    assert_eq!(report.entities, vec!["Japan", "Canada", "Brazil"]);
    assert_eq!(report.figures[0].series_names(), vec!["Japan", "Canada", "Brazil"]);
    assert_eq!(report.figures[2].series_names(), vec!["Japan", "Canada", "Brazil"]);
    // Brazil has no forest rows, so it drops out of the join but order holds.
    assert_eq!(report.figures[3].series_names(), vec!["Japan", "Canada"]);
}

#[test]
fn line_series_follow_response_order() {
    let figs = build_figures(&full_stub(), two_countries(), &ReportConfig::default());
    let canada = &figs[0].data[1];
    assert_eq!(canada.kind, TraceKind::Scatter);
    assert_eq!(canada.mode, Some(Mode::Lines));
    assert_eq!(canada.x, vec![Coord::from(2018), Coord::from(2017)]);
    assert_eq!(canada.y, vec![Some(1.03), Some(1.05)]);
}

#[test]
fn bar_chart_ranks_latest_year_descending() {
    let figs = build_figures(&full_stub(), two_countries(), &ReportConfig::default());
    assert_eq!(figs[1].data.len(), 1);
    let bar = &figs[1].data[0];
    assert_eq!(bar.kind, TraceKind::Bar);
    assert_eq!(
        bar.x,
        vec![
            Coord::from("Canada"),
            Coord::from("Brazil"),
            Coord::from("Japan")
        ]
    );
    assert_eq!(bar.y, vec![Some(1.03), Some(0.27), Some(0.03)]);
}

#[test]
fn scatter_joins_on_country_and_year() {
    let figs = build_figures(&full_stub(), two_countries(), &ReportConfig::default());
    let japan = &figs[3].data[0];
    assert_eq!(japan.mode, Some(Mode::LinesMarkers));
    assert_eq!(japan.x, vec![Coord::from(Some(8.5)), Coord::from(Some(8.4))]);
    assert_eq!(japan.y, vec![Some(68.4), Some(68.4)]);
    assert_eq!(
        japan.text.as_deref(),
        Some(&["Japan 2017".to_string(), "Japan 2018".to_string()][..])
    );
    let canada = &figs[3].data[1];
    assert_eq!(canada.len(), 1);
    assert_eq!(canada.text.as_ref().unwrap()[0], "Canada 2018");
}

#[test]
fn empty_indicator_gives_empty_chart() {
    let stub = full_stub().with(RURAL, vec![]);
    let figs = build_figures(&stub, two_countries(), &ReportConfig::default());
    assert_eq!(figs.len(), 4);
    assert!(figs[2].data.is_empty());
    assert!(figs[3].data.is_empty());
    assert_eq!(figs[0].data.len(), 3);
}

#[test]
fn failed_indicator_degrades_only_its_charts() {
    let mut stub = full_stub();
    stub.data.remove(FOREST);
    let report = build_report(&stub, two_countries(), &ReportConfig::default());
    assert!(!report.slots[3].is_available());
    assert!(report.slots[3].observations().is_empty());
    assert!(report.figures[3].data.is_empty());
    assert_eq!(report.figures[0].data.len(), 3);
    assert_eq!(report.figures[1].data.len(), 1);
    assert_eq!(report.figures[2].data.len(), 3);
}

#[test]
fn everything_down_still_yields_four_empty_figures() {
    let figs = build_figures(&Stub::default(), two_countries(), &ReportConfig::default());
    assert_eq!(figs.len(), 4);
    assert!(figs.iter().all(|f| f.data.is_empty()));
}

#[test]
fn custom_window_changes_titles_and_bar_year() {
    let cfg = ReportConfig {
        date: DateSpec::Range {
            start: 2000,
            end: 2017,
        },
        ..Default::default()
    };
    let figs = build_figures(&full_stub(), two_countries(), &cfg);
    assert_eq!(figs[0].layout.title, "Change in Arable Land<br>2000 to 2017");
    assert_eq!(figs[0].layout.xaxis.tick0, Some(2000.0));
    assert_eq!(figs[1].data[0].y, vec![Some(1.05), Some(0.28), Some(0.03)]);
}

#[test]
fn failed_first_indicator_takes_order_from_next_slot() {
    let mut stub = full_stub();
    stub.data.remove(ARABLE);
    let report = build_report(&stub, two_countries(), &ReportConfig::default());
    assert!(report.figures[0].data.is_empty());
    assert!(report.figures[1].data.is_empty());
    assert_eq!(report.entities, vec!["Canada", "Japan", "Brazil"]);
    assert_eq!(report.figures[2].series_names(), vec!["Canada", "Japan", "Brazil"]);
    assert_eq!(report.figures[3].series_names(), vec!["Canada", "Japan"]);
}
