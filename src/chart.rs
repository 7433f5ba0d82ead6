//! Chart descriptors in the shape a Plotly front end consumes (`{data, layout}`).
//!
//! Nothing here draws anything; these are plain serde values handed to the
//! rendering layer as JSON.

use serde::{Deserialize, Serialize};

/// One x coordinate: a number, a category label, or a gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coord {
    Number(f64),
    Label(String),
    Missing,
}

impl From<i32> for Coord {
    fn from(v: i32) -> Self {
        Coord::Number(v as f64)
    }
}

impl From<Option<f64>> for Coord {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Coord::Missing, Coord::Number)
    }
}

impl From<&str> for Coord {
    fn from(v: &str) -> Self {
        Coord::Label(v.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Scatter,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    #[serde(rename = "lines")]
    Lines,
    #[serde(rename = "lines+markers")]
    LinesMarkers,
}

/// One series of a figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: TraceKind,
    pub x: Vec<Coord>,
    pub y: Vec<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub textposition: Option<String>,
}

impl Trace {
    /// Line series named after `name`.
    pub fn line(name: &str, x: Vec<Coord>, y: Vec<Option<f64>>) -> Self {
        Self {
            kind: TraceKind::Scatter,
            x,
            y,
            text: None,
            mode: Some(Mode::Lines),
            name: Some(name.to_string()),
            textposition: None,
        }
    }

    pub fn bar(x: Vec<Coord>, y: Vec<Option<f64>>) -> Self {
        Self {
            kind: TraceKind::Bar,
            x,
            y,
            text: None,
            mode: None,
            name: None,
            textposition: None,
        }
    }

    /// Line + markers with per-point hover labels.
    pub fn labelled_points(
        name: &str,
        x: Vec<Coord>,
        y: Vec<Option<f64>>,
        text: Vec<String>,
    ) -> Self {
        Self {
            kind: TraceKind::Scatter,
            x,
            y,
            text: Some(text),
            mode: Some(Mode::LinesMarkers),
            name: Some(name.to_string()),
            textposition: Some("top".into()),
        }
    }

    /// Number of points in the series.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autotick: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick0: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dtick: Option<f64>,
}

impl Axis {
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }

    /// Year axis with automatic ticks starting at `first_year`.
    pub fn years(title: &str, first_year: i32) -> Self {
        Self {
            autotick: Some(true),
            tick0: Some(first_year as f64),
            ..Self::titled(title)
        }
    }

    /// Percentage axis fixed to `[0, 100]` with a tick every 10.
    pub fn percent(title: &str) -> Self {
        Self {
            range: Some([0.0, 100.0]),
            dtick: Some(10.0),
            ..Self::titled(title)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: String,
    pub xaxis: Axis,
    pub yaxis: Axis,
}

/// A complete chart descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    /// Series names in plotting order; bars contribute nothing.
    pub fn series_names(&self) -> Vec<&str> {
        self.data.iter().filter_map(|t| t.name.as_deref()).collect()
    }
}
