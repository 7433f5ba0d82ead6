use crate::error::{Error, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// How to specify dates in API queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateSpec {
    /// Single year like 2018
    Year(i32),
    /// Inclusive range like 1992..=2018
    Range { start: i32, end: i32 },
}

impl DateSpec {
    pub fn to_query_param(&self) -> String {
        match *self {
            DateSpec::Year(y) => y.to_string(),
            DateSpec::Range { start, end } => format!("{}:{}", start, end),
        }
    }

    pub fn first_year(&self) -> i32 {
        match *self {
            DateSpec::Year(y) => y,
            DateSpec::Range { start, .. } => start,
        }
    }

    /// The year used for single-period charts (the end of a range).
    pub fn latest_year(&self) -> i32 {
        match *self {
            DateSpec::Year(y) => y,
            DateSpec::Range { end, .. } => end,
        }
    }
}

/// Metadata section returned by the API (position 0).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub page: u32,
    pub pages: u32,
    /// Some responses encode `per_page` as a string, others as a number.
    #[serde(deserialize_with = "de_u32_from_string_or_number")]
    pub per_page: u32,
    pub total: u32,
}

/// Serde helper: parse `u32` from either a JSON number or a string.
fn de_u32_from_string_or_number<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct U32Visitor;

    impl<'de> Visitor<'de> for U32Visitor {
        type Value = u32;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a string or integer representing a non-negative number")
        }

        fn visit_u64<E>(self, v: u64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            u32::try_from(v).map_err(E::custom)
        }

        fn visit_i64<E>(self, v: i64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            u32::try_from(v).map_err(|_| E::custom("negative value for u32"))
        }

        fn visit_str<E>(self, s: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            s.parse::<u32>().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(U32Visitor)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeName {
    pub id: String,
    pub value: String,
}

/// Raw entry from the API (position 1 array).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub indicator: CodeName,
    pub country: CodeName,
    #[serde(default)]
    pub countryiso3code: String,
    pub date: String,
    pub value: Option<f64>,
}

/// Flattened observation: the nested indicator/country descriptors reduced to plain fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    pub indicator_id: String,
    pub indicator_name: String,
    pub country_id: String, // typically ISO2
    pub country_name: String,
    pub country_iso3: String,
    pub year: i32,
    pub value: Option<f64>,
}

impl From<Entry> for Observation {
    fn from(e: Entry) -> Self {
        let year = e.date.parse::<i32>().unwrap_or(0);
        Self {
            indicator_id: e.indicator.id,
            indicator_name: e.indicator.value,
            country_id: e.country.id,
            country_name: e.country.value,
            country_iso3: e.countryiso3code,
            year,
            value: e.value,
        }
    }
}

// Allow -, _, . unescaped in codes
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Percent-encode each part and join them with `;`, the API's list separator.
pub(crate) fn enc_join<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(|s| percent_encoding::utf8_percent_encode(s.trim(), SAFE).to_string())
        .collect::<Vec<_>>()
        .join(";")
}

const DEFAULT_ENTITIES: [(&str, &str); 12] = [
    ("Canada", "CAN"),
    ("United States", "USA"),
    ("Brazil", "BRA"),
    ("France", "FRA"),
    ("India", "IND"),
    ("Italy", "ITA"),
    ("Germany", "DEU"),
    ("United Kingdom", "GBR"),
    ("China", "CHN"),
    ("Japan", "JPN"),
    ("Russia", "RUS"),
    ("Turkmenistan", "TKM"),
];

/// Ordered mapping of display name to World Bank country code.
///
/// Order matters: renderers assign colors by series position, so the same order
/// keeps a country's color stable across all charts of a report.
///
/// Serialized as a list of `[name, code]` pairs; deserializing goes through
/// `from_pairs`, so duplicated identifiers are rejected there too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(String, String)>", into = "Vec<(String, String)>")]
pub struct EntityMap {
    entries: Vec<(String, String)>,
}

impl TryFrom<Vec<(String, String)>> for EntityMap {
    type Error = Error;

    fn try_from(pairs: Vec<(String, String)>) -> Result<Self> {
        Self::from_pairs(pairs)
    }
}

impl From<EntityMap> for Vec<(String, String)> {
    fn from(m: EntityMap) -> Self {
        m.entries
    }
}

impl EntityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in twelve countries used when the caller selects none.
    pub fn default_set() -> Self {
        Self {
            entries: DEFAULT_ENTITIES
                .iter()
                .map(|(n, c)| (n.to_string(), c.to_string()))
                .collect(),
        }
    }

    /// Build from pairs, in order. Fails on a duplicated identifier.
    pub fn from_pairs<I, N, C>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<String>,
    {
        let mut map = Self::new();
        for (name, code) in pairs {
            map.insert(name, code)?;
        }
        Ok(map)
    }

    /// Insert a pair. An existing name keeps its position and takes the new code.
    ///
    /// ### Errors
    /// `Error::DuplicateIdentifier` if `code` (case-insensitive) already belongs to another name.
    pub fn insert(&mut self, name: impl Into<String>, code: impl Into<String>) -> Result<()> {
        let name = name.into();
        let code = code.into();
        if let Some((existing, _)) = self
            .entries
            .iter()
            .find(|(n, c)| *n != name && c.eq_ignore_ascii_case(&code))
        {
            return Err(Error::DuplicateIdentifier {
                code,
                existing: existing.clone(),
            });
        }
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = code,
            None => self.entries.push((name, code)),
        }
        Ok(())
    }

    /// Parse `"Canada=CAN;Brazil=BRA"` (`,` also accepted as separator).
    pub fn parse(s: &str) -> Result<Self> {
        let mut map = Self::new();
        for pair in s.split([',', ';']).map(str::trim).filter(|p| !p.is_empty()) {
            let (name, code) = pair
                .split_once('=')
                .map(|(n, c)| (n.trim(), c.trim()))
                .filter(|(n, c)| !n.is_empty() && !c.is_empty())
                .ok_or_else(|| Error::InvalidEntity(pair.to_string()))?;
            map.insert(name, code)?;
        }
        Ok(map)
    }

    /// This map, or the default set when it is empty.
    pub fn or_default(self) -> Self {
        if self.is_empty() { Self::default_set() } else { self }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, c)| c.as_str())
    }

    /// Lower-cased codes joined by `;`, ready for the `countries/{..}` path segment.
    pub fn country_filter(&self) -> String {
        let lowered: Vec<String> = self.codes().map(str::to_lowercase).collect();
        enc_join(lowered.iter().map(String::as_str))
    }
}
