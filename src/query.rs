use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Filter dimension that matches against every searchable text field of a record.
pub const SEARCH_DIMENSION: &str = "searchQuery";

/// A borrowed view of one record attribute, typed for matching and ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Free text: case-insensitive substring match, case-insensitive ordering.
    Text(&'a str),
    /// Identifier: exact match, case-insensitive ordering.
    Id(&'a str),
    Number(f64),
    Bool(bool),
    /// Membership list: a filter value matches when it equals one element.
    List(&'a [String]),
}

pub trait Record {
    fn id(&self) -> &str;

    /// Attribute lookup by wire name (`classId`, `stats.averageStudentsScore`, ...).
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;

    /// Fields consulted by the `searchQuery` dimension.
    fn search_text(&self) -> Vec<&str>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterConfig {
    dims: BTreeMap<String, String>,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, dimension: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(dimension, value);
        self
    }

    /// A blank value switches the dimension off.
    pub fn set(&mut self, dimension: impl Into<String>, value: impl Into<String>) {
        let dimension = dimension.into();
        let value = value.into();
        if value.trim().is_empty() {
            self.dims.remove(&dimension);
        } else {
            self.dims.insert(dimension, value);
        }
    }

    pub fn get(&self, dimension: &str) -> Option<&str> {
        self.dims.get(dimension).map(String::as_str)
    }

    /// Copy of `self` with every dimension of `overrides` layered on top.
    pub fn merged(&self, overrides: &FilterConfig) -> FilterConfig {
        let mut out = self.clone();
        for (dim, value) in &overrides.dims {
            out.dims.insert(dim.clone(), value.clone());
        }
        out
    }

    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.dims
            .iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortConfig {
    pub field: String,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Selecting the active field flips its direction; any other field starts ascending.
    pub fn toggled(current: Option<&SortConfig>, field: &str) -> SortConfig {
        match current {
            Some(cur) if cur.field == field => SortConfig {
                field: cur.field.clone(),
                direction: match cur.direction {
                    SortDirection::Asc => SortDirection::Desc,
                    SortDirection::Desc => SortDirection::Asc,
                },
            },
            _ => SortConfig::ascending(field),
        }
    }
}

pub fn matches<R: Record>(record: &R, filter: &FilterConfig) -> bool {
    filter.active().all(|(dim, wanted)| {
        if dim == SEARCH_DIMENSION {
            return record
                .search_text()
                .into_iter()
                .any(|text| contains_ignore_case(text, wanted));
        }
        match record.field(dim) {
            Some(value) => field_matches(value, wanted),
            None => false,
        }
    })
}

fn field_matches(value: FieldValue<'_>, wanted: &str) -> bool {
    match value {
        FieldValue::Text(s) => contains_ignore_case(s, wanted),
        FieldValue::Id(s) => s == wanted,
        FieldValue::Number(n) => wanted
            .trim()
            .parse::<f64>()
            .map(|w| w == n)
            .unwrap_or(false),
        FieldValue::Bool(b) => wanted
            .trim()
            .parse::<bool>()
            .map(|w| w == b)
            .unwrap_or(false),
        FieldValue::List(items) => items.iter().any(|item| item == wanted),
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Mismatched or missing values compare equal so the stable sort leaves them in place.
fn compare_fields(a: Option<FieldValue<'_>>, b: Option<FieldValue<'_>>) -> Ordering {
    match (a, b) {
        (
            Some(FieldValue::Text(x) | FieldValue::Id(x)),
            Some(FieldValue::Text(y) | FieldValue::Id(y)),
        ) => x.to_lowercase().cmp(&y.to_lowercase()),
        (Some(FieldValue::Number(x)), Some(FieldValue::Number(y))) => {
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(FieldValue::Bool(x)), Some(FieldValue::Bool(y))) => x.cmp(&y),
        _ => Ordering::Equal,
    }
}

pub fn sort_records<R: Record>(records: &mut [&R], sort: &SortConfig) {
    records.sort_by(|a, b| {
        let ord = compare_fields(a.field(&sort.field), b.field(&sort.field));
        match sort.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

/// Filtered, sorted view over `records`. Pure: the inputs are never modified.
pub fn apply<'a, R: Record>(
    records: &'a [R],
    filter: &FilterConfig,
    sort: Option<&SortConfig>,
) -> Vec<&'a R> {
    let mut out: Vec<&R> = records.iter().filter(|r| matches(*r, filter)).collect();
    if let Some(sort) = sort {
        sort_records(&mut out, sort);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Summary of a numeric field; records where the field is absent or non-numeric are skipped.
pub fn summarize<R: Record>(records: &[&R], field: &str) -> NumericSummary {
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for r in records {
        if let Some(FieldValue::Number(n)) = r.field(field) {
            count += 1;
            sum += n;
            min = min.min(n);
            max = max.max(n);
        }
    }
    if count == 0 {
        return NumericSummary {
            count: 0,
            mean: 0.0,
            min: 0.0,
            max: 0.0,
        };
    }
    NumericSummary {
        count,
        mean: sum / count as f64,
        min,
        max,
    }
}

/// Half-open range `[lower, upper)`.
#[derive(Debug, Clone, Copy)]
pub struct Bucket {
    pub label: &'static str,
    pub lower: f64,
    pub upper: f64,
}

pub const SCORE_BUCKETS: [Bucket; 6] = [
    Bucket { label: "0-50", lower: 0.0, upper: 50.0 },
    Bucket { label: "50-59", lower: 50.0, upper: 60.0 },
    Bucket { label: "60-69", lower: 60.0, upper: 70.0 },
    Bucket { label: "70-79", lower: 70.0, upper: 80.0 },
    Bucket { label: "80-89", lower: 80.0, upper: 90.0 },
    Bucket { label: "90-100", lower: 90.0, upper: f64::INFINITY },
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

impl Distribution {
    pub fn new(labels: &[&str], values: &[u64]) -> Self {
        Self {
            labels: labels.iter().map(|s| s.to_string()).collect(),
            values: values.to_vec(),
        }
    }
}

pub fn distribution<R: Record>(records: &[&R], field: &str, buckets: &[Bucket]) -> Distribution {
    let mut values = vec![0u64; buckets.len()];
    for r in records {
        let Some(FieldValue::Number(n)) = r.field(field) else {
            continue;
        };
        if let Some(i) = buckets.iter().position(|b| n >= b.lower && n < b.upper) {
            values[i] += 1;
        }
    }
    Distribution {
        labels: buckets.iter().map(|b| b.label.to_string()).collect(),
        values,
    }
}
