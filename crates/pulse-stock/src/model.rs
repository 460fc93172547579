//! Market data model
//!
//! A [`PriceSeries`] is always strictly ascending by date with one point per
//! date; every constructor normalizes its input to keep it that way.

use crate::error::{Result, StockError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Placeholder for metadata a source could not provide
pub const NOT_AVAILABLE: &str = "N/A";

/// One daily observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// `None` when the source does not report volume
    pub volume: Option<u64>,
}

impl PricePoint {
    /// Point with a close only; open/high/low mirror the close
    pub fn from_close(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume: None,
        }
    }
}

/// Derived columns, parallel to the series points
///
/// `None` marks an index where the indicator is not yet defined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub ma20: Vec<Option<f64>>,
    pub ma50: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    /// Volume with missing observations zero-filled
    pub volume: Vec<u64>,
}

/// Ordered daily history for one ticker
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
    indicators: Option<IndicatorSet>,
}

impl PriceSeries {
    /// Build a series, sorting by date and dropping unusable points
    ///
    /// When a date appears more than once the last observation wins. Points
    /// with a non-finite close are discarded.
    pub fn new(symbol: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        points.retain(|p| p.close.is_finite());
        // Stable sort keeps arrival order among equal dates
        points.sort_by_key(|p| p.date);

        let mut normalized: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match normalized.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => normalized.push(point),
            }
        }

        Self {
            symbol: symbol.into(),
            points: normalized,
            indicators: None,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Closing prices in date order
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Keep only the most recent `n` points
    ///
    /// Any attached indicators are dropped, since their warm-up depended on
    /// the discarded history.
    pub fn tail(mut self, n: usize) -> Self {
        let skip = self.points.len().saturating_sub(n);
        self.points.drain(..skip);
        self.indicators = None;
        self
    }

    pub fn indicators(&self) -> Option<&IndicatorSet> {
        self.indicators.as_ref()
    }

    /// Attach derived columns; lengths must match the series
    pub fn with_indicators(mut self, indicators: IndicatorSet) -> Result<Self> {
        let n = self.points.len();
        let lengths = [
            indicators.ma20.len(),
            indicators.ma50.len(),
            indicators.rsi.len(),
            indicators.macd.len(),
            indicators.signal.len(),
            indicators.volume.len(),
        ];
        if lengths.iter().any(|&len| len != n) {
            return Err(StockError::IndicatorError(format!(
                "indicator columns do not match series length {n}"
            )));
        }
        self.indicators = Some(indicators);
        Ok(self)
    }

    /// Row view joining points and derived columns
    pub fn rows(&self) -> Vec<SeriesRow> {
        let column = |values: Option<&Vec<Option<f64>>>, i: usize| {
            values.and_then(|v| v.get(i).copied().flatten())
        };
        let ind = self.indicators.as_ref();

        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| SeriesRow {
                date: p.date,
                open: p.open,
                high: p.high,
                low: p.low,
                close: p.close,
                volume: ind
                    .and_then(|s| s.volume.get(i).copied())
                    .or(p.volume),
                ma20: column(ind.map(|s| &s.ma20), i),
                ma50: column(ind.map(|s| &s.ma50), i),
                rsi: column(ind.map(|s| &s.rsi), i),
                macd: column(ind.map(|s| &s.macd), i),
                signal: column(ind.map(|s| &s.signal), i),
            })
            .collect()
    }
}

impl Serialize for PriceSeries {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.rows().serialize(serializer)
    }
}

/// One row of a series with its derived columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<u64>,
    pub ma20: Option<f64>,
    pub ma50: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub signal: Option<f64>,
}

/// Descriptive metadata about the company behind a ticker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    pub sector: String,
    pub industry: String,
    pub market_cap: String,
    pub summary: String,
}

impl CompanyInfo {
    /// Metadata with every field set to the sentinel except the name
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sector: NOT_AVAILABLE.to_string(),
            industry: NOT_AVAILABLE.to_string(),
            market_cap: NOT_AVAILABLE.to_string(),
            summary: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Free-form news-sentiment digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SentimentSummary(String);

impl SentimentSummary {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SentimentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a data source returns for one ticker
#[derive(Debug, Clone, Serialize)]
pub struct MarketData {
    pub series: PriceSeries,
    pub company: CompanyInfo,
    /// Name of the source that answered
    pub source: String,
}

/// History window requested from the primary source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Period {
    OneDay,
    FiveDays,
    OneMonth,
    ThreeMonths,
    #[default]
    SixMonths,
    OneYear,
    TwoYears,
    FiveYears,
    TenYears,
    YearToDate,
    Max,
}

impl Period {
    /// All supported periods, shortest first
    pub const ALL: [Period; 11] = [
        Period::OneDay,
        Period::FiveDays,
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::OneYear,
        Period::TwoYears,
        Period::FiveYears,
        Period::TenYears,
        Period::YearToDate,
        Period::Max,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::OneDay => "1d",
            Period::FiveDays => "5d",
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
            Period::TenYears => "10y",
            Period::YearToDate => "ytd",
            Period::Max => "max",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Period::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| {
                StockError::InvalidPeriod(format!(
                    "{s} (expected one of: {})",
                    Period::ALL.map(|p| p.as_str()).join(", ")
                ))
            })
    }
}

impl TryFrom<String> for Period {
    type Error = StockError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.as_str().to_string()
    }
}
