//! Read-only filtering of haircut records.
//!
//! A [`FilterSpec`] is assembled through checked constructors, so a spec that
//! exists is always coherent (bounds ordered, dates well formed). Evaluation
//! never touches the store.

use crate::errors::{AppError, AppResult};
use crate::models::HaircutRecord;
use crate::models::rating::{MAX_RATING, MIN_RATING};
use chrono::NaiveDate;

/// Inclusive calendar range. Either end may be open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    start: Option<String>,
    end: Option<String>,
}

impl DateRange {
    pub fn new(start: Option<&str>, end: Option<&str>) -> AppResult<Self> {
        let start = start.map(parse_bound).transpose()?;
        let end = end.map(parse_bound).transpose()?;

        if let (Some(s), Some(e)) = (&start, &end)
            && s > e
        {
            return Err(AppError::InvalidFilter(format!(
                "start date {s} is after end date {e}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    pub fn end(&self) -> Option<&str> {
        self.end.as_deref()
    }

    /// `YYYY-MM-DD` strings order the same way as the dates they spell.
    fn contains(&self, date: &str) -> bool {
        self.start.as_deref().is_none_or(|s| date >= s)
            && self.end.as_deref().is_none_or(|e| date <= e)
    }
}

fn parse_bound(raw: &str) -> AppResult<String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| AppError::InvalidDate(raw.to_string()))
}

/// Inclusive numeric range. A record without a value fails `min` and
/// passes `max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    min: Option<f64>,
    max: Option<f64>,
}

impl ValueRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> AppResult<Self> {
        for bound in [min, max].into_iter().flatten() {
            if !bound.is_finite() {
                return Err(AppError::InvalidFilter(format!("bound {bound} is not a number")));
            }
        }
        if let (Some(lo), Some(hi)) = (min, max)
            && lo > hi
        {
            return Err(AppError::InvalidFilter(format!(
                "minimum {lo} is greater than maximum {hi}"
            )));
        }
        Ok(Self { min, max })
    }

    /// Rating bounds must lie in `[0, 10]`.
    pub fn rating(min: Option<f64>, max: Option<f64>) -> AppResult<Self> {
        for bound in [min, max].into_iter().flatten() {
            if !(MIN_RATING..=MAX_RATING).contains(&bound) {
                return Err(AppError::InvalidFilter(format!(
                    "rating bound {bound} is outside 0-10"
                )));
            }
        }
        Self::new(min, max)
    }

    /// Cost bounds must not be negative.
    pub fn cost(min: Option<f64>, max: Option<f64>) -> AppResult<Self> {
        for bound in [min, max].into_iter().flatten() {
            if bound < 0.0 {
                return Err(AppError::InvalidFilter(format!(
                    "cost bound {bound} is negative"
                )));
            }
        }
        Self::new(min, max)
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    fn admits(&self, value: Option<f64>) -> bool {
        let above_min = match (self.min, value) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(lo), Some(v)) => v >= lo,
        };
        let below_max = match (self.max, value) {
            (Some(hi), Some(v)) => v <= hi,
            _ => true,
        };
        above_min && below_max
    }
}

/// Optional constraints; an absent axis does not constrain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    keyword: Option<String>,
    date_range: Option<DateRange>,
    rating_range: Option<ValueRange>,
    cost_range: Option<ValueRange>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring searched in style, barber, barbershop and
    /// notes, taken as typed (surrounding spaces included). An empty keyword
    /// is ignored.
    pub fn with_keyword(mut self, keyword: impl AsRef<str>) -> Self {
        let k = keyword.as_ref();
        self.keyword = (!k.is_empty()).then(|| k.to_lowercase());
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn with_rating_range(mut self, range: ValueRange) -> Self {
        self.rating_range = Some(range);
        self
    }

    pub fn with_cost_range(mut self, range: ValueRange) -> Self {
        self.cost_range = Some(range);
        self
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    pub fn date_range(&self) -> Option<&DateRange> {
        self.date_range.as_ref()
    }

    pub fn rating_range(&self) -> Option<&ValueRange> {
        self.rating_range.as_ref()
    }

    pub fn cost_range(&self) -> Option<&ValueRange> {
        self.cost_range.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.keyword.is_none()
            && self.date_range.is_none()
            && self.rating_range.is_none()
            && self.cost_range.is_none()
    }

    pub fn matches(&self, record: &HaircutRecord) -> bool {
        let f = &record.fields;

        if let Some(k) = &self.keyword
            && !f.searchable_text().to_lowercase().contains(k.as_str())
        {
            return false;
        }
        if let Some(range) = &self.date_range
            && !range.contains(&f.date)
        {
            return false;
        }
        if let Some(range) = &self.rating_range
            && !range.admits(f.rating)
        {
            return false;
        }
        if let Some(range) = &self.cost_range
            && !range.admits(f.cost.as_ref().map(|c| c.amount))
        {
            return false;
        }
        true
    }
}

/// Keep the records matching `spec`, in their input order.
pub fn apply(records: Vec<HaircutRecord>, spec: Option<&FilterSpec>) -> Vec<HaircutRecord> {
    match spec {
        Some(spec) if !spec.is_empty() => records.into_iter().filter(|r| spec.matches(r)).collect(),
        _ => records,
    }
}
