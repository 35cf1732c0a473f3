use super::{currency::Currency, rating};
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Maximum number of images attached to one haircut.
pub const MAX_IMAGES: usize = 5;

/// Where the haircut took place. Address and coordinates always travel together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cost {
    pub amount: f64,
    pub currency: Currency,
}

/// Everything a caller supplies for a haircut. The store assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HaircutFields {
    pub date: String, // "YYYY-MM-DD"
    pub style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub images: Vec<String>, // data URLs or remote URLs, opaque to the store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barbershop: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barber: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Cost>,
}

/// One logged haircut, as persisted in the records slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HaircutRecord {
    pub id: String,
    #[serde(flatten)]
    pub fields: HaircutFields,
}

impl HaircutFields {
    pub fn new(date: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            style: style.into(),
            ..Self::default()
        }
    }

    /// Check required fields and bring optional ones into range.
    ///
    /// Nothing is written anywhere; the store calls this before touching
    /// its collection so a failed validation never applies partially.
    pub fn validated(mut self) -> AppResult<Self> {
        if self.date.trim().is_empty() {
            return Err(AppError::Validation("date is required".into()));
        }
        if NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").is_err() {
            return Err(AppError::Validation(format!(
                "date '{}' is not a valid YYYY-MM-DD date",
                self.date
            )));
        }
        if self.style.trim().is_empty() {
            return Err(AppError::Validation("style is required".into()));
        }

        if self.images.len() > MAX_IMAGES {
            return Err(AppError::Validation(format!(
                "at most {MAX_IMAGES} images are allowed, got {}",
                self.images.len()
            )));
        }

        if let Some(r) = self.rating {
            self.rating = Some(rating::clamp(r)?);
        }

        if let Some(cost) = &self.cost
            && (!cost.amount.is_finite() || cost.amount < 0.0)
        {
            return Err(AppError::Validation(format!(
                "cost must be a non-negative amount, got {}",
                cost.amount
            )));
        }

        if let Some(loc) = &self.location {
            if loc.address.trim().is_empty() {
                return Err(AppError::Validation("location address is required".into()));
            }
            if !(-90.0..=90.0).contains(&loc.lat) || !(-180.0..=180.0).contains(&loc.lng) {
                return Err(AppError::Validation(format!(
                    "location coordinates out of range: {}, {}",
                    loc.lat, loc.lng
                )));
            }
        }

        Ok(self)
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Text searched by the keyword filter. Missing fields count as empty.
    pub fn searchable_text(&self) -> String {
        [
            self.style.as_str(),
            self.barber.as_deref().unwrap_or_default(),
            self.barbershop.as_deref().unwrap_or_default(),
            self.notes.as_deref().unwrap_or_default(),
        ]
        .join(" ")
    }
}

impl HaircutRecord {
    pub fn new(id: impl Into<String>, fields: HaircutFields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.fields.parsed_date()
    }
}
