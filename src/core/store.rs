use crate::errors::{AppError, AppResult};
use crate::models::{Cost, Currency, GeoLocation, HaircutFields, HaircutRecord};
use crate::utils::date;
use chrono::Local;
use tracing::debug;

/// Authoritative, in-memory collection of haircut records.
///
/// The store only keeps the collection consistent; flushing it to a slot
/// after each mutation is the job of [`crate::core::tracker::Tracker`].
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<HaircutRecord>,
    last_id: i64,
    fallback_seq: u64,
}

impl RecordStore {
    pub fn new(records: Vec<HaircutRecord>) -> Self {
        let last_id = records
            .iter()
            .filter_map(|r| r.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            records,
            last_id,
            fallback_seq: 0,
        }
    }

    /// The collection used on first start, when nothing has been persisted yet.
    pub fn seed() -> Vec<HaircutRecord> {
        let fields = HaircutFields {
            date: date::today().format("%Y-%m-%d").to_string(),
            style: "High Fade".into(),
            notes: Some(
                "First time trying this style. The barber did a great job blending the sides."
                    .into(),
            ),
            images: vec![
                "https://images.unsplash.com/photo-1622288093952-a29d2483f129?q=80&w=1974&auto=format&fit=crop"
                    .into(),
            ],
            location: Some(GeoLocation {
                address: "123 Sample St, Toronto, ON".into(),
                lat: 43.6532,
                lng: -79.3832,
            }),
            rating: Some(9.5),
            barbershop: Some("The Gentry Barbershop".into()),
            barber: Some("John Doe".into()),
            cost: Some(Cost {
                amount: 50.0,
                currency: Currency::default(),
            }),
        };
        vec![HaircutRecord::new("sample-1", fields)]
    }

    /// All records, newest first. Records with an unparseable date sort last;
    /// records sharing a date keep their stored order.
    pub fn list(&self) -> Vec<HaircutRecord> {
        let mut out = self.records.clone();
        out.sort_by_key(|r| std::cmp::Reverse(r.parsed_date()));
        out
    }

    /// Records in stored order (the order that gets persisted).
    pub fn records(&self) -> &[HaircutRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&HaircutRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn create(&mut self, fields: HaircutFields) -> AppResult<HaircutRecord> {
        let fields = fields.validated()?;
        let record = HaircutRecord::new(self.next_id(), fields);

        self.records.insert(0, record.clone());
        debug!(id = %record.id, "haircut created");
        Ok(record)
    }

    /// Replace every field of the record `id`. Fields left empty in `fields`
    /// become absent; nothing is merged from the previous version.
    pub fn update(&mut self, id: &str, fields: HaircutFields) -> AppResult<HaircutRecord> {
        let slot = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;

        slot.fields = fields.validated()?;
        debug!(id, "haircut updated");
        Ok(slot.clone())
    }

    /// Remove the record `id`. Returns whether something was removed;
    /// unknown ids are not an error.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        let removed = self.records.len() != before;
        if removed {
            debug!(id, "haircut deleted");
        }
        removed
    }

    /// Whole days between today and the newest record, or `None` when there
    /// is nothing to measure from.
    pub fn days_since_last(&self) -> Option<i64> {
        let newest = self.records.iter().filter_map(|r| r.parsed_date()).max()?;
        Some((date::today() - newest).num_days().abs())
    }

    /// Millisecond timestamps, bumped so they strictly increase and never
    /// collide with a live id. Once the numeric range is used up, ids become
    /// `hc-<millis>-<seq>` tokens.
    fn next_id(&mut self) -> String {
        let now = Local::now().timestamp_millis();
        let Some(floor) = self.last_id.checked_add(1) else {
            return self.fallback_id(now);
        };

        let mut candidate = now.max(floor);
        while self.get(&candidate.to_string()).is_some() {
            match candidate.checked_add(1) {
                Some(next) => candidate = next,
                None => return self.fallback_id(now),
            }
        }
        self.last_id = candidate;
        candidate.to_string()
    }

    fn fallback_id(&mut self, now: i64) -> String {
        loop {
            self.fallback_seq += 1;
            let id = format!("hc-{now}-{}", self.fallback_seq);
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}
