//! Command handlers. Each one opens the tracker, performs a single
//! operation and reports the outcome through `ui::messages`.

pub mod add;
pub mod config;
pub mod del;
pub mod edit;
pub mod init;
pub mod list;
pub mod log;
pub mod session;
pub mod show;

use crate::cli::parser::{FilterArgs, RecordArgs};
use crate::config::Config;
use crate::core::filter::{DateRange, FilterSpec, ValueRange};
use crate::core::images::{ImageDraft, ImageSource};
use crate::core::tracker::Tracker;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{Cost, Currency, GeoLocation, HaircutFields, MAX_IMAGES, rating};
use crate::models::currency::SUPPORTED;
use crate::ui::messages::warning;
use crate::utils::date;
use crate::utils::path::expand_tilde;

/// Open the configured database and build the tracker on top of it.
pub(crate) fn open_tracker(cfg: &Config) -> AppResult<Tracker<DbPool>> {
    let pool = DbPool::new(&cfg.database)?;
    let mut tracker = Tracker::open_as(pool, cfg.session_identity.clone());
    report_warnings(&mut tracker);
    Ok(tracker)
}

/// Show persistence problems to the user; they never abort a command.
pub(crate) fn report_warnings(tracker: &mut Tracker<DbPool>) {
    for w in tracker.take_warnings() {
        warning(w);
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_cost(raw: &str, currency: Currency) -> AppResult<Option<Cost>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let amount: f64 = raw
        .parse()
        .map_err(|_| AppError::InvalidCost(raw.to_string()))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(AppError::InvalidCost(format!("{raw} (must be 0 or more)")));
    }
    Ok(Some(Cost { amount, currency }))
}

/// Turn command-line values into the fields of a record, attaching photos
/// on top of `existing_images`.
pub(crate) fn build_fields(
    date_arg: &str,
    style: &str,
    args: &RecordArgs,
    existing_images: Vec<String>,
    cfg: &Config,
) -> AppResult<HaircutFields> {
    let d = date::parse_user_date(date_arg)
        .ok_or_else(|| AppError::InvalidDate(date_arg.to_string()))?;

    let rating = match &args.rating {
        Some(raw) => rating::parse_input(raw)?,
        None => None,
    };

    let cost = match &args.cost {
        Some(raw) => {
            let currency = match &args.currency {
                Some(code) => Currency::parse(code)?,
                None => cfg.currency()?,
            };
            if !currency.is_supported() {
                warning(format!(
                    "{currency} is not one of the usual currencies ({}); saving it anyway.",
                    SUPPORTED.join(", ")
                ));
            }
            parse_cost(raw, currency)?
        }
        None => None,
    };

    let location = match non_blank(&args.address) {
        Some(address) => {
            let (lat, lng) = args.lat.zip(args.lng).ok_or_else(|| {
                AppError::Validation("--address needs both --lat and --lng".into())
            })?;
            Some(GeoLocation { address, lat, lng })
        }
        None => None,
    };

    let images = attach_images(existing_images, &args.images)?;

    Ok(HaircutFields {
        date: d.format("%Y-%m-%d").to_string(),
        style: style.to_string(),
        notes: non_blank(&args.notes),
        images,
        location,
        rating,
        barbershop: non_blank(&args.barbershop),
        barber: non_blank(&args.barber),
        cost,
    })
}

fn attach_images(existing: Vec<String>, paths: &[std::path::PathBuf]) -> AppResult<Vec<String>> {
    let draft = ImageDraft::with_images(existing);
    if paths.is_empty() {
        return Ok(draft.images());
    }

    let room = draft.remaining_capacity();
    let sources = paths
        .iter()
        .take(room)
        .map(|p| ImageSource::from_path(&expand_tilde(&p.to_string_lossy())))
        .collect::<AppResult<Vec<_>>>()?;

    let pending = draft.attach(sources);
    let rejected = pending.rejected() + paths.len().saturating_sub(room);
    if rejected > 0 {
        warning(format!(
            "You can only upload a maximum of {MAX_IMAGES} images. {rejected} photo(s) were not attached."
        ));
    }

    draft.finish(pending)
}

/// Build a filter from `list` flags; `None` when no flag is set.
pub(crate) fn build_filter(args: &FilterArgs) -> AppResult<Option<FilterSpec>> {
    let mut spec = FilterSpec::new();

    if let Some(k) = &args.keyword {
        spec = spec.with_keyword(k);
    }
    if args.from.is_some() || args.to.is_some() {
        spec = spec.with_date_range(DateRange::new(args.from.as_deref(), args.to.as_deref())?);
    }
    if args.min_rating.is_some() || args.max_rating.is_some() {
        spec = spec.with_rating_range(ValueRange::rating(args.min_rating, args.max_rating)?);
    }
    if args.min_cost.is_some() || args.max_cost.is_some() {
        spec = spec.with_cost_range(ValueRange::cost(args.min_cost, args.max_cost)?);
    }

    Ok((!spec.is_empty()).then_some(spec))
}
