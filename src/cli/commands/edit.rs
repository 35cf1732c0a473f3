use crate::cli::commands::{build_fields, open_tracker, report_warnings};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;

/// Replace an existing haircut. Omitted options become empty.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        date,
        style,
        details,
        keep_images,
    } = cmd
    {
        let mut tracker = open_tracker(cfg)?;
        tracker.require_login()?;

        let current = tracker
            .record(id)
            .ok_or_else(|| AppError::NotFound(id.clone()))?;
        let existing = if *keep_images {
            current.fields.images.clone()
        } else {
            Vec::new()
        };

        let fields = build_fields(date, style, details, existing, cfg)?;
        let record = tracker.edit_record(id, fields)?;
        report_warnings(&mut tracker);

        success(format!(
            "Haircut {} updated: '{}' on {}.",
            record.id, record.fields.style, record.fields.date
        ));
    }

    Ok(())
}
