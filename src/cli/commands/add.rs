use crate::cli::commands::{build_fields, open_tracker, report_warnings};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Log a new haircut.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        date,
        style,
        details,
    } = cmd
    {
        let mut tracker = open_tracker(cfg)?;
        tracker.require_login()?;

        let fields = build_fields(date, style, details, Vec::new(), cfg)?;
        let record = tracker.add_record(fields)?;
        report_warnings(&mut tracker);

        success(format!(
            "Haircut '{}' on {} saved (id {}).",
            record.fields.style, record.fields.date, record.id
        ));
    }

    Ok(())
}
