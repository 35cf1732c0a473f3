use crate::cli::commands::{open_tracker, report_warnings};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let mut tracker = open_tracker(cfg)?;
        tracker.require_login()?;

        let label = tracker
            .record(id)
            .map(|r| format!("'{}' on {}", r.fields.style, r.fields.date));

        let Some(label) = label else {
            info(format!("No haircut with id {id}; nothing to delete."));
            return Ok(());
        };

        if cfg.confirm_delete
            && !*yes
            && !ask_confirmation(&format!(
                "Are you sure you want to delete this haircut log ({label})?"
            ))
        {
            info("Operation cancelled.");
            return Ok(());
        }

        tracker.delete_record(id);
        report_warnings(&mut tracker);
        success(format!("Haircut {label} has been deleted."));
    }

    Ok(())
}
