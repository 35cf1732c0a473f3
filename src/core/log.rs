//! Rendering of the internal `log` table.

use crate::db::log::{LogEntry, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;

const MAX_OP_WIDTH: usize = 40;

static ANSI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("ANSI pattern is valid"));

fn strip_ansi(s: &str) -> String {
    ANSI.replace_all(s, "").into_owned()
}

fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "edit" => Colour::Yellow,
        "login" | "logout" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    /// One line per entry: `id: date | op (target) => message`.
    pub fn format_entry(entry: &LogEntry, id_w: usize, date_w: usize) -> String {
        let date = chrono::DateTime::parse_from_rfc3339(&entry.date)
            .map(|dt| dt.format("%FT%T%:z").to_string())
            .unwrap_or_else(|_| entry.date.clone());

        let mut label = color_for_operation(&entry.operation)
            .paint(entry.operation.as_str())
            .to_string();
        if !entry.target.is_empty() {
            label.push_str(&format!(" ({})", entry.target));
        }

        let visible = strip_ansi(&label).chars().count();
        let label = if visible > MAX_OP_WIDTH {
            let plain: String = strip_ansi(&label)
                .chars()
                .take(MAX_OP_WIDTH - 3)
                .collect();
            format!("{plain}...")
        } else {
            format!("{label}{}", " ".repeat(MAX_OP_WIDTH - visible))
        };

        format!(
            "{:>id_w$}: {:<date_w$} | {} => {}",
            entry.id,
            date,
            label,
            entry.message,
            id_w = id_w,
            date_w = date_w
        )
    }

    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;
        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");
        for e in &entries {
            println!("{}", Self::format_entry(e, id_w, date_w));
        }
        Ok(())
    }
}
