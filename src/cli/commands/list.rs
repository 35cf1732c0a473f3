use crate::cli::commands::show::print_record;
use crate::cli::commands::{build_filter, open_tracker};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::HaircutRecord;
use crate::utils::formatting::{days_label, money, rating};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { filter, details } = cmd {
        let mut tracker = open_tracker(cfg)?;
        tracker.require_login()?;

        match tracker.days_since_last() {
            Some(days) => println!("💈 {} Since Last Haircut\n", days_label(days)),
            None => println!("Welcome! Log your first haircut to get started.\n"),
        }

        if let Some(spec) = build_filter(filter)? {
            tracker.apply_filter(spec);
        }

        let visible = tracker.visible_records();
        if visible.is_empty() {
            if tracker.active_filter().is_some() {
                println!("No haircuts match your filters.");
            } else {
                println!("No haircuts logged yet.");
            }
            return Ok(());
        }

        if *details {
            for r in &visible {
                print_record(r);
            }
        } else {
            print!("{}", render_table(&visible));
        }

        println!("\n{} of {} haircut(s)", visible.len(), tracker.store().len());
    }
    Ok(())
}

fn render_table(records: &[HaircutRecord]) -> String {
    let mut table = Table::new(vec![
        Column::new("ID", 16),
        Column::new("DATE", 10),
        Column::new("STYLE", 24),
        Column::new("BARBER", 18),
        Column::new("SHOP", 22),
        Column::new("RATING", 6),
        Column::new("COST", 12),
    ]);

    for r in records {
        let f = &r.fields;
        table.add_row(vec![
            r.id.clone(),
            f.date.clone(),
            f.style.clone(),
            f.barber.clone().unwrap_or_else(|| "--".into()),
            f.barbershop.clone().unwrap_or_else(|| "--".into()),
            f.rating.map(rating).unwrap_or_else(|| "--".into()),
            f.cost
                .as_ref()
                .map(|c| money(c.amount, &c.currency))
                .unwrap_or_else(|| "--".into()),
        ]);
    }

    table.render()
}
