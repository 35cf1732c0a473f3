use crate::cli::commands::open_tracker;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::HaircutRecord;
use crate::utils::colors::{RESET, color_for_rating};
use crate::utils::formatting::{bold, long_date, money, rating};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { id } = cmd {
        let tracker = open_tracker(cfg)?;
        tracker.require_login()?;

        let record = tracker
            .record(id)
            .ok_or_else(|| AppError::NotFound(id.clone()))?;
        print_record(record);
    }
    Ok(())
}

/// Detail view of one haircut.
pub(crate) fn print_record(record: &HaircutRecord) {
    let f = &record.fields;

    println!("\n=== {} ===", bold(&f.style));
    println!("Id:     {}", record.id);
    println!("Date:   {}", long_date(&f.date));

    if let Some(r) = f.rating {
        println!(
            "Rating: {}{} / 10{}",
            color_for_rating(Some(r)),
            rating(r),
            RESET
        );
    }

    let shop_line = match (&f.barbershop, &f.barber) {
        (Some(shop), Some(barber)) => Some(format!("{shop} - {barber}")),
        (Some(shop), None) => Some(shop.clone()),
        (None, Some(barber)) => Some(barber.clone()),
        (None, None) => None,
    };
    if let Some(line) = shop_line {
        println!("Shop:   {line}");
    }

    if let Some(loc) = &f.location {
        println!("Where:  {} ({:.4}, {:.4})", loc.address, loc.lat, loc.lng);
    }

    if let Some(cost) = &f.cost {
        println!("Cost:   {}", money(cost.amount, &cost.currency));
    }

    if !f.images.is_empty() {
        println!("Photos: {}", f.images.len());
    }

    if let Some(notes) = &f.notes {
        println!("Notes:");
        for line in textwrap::wrap(notes, 72) {
            println!("  {line}");
        }
    }
}
