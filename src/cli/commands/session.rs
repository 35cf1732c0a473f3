use crate::cli::commands::{open_tracker, report_warnings};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn login(cfg: &Config) -> AppResult<()> {
    let mut tracker = open_tracker(cfg)?;
    let who = tracker.login().to_string();
    report_warnings(&mut tracker);
    success(format!("Welcome back, {who}!"));
    Ok(())
}

pub fn logout(cfg: &Config) -> AppResult<()> {
    let mut tracker = open_tracker(cfg)?;
    if !tracker.is_logged_in() {
        info("Already logged out.");
    }
    tracker.logout();
    report_warnings(&mut tracker);
    success("Logged out.");
    Ok(())
}

pub fn whoami(cfg: &Config) -> AppResult<()> {
    let tracker = open_tracker(cfg)?;
    match tracker.current_user() {
        Some(user) => println!("{user}"),
        None => info("Not logged in."),
    }
    Ok(())
}
