/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";

/// Rating color:
/// \>= 8 → green
/// \< 5 → red
/// otherwise yellow, grey when unrated
pub fn color_for_rating(value: Option<f64>) -> &'static str {
    match value {
        None => GREY,
        Some(r) if r >= 8.0 => GREEN,
        Some(r) if r < 5.0 => RED,
        Some(_) => YELLOW,
    }
}
