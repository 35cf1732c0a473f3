use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Accept `YYYY-MM-DD` or the shortcuts `today` / `yesterday`.
pub fn parse_user_date(s: &str) -> Option<NaiveDate> {
    match s.trim().to_ascii_lowercase().as_str() {
        "today" => Some(today()),
        "yesterday" => today().pred_opt(),
        other => parse_date(other),
    }
}
