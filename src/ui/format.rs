use chrono::{DateTime, TimeZone};
use std::borrow::Cow;
use std::fmt::Display;

pub const NAME_DISPLAY_LIMIT: usize = 40;
const NAME_ELLIPSIS: &str = "...";

/// Names longer than [`NAME_DISPLAY_LIMIT`] characters are cut so the result,
/// ellipsis included, is exactly the limit.
pub fn truncate_name(name: &str) -> Cow<'_, str> {
    if name.chars().count() <= NAME_DISPLAY_LIMIT {
        return Cow::Borrowed(name);
    }
    let keep = NAME_DISPLAY_LIMIT - NAME_ELLIPSIS.len();
    let mut truncated: String = name.chars().take(keep).collect();
    truncated.push_str(NAME_ELLIPSIS);
    Cow::Owned(truncated)
}

pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

/// Twelve-hour time of day, e.g. `02:05 PM`.
pub fn format_timestamp<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.format("%I:%M %p").to_string()
}
