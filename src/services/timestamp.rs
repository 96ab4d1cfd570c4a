//! Default value for the loan timestamp input

use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

use crate::page::Page;

/// Format of a `datetime-local` input value
pub const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// `now` truncated to the minute, as a `datetime-local` value
pub fn minute_timestamp<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    now.format(DATETIME_LOCAL_FORMAT).to_string()
}

/// Fill the input with `now` if it exists and is empty.
///
/// Returns true when a value was written.
pub fn fill_default_timestamp<Tz>(page: &dyn Page, input: &str, now: &DateTime<Tz>) -> bool
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match page.input_value(input) {
        Some(current) if current.is_empty() => {
            let value = minute_timestamp(now);
            tracing::debug!("Defaulting {} to {}", input, value);
            page.set_input_value(input, &value)
        }
        _ => false,
    }
}

/// [`fill_default_timestamp`] with the local clock
pub fn fill_with_local_time(page: &dyn Page, input: &str) -> bool {
    fill_default_timestamp(page, input, &Local::now())
}
