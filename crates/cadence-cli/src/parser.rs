use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_english::{parse_date_string, Dialect};

const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Parses `YYYY-MM-DD`, `YYYY-MM-DD HH:MM[:SS]`, or English phrases such as
/// "tomorrow" and "next friday" relative to `now`. A bare date means midnight.
pub fn parse_date_time(input: &str, now: NaiveDateTime) -> Result<NaiveDateTime> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN));
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(parsed);
        }
    }

    parse_date_string(input, Utc.from_utc_datetime(&now), Dialect::Us)
        .map(|parsed| parsed.naive_utc())
        .map_err(|e| anyhow!("Failed to parse date '{}': {}", input, e))
}

pub fn parse_date(input: &str, now: NaiveDateTime) -> Result<NaiveDate> {
    parse_date_time(input, now).map(|parsed| parsed.date())
}

/// Splits `MMDD` into month and day. Range checks are left to the rule
/// builder.
pub fn parse_month_day(input: &str) -> Result<(u32, u32)> {
    let input = input.trim();
    if input.len() != 4 || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(anyhow!("Expected the date as MMDD, got '{}'", input));
    }
    let month = input[..2].parse()?;
    let day = input[2..].parse()?;
    Ok((month, day))
}
