use time::{Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Unix timestamp of the date at midnight UTC, the way days are stored.
pub fn date_to_timestamp(date: Date) -> i64 {
    date.midnight().assume_utc().unix_timestamp()
}

pub fn date_from_timestamp(timestamp: i64) -> Result<Date, time::error::ComponentRange> {
    Ok(OffsetDateTime::from_unix_timestamp(timestamp)?.date())
}

pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

pub fn parse_date(value: &str) -> Result<Date, time::error::Parse> {
    Date::parse(value.trim(), DATE_FORMAT)
}
