//! Date formatting on top of chrono.
//!
//! Records carry epoch seconds. Display dates are shown in the site's
//! fixed UTC offset; feed dates are always UTC.

use chrono::{DateTime, Datelike, FixedOffset, Offset, Utc};

/// `pubDate` layout used by the feed.
pub const FEED_FORMAT: &str = "%a, %d %b %Y %H:%M:%S +0000";

/// Fixed offset of `hours` east of UTC. Out-of-range values fall back to UTC.
pub fn offset(hours: i32) -> FixedOffset {
    FixedOffset::east_opt(hours.saturating_mul(3600)).unwrap_or_else(|| Utc.fix())
}

fn utc(epoch: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(epoch, 0).unwrap_or_default()
}

/// `epoch` seen from the site's time zone.
pub fn local(epoch: i64, hours: i32) -> DateTime<FixedOffset> {
    utc(epoch).with_timezone(&offset(hours))
}

/// `YYYY-MM-DD` in the site's time zone.
pub fn created_date(epoch: i64, hours: i32) -> String {
    local(epoch, hours).format("%Y-%m-%d").to_string()
}

pub fn year(epoch: i64, hours: i32) -> i32 {
    local(epoch, hours).year()
}

/// RFC 822 timestamp in UTC, e.g. `Fri, 01 Mar 2024 10:00:00 +0000`.
pub fn feed_date(epoch: i64) -> String {
    utc(epoch).format(FEED_FORMAT).to_string()
}

/// Current wall-clock time in the site's time zone.
pub fn now_local(hours: i32) -> String {
    Utc::now()
        .with_timezone(&offset(hours))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
