use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;

/// `YYYYMMDD` — the store's date key format.
const DATE_FORMAT: &str = "%Y%m%d";

/// Zone name used when none is configured.
pub const DEFAULT_ZONE: &str = "Asia/Tokyo";

/// The reference timezone all activity dates are bucketed in.
///
/// Resolution never fails: an unknown zone name falls back to a fixed
/// UTC+9 offset, so a host without a zone table still starts and still
/// buckets days for the same audience.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Zone {
    Named(Tz),
    Fixed(FixedOffset),
}

impl Zone {
    /// Resolve an IANA zone name, falling back to fixed UTC+9.
    pub fn resolve(name: &str) -> Zone {
        match name.parse::<Tz>() {
            Ok(tz) => Zone::Named(tz),
            Err(_) => Zone::Fixed(fallback_offset()),
        }
    }

    /// Format an instant as a date key in this zone.
    pub fn stamp(&self, instant: DateTime<Utc>) -> String {
        match self {
            Zone::Named(tz) => instant.with_timezone(tz).format(DATE_FORMAT).to_string(),
            Zone::Fixed(offset) => instant.with_timezone(offset).format(DATE_FORMAT).to_string(),
        }
    }

    /// Today's date key in this zone.
    pub fn today(&self) -> String {
        self.stamp(Utc::now())
    }
}

impl Default for Zone {
    fn default() -> Self {
        Zone::resolve(DEFAULT_ZONE)
    }
}

fn fallback_offset() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).expect("UTC+9 is a valid offset")
}
