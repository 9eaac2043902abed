//! Timestamp display formatting.
//!
//! Storage keeps full-precision RFC 3339 instants; every human-facing
//! surface shows minute precision without a timezone, matching the format
//! the bot has always displayed.

use chrono::{DateTime, Utc};

/// Render an instant as `YYYY-MM-DD HH:MM`.
pub fn display_minute(dt: DateTime<Utc>) -> String {
  dt.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn minute_precision_no_timezone() {
    let dt = Utc.with_ymd_and_hms(2025, 9, 1, 8, 30, 59).unwrap();
    assert_eq!(display_minute(dt), "2025-09-01 08:30");
  }
}
