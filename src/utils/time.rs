//! UTC timestamp helpers

use chrono::{DateTime, Timelike, Utc};

/// Current UTC time at microsecond precision.
///
/// Stores persist at most microseconds; truncating at stamping time keeps
/// a freshly constructed record equal to its own persisted round-trip.
pub fn utc_now() -> DateTime<Utc> {
    truncate_to_micros(Utc::now())
}

/// Drop sub-microsecond precision from a timestamp.
pub fn truncate_to_micros(ts: DateTime<Utc>) -> DateTime<Utc> {
    let micros = ts.nanosecond() / 1_000;
    ts.with_nanosecond(micros * 1_000).unwrap_or(ts)
}
