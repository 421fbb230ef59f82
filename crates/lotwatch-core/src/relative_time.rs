//! Coarse "time ago" / "time until" strings.
//!
//! The formatters hold no timer state. Callers that display these strings
//! re-invoke them on a fixed tick so the output advances in real time.

use time::OffsetDateTime;

const MILLIS_PER_SECOND: i64 = 1_000;
const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3_600;

/// Describe how long ago `reference_ms` was, as seen from `now_ms`.
///
/// Both arguments are milliseconds since the Unix epoch. A reference in the
/// future is reported as `"Just now"`.
#[must_use]
pub fn format_elapsed(reference_ms: i64, now_ms: i64) -> String {
    let diff = whole_seconds(now_ms.saturating_sub(reference_ms));

    if diff < SECONDS_PER_MINUTE {
        "Just now".to_owned()
    } else if diff < SECONDS_PER_HOUR {
        format!("{}m ago", diff / SECONDS_PER_MINUTE)
    } else {
        format!("{}h ago", diff / SECONDS_PER_HOUR)
    }
}

/// Describe how long until `target_ms`, as seen from `now_ms`.
#[must_use]
pub fn format_remaining(target_ms: i64, now_ms: i64) -> String {
    let diff = whole_seconds(target_ms.saturating_sub(now_ms));

    if diff <= 0 {
        "any moment".to_owned()
    } else if diff < SECONDS_PER_MINUTE {
        format!("{diff}s")
    } else {
        // diff is positive here, so this is a ceiling division
        format!("{}m", (diff + SECONDS_PER_MINUTE - 1) / SECONDS_PER_MINUTE)
    }
}

/// [`format_elapsed`] over `time` instants.
#[must_use]
pub fn elapsed_between(reference: OffsetDateTime, now: OffsetDateTime) -> String {
    format_elapsed(epoch_millis(reference), epoch_millis(now))
}

/// [`format_remaining`] over `time` instants.
#[must_use]
pub fn remaining_between(target: OffsetDateTime, now: OffsetDateTime) -> String {
    format_remaining(epoch_millis(target), epoch_millis(now))
}

/// Milliseconds since the Unix epoch, saturating outside the `i64` range.
#[must_use]
pub fn epoch_millis(instant: OffsetDateTime) -> i64 {
    let millis = instant.unix_timestamp_nanos() / 1_000_000;
    i64::try_from(millis).unwrap_or(if millis < 0 { i64::MIN } else { i64::MAX })
}

const fn whole_seconds(diff_ms: i64) -> i64 {
    diff_ms.div_euclid(MILLIS_PER_SECOND)
}
