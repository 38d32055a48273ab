//! Display reference numbers for confirmed payments.

use chrono::Utc;

/// Build a reference of the form `PREFIX-TTTTTT-RRRRRR`: the low six digits
/// of the current time in milliseconds, then six random digits.
pub fn generate_reference(prefix: &str) -> String {
    format_reference(
        prefix,
        Utc::now().timestamp_millis().unsigned_abs(),
        rand::random::<u32>(),
    )
}

fn format_reference(prefix: &str, millis: u64, random: u32) -> String {
    format!("{prefix}-{:06}-{:06}", millis % 1_000_000, random % 1_000_000)
}
