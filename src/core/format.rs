//! Time formatting for the position label.

/// Milliseconds -> `mm:ss`, both fields zero-padded to two digits.
///
/// Minutes do not roll over into hours: one hour is `60:00`.
pub fn format_time(millis: u64) -> String {
    let s = millis / 1000;
    let m = s / 60;
    let s = s % 60;
    format!("{m:02}:{s:02}")
}
