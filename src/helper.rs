use std::time::Duration;

/// Round non-negative `f64` to the nearest `usize`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn f64_to_usize_round(x: f64) -> usize {
    debug_assert!(x >= 0.0);
    x.round() as usize
}

/// Cast `usize` to `f64`; ignore precision loss
#[allow(clippy::cast_precision_loss)]
pub fn usize_to_f64(x: usize) -> f64 {
    x as f64
}

/// Cast `u64` to `f64`; ignore precision loss
#[allow(clippy::cast_precision_loss)]
pub fn u64_to_f64(x: u64) -> f64 {
    x as f64
}

/// Duration in seconds
pub fn duration_in_seconds(duration: Duration) -> f64 {
    duration.as_secs_f64()
}

/// Clause/variable ratio; zero variables give ratio 0
pub fn ratio(num_clauses: usize, num_variables: usize) -> f64 {
    if num_variables == 0 {
        0.0
    } else {
        usize_to_f64(num_clauses) / usize_to_f64(num_variables)
    }
}
