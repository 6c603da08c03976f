//! Recency, per-sensor filtering and chart windows over reading sequences

use crate::models::Reading;

/// Number of points shown by a chart when the caller has no preference
pub const DEFAULT_CHART_WINDOW: usize = 10;

/// The last `min(n, len)` readings, in their original order
///
/// An empty result means "nothing to chart", not a failure.
pub fn window_for_chart(readings: &[Reading], n: usize) -> &[Reading] {
    let start = readings.len().saturating_sub(n);
    &readings[start..]
}

/// The last known reading
///
/// Uses the greatest timestamp when all timestamps parse (ties go to the later
/// arrival); otherwise falls back to arrival order.
pub fn latest_reading(readings: &[Reading]) -> Option<&Reading> {
    let parsed: Option<Vec<_>> = readings.iter().map(|r| r.timestamp_utc()).collect();
    match parsed {
        Some(stamps) => readings
            .iter()
            .zip(stamps)
            .max_by(|(_, a), (_, b)| a.cmp(b))
            .map(|(reading, _)| reading),
        None => readings.last(),
    }
}

/// Readings belonging to one sensor, in original order
pub fn readings_for<'a>(
    readings: &'a [Reading],
    sensor_id: &'a str,
) -> impl Iterator<Item = &'a Reading> + 'a {
    readings.iter().filter(move |r| r.sensor_id == sensor_id)
}
