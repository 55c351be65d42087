use chrono::{DateTime, Utc};

use crate::models::TrackPoint;
use crate::types::{RunState, RunSummary};

/// Minste registrerte fart (m/s) over ruta.
pub fn min_speed(route: &[TrackPoint]) -> Option<f64> {
    let mut min: Option<f64> = None;
    for p in route {
        min = Some(match min {
            Some(m) => m.min(p.speed),
            None => p.speed,
        });
    }
    min
}

/// Gjennomsnittsfart (m/s) over ruta.
pub fn avg_speed(route: &[TrackPoint]) -> Option<f64> {
    if route.is_empty() {
        return None;
    }
    let mut sum = 0.0f64;
    for p in route {
        sum += p.speed;
    }
    Some(sum / route.len() as f64)
}

/// Høyeste registrerte fart (m/s) over ruta.
pub fn max_speed(route: &[TrackPoint]) -> Option<f64> {
    let mut max: Option<f64> = None;
    for p in route {
        max = Some(match max {
            Some(m) => m.max(p.speed),
            None => p.speed,
        });
    }
    max
}

/// Tempo (min/km) fra fart; None ved stillstand.
pub fn pace_min_per_km(speed_ms: f64) -> Option<f64> {
    if speed_ms > 0.0 && speed_ms.is_finite() {
        Some(1000.0 / speed_ms / 60.0)
    } else {
        None
    }
}

/// "M:SS min/km"-formatering for rapporter.
pub fn format_pace(min_per_km: f64) -> String {
    let total_sec = (min_per_km * 60.0).round() as i64;
    format!("{}:{:02} min/km", total_sec / 60, total_sec % 60)
}

/// Avleder sammendraget fra gjeldende tilstand. Muterer ingenting – stop()
/// eier selve tømmingen av lageret.
pub fn summarize(state: &RunState, now: DateTime<Utc>) -> RunSummary {
    RunSummary {
        started_at: state.start_time,
        duration_sec: state.elapsed_seconds(now),
        distance_km: state.distance,
        calories: state.calories,
        min_speed_ms: min_speed(&state.route),
        avg_speed_ms: avg_speed(&state.route),
        max_speed_ms: max_speed(&state.route),
        route: state.route.clone(),
        route_to_send: state.route_to_send.clone(),
    }
}
