use chrono::{TimeZone, Utc};
use rungraph_core::summary::{avg_speed, format_pace, max_speed, min_speed, pace_min_per_km};
use rungraph_core::{print_run_report, summarize, RunState, TrackPoint};

fn state_with_speeds(speeds: &[f64]) -> RunState {
    let t0 = Utc.timestamp_millis_opt(1_700_000_000_000).single().unwrap();
    let mut state = RunState::begin(t0);
    for (i, &speed) in speeds.iter().enumerate() {
        state.route.push(TrackPoint {
            latitude: 0.0,
            longitude: i as f64 * 0.0002,
            speed,
            timestamp: t0 + chrono::Duration::seconds(i as i64),
            distance: if i == 0 { 0.0 } else { 0.0222 },
        });
    }
    state.distance = 0.0222 * (speeds.len().saturating_sub(1)) as f64;
    state
}

#[test]
fn test_fartsstatistikk() {
    let state = state_with_speeds(&[1.0, 3.0, 2.0]);
    assert_eq!(min_speed(&state.route), Some(1.0));
    assert_eq!(max_speed(&state.route), Some(3.0));
    assert_eq!(avg_speed(&state.route), Some(2.0));

    // tom rute gir ingen statistikk
    assert_eq!(min_speed(&[]), None);
    assert_eq!(avg_speed(&[]), None);
    assert_eq!(max_speed(&[]), None);
}

#[test]
fn test_tempo() {
    // 2 m/s -> 1000/2/60 = 8.333 min/km -> "8:20 min/km"
    let pace = pace_min_per_km(2.0).unwrap();
    assert!((pace - 8.3333).abs() < 1e-3);
    assert_eq!(format_pace(pace), "8:20 min/km");

    assert_eq!(pace_min_per_km(0.0), None);
    assert_eq!(pace_min_per_km(-1.0), None);
}

#[test]
fn test_sammendrag_og_rapport() {
    let state = state_with_speeds(&[2.0, 2.0, 2.0]);
    let now = state.start_time + chrono::Duration::seconds(2);
    let summary = summarize(&state, now);

    assert_eq!(summary.duration_sec, 2);
    assert_eq!(summary.route.len(), 3);
    assert_eq!(summary.avg_speed_ms, Some(2.0));
    assert!((summary.distance_km - 0.0444).abs() < 1e-3);

    // røyk-test: rapporten skal ikke panikkere, heller ikke for tomme felt
    print_run_report(&summary);
    let tom = summarize(&RunState::begin(state.start_time), now);
    print_run_report(&tom);
}
