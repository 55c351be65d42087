use crate::summary::{format_pace, pace_min_per_km};
use crate::types::RunSummary;

pub fn print_run_report(summary: &RunSummary) {
    println!("--- Run Report ---");
    println!("Distance: {:.2} km", summary.distance_km);
    println!("Calories: {:.0} kcal", summary.calories);
    println!(
        "Duration: {}:{:02}:{:02}",
        summary.duration_sec / 3600,
        (summary.duration_sec % 3600) / 60,
        summary.duration_sec % 60
    );
    println!(
        "Speed min/avg/max: {} / {} / {} m/s",
        fmt_speed(summary.min_speed_ms),
        fmt_speed(summary.avg_speed_ms),
        fmt_speed(summary.max_speed_ms)
    );
    match summary.avg_speed_ms.and_then(pace_min_per_km) {
        Some(p) => println!("Pace: {}", format_pace(p)),
        None => println!("Pace: -"),
    }
    println!(
        "Route points: {} ({} queued for sync)",
        summary.route.len(),
        summary.route_to_send.len()
    );
}

fn fmt_speed(speed: Option<f64>) -> String {
    match speed {
        Some(v) => format!("{v:.1}"),
        None => "-".to_string(),
    }
}
