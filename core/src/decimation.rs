use crate::geo::RoundTo;
use crate::models::TrackPoint;

/// Sync-gate: skal gjeldende punkt også inn i `route_to_send`?
/// Telleren avrundes til 2 desimaler før sammenligning, slik at to steg på
/// 0.01 km trigger nøyaktig én gang. Første punkt i en økt velges aldri
/// (telleren starter på 0).
#[inline]
pub fn crosses_sync_threshold(acc_km: f64, threshold_km: f64) -> bool {
    acc_km.round_to(2) >= threshold_km
}

/// Uniform nedsampling av en ferdig rute for statisk polylinje-rendering.
/// Beholder alltid første og siste punkt, plukker innerpunkter med fast
/// stride. Ren visningssak – ikke en del av akkumuleringskjernen.
pub fn polyline_preview(route: &[TrackPoint], max_points: usize) -> Vec<TrackPoint> {
    if route.len() <= max_points || route.len() <= 2 || max_points < 3 {
        return route.to_vec();
    }

    let interior = &route[1..route.len() - 1];
    let keep = max_points - 2;
    // ceil-divisjon: stride slik at vi aldri plukker flere enn `keep`
    let stride = (interior.len() + keep - 1) / keep;

    let mut out = Vec::with_capacity(max_points);
    out.push(route[0].clone());
    for p in interior.iter().step_by(stride) {
        out.push(p.clone());
    }
    out.push(route[route.len() - 1].clone());
    out
}
