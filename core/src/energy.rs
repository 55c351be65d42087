// core/src/energy.rs
// MET-basert energimodell for løp/gange. Rene funksjoner, feiler aldri –
// degenerert input gir 0-bidrag, ikke error.

pub const MET_SPEED_COEFF: f64 = 1.7145; // MET-økning per m/s bakkefart
pub const KCAL_FACTOR: f64 = 3.5 / 200.0; // (MET × 3.5 × kg) / 200 per minutt

/// MET for en gitt øyeblikksfart (m/s).
#[inline]
pub fn met_for_speed(speed_ms: f64) -> f64 {
    1.0 + MET_SPEED_COEFF * speed_ms.max(0.0)
}

/// Inkrementelle kalorier (kcal) for ett tidssteg.
/// `kcal = (MET × 3.5 × vekt) / 200 × minutter`
/// Stillstand gir 0 – hvilemetabolisme telles ikke her.
pub fn incremental_kcal(speed_ms: f64, elapsed_min: f64, weight_kg: f64) -> f64 {
    if !(speed_ms.is_finite() && elapsed_min.is_finite() && weight_kg.is_finite()) {
        return 0.0;
    }
    if speed_ms <= 0.0 || elapsed_min <= 0.0 || weight_kg <= 0.0 {
        return 0.0;
    }
    let kcal = met_for_speed(speed_ms) * KCAL_FACTOR * weight_kg * elapsed_min;
    kcal.max(0.0)
}

/// Akkumuleringsvindu: bidraget telles kun når segmentet er langt nok
/// og farten er fysisk plausibel (0 < v ≤ tak). Utenfor vinduet telles 0 –
/// punktet beholdes likevel i ruta for distanse/visning.
#[inline]
pub fn within_accrual_band(
    incremental_km: f64,
    speed_ms: f64,
    min_distance_km: f64,
    max_speed_ms: f64,
) -> bool {
    incremental_km > min_distance_km && speed_ms > 0.0 && speed_ms <= max_speed_ms
}
