use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Kanoniske terskler (bakgrunnsvarianten er fasit, se DESIGN.md)
pub const MIN_SEGMENT_KM: f64 = 0.001; // min. inkrementell distanse for kcal-akkumulering (km)
pub const MAX_SPEED_MS: f64 = 13.0; // øvre fartsgrense mot GPS-spikes (m/s), ≈46.8 km/t
pub const SYNC_THRESHOLD_KM: f64 = 0.02; // batch-terskel for route_to_send (km)
pub const DEFAULT_WEIGHT_KG: f64 = 75.0; // fallback-vekt når profil mangler (kg)
pub const MAX_POLYLINE_POINTS: usize = 23; // maks punkter i statisk polylinje-preview

/// Ett akseptert GPS-punkt i ruta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackPoint {
    pub latitude: f64,  // grader (WGS-84)
    pub longitude: f64, // grader (WGS-84)
    pub speed: f64,     // m/s, normalisert >= 0
    pub timestamp: DateTime<Utc>,
    /// Inkrementell distanse (km) mot forrige *lagrede* punkt, 0 for første.
    pub distance: f64,
}

/// Lettvekts posisjon brukt kun til delta-beregning, ikke replay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunnerProfile {
    pub weight_kg: Option<f64>,
}

impl RunnerProfile {
    /// Vekt med fallback fra konfigurasjonen.
    pub fn weight_or(&self, fallback_kg: f64) -> f64 {
        match self.weight_kg {
            Some(w) if w.is_finite() && w > 0.0 => w,
            _ => fallback_kg,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub min_distance_km: f64,
    pub max_speed_ms: f64,
    pub sync_threshold_km: f64,
    pub default_weight_kg: f64,
    pub max_polyline_points: usize,
    /// Navneromsnøkkel for den aktive øktens tilstand i key-value-lageret.
    pub storage_key: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            min_distance_km: MIN_SEGMENT_KM,
            max_speed_ms: MAX_SPEED_MS,
            sync_threshold_km: SYNC_THRESHOLD_KM,
            default_weight_kg: DEFAULT_WEIGHT_KG,
            max_polyline_points: MAX_POLYLINE_POINTS,
            storage_key: "active_run".to_string(),
        }
    }
}
