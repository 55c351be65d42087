use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{LatLon, TrackPoint};

/// Persistert tilstand for én pågående økt. Dette er eneste sannhetskilde
/// mellom bakgrunns-callbacks; prosessen kan dø mellom to samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    /// Full oppløsning, append-only. Hvert akseptert punkt.
    pub route: Vec<TrackPoint>,
    /// Desimert delmengde i kø for server-sync. Tømmes uavhengig av `route`.
    pub route_to_send: Vec<TrackPoint>,
    /// Kumulativ distanse (km), monotont ikke-avtagende.
    pub distance: f64,
    /// Kumulative kalorier (kcal), monotont ikke-avtagende.
    pub calories: f64,
    /// Siste aksepterte posisjon, kun for delta-beregning.
    pub last_coordinate: Option<LatLon>,
    /// Settes én gang ved start, deretter read-only.
    pub start_time: DateTime<Utc>,
    /// Akkumulert distanse (km) siden forrige sync-punkt (desimeringsteller).
    /// Persistert felt, aldri modul-global.
    pub sync_acc_km: f64,
}

impl RunState {
    /// Tom starttilstand for en ny økt.
    pub fn begin(start_time: DateTime<Utc>) -> Self {
        Self {
            route: Vec::new(),
            route_to_send: Vec::new(),
            distance: 0.0,
            calories: 0.0,
            last_coordinate: None,
            start_time,
            sync_acc_km: 0.0,
        }
    }

    /// Avledet: sekunder siden start. Aldri negativ.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> i64 {
        (now - self.start_time).num_seconds().max(0)
    }
}

/// Sammendrag produsert ved stopp. Avledet, immutabelt, persisteres ikke.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub duration_sec: i64,
    pub distance_km: f64,
    pub calories: f64,
    pub min_speed_ms: Option<f64>,
    pub avg_speed_ms: Option<f64>,
    pub max_speed_ms: Option<f64>,
    /// Full rute for lokal visning/eksport.
    pub route: Vec<TrackPoint>,
    /// Gjenstående sync-batch for siste opplasting.
    pub route_to_send: Vec<TrackPoint>,
}
