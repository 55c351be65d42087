// core/src/sync.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ureq::Agent;

use crate::models::TrackPoint;

/// Periodisk oppdatering mot backendens run-update-endepunkt: drenert
/// sync-batch pluss kumulative totaler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunUpdate {
    pub distance_km: f64,
    pub calories: f64,
    pub route: Vec<TrackPoint>,
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("run update request failed: {0}")]
    Request(String),
}

/// Opplasting av run-oppdateringer (prod: HttpRunUploader, test: egen stub).
pub trait RunUploader {
    fn push_update(&self, update: &RunUpdate) -> Result<(), SyncError>;
}

/// Blocking HTTP-klient mot run-update-endepunktet.
pub struct HttpRunUploader {
    agent: Agent,
    endpoint: String,
}

impl HttpRunUploader {
    pub fn new(endpoint: impl Into<String>) -> Self {
        // Enkel agent; ureq bruker rustls når "tls" er aktivert
        let agent = ureq::AgentBuilder::new()
            .timeout(std::time::Duration::from_secs(10))
            .build();
        Self {
            agent,
            endpoint: endpoint.into(),
        }
    }
}

impl RunUploader for HttpRunUploader {
    fn push_update(&self, update: &RunUpdate) -> Result<(), SyncError> {
        self.agent
            .post(&self.endpoint)
            .send_json(update)
            .map_err(|e| SyncError::Request(e.to_string()))?;

        log::debug!(
            target: "rungraph",
            "[RunSync] {} punkter, {:.2} km, {:.0} kcal",
            update.route.len(),
            update.distance_km,
            update.calories
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn update_serialiseres_med_ventede_felter() {
        let update = RunUpdate {
            distance_km: 1.25,
            calories: 88.0,
            route: vec![TrackPoint {
                latitude: 59.91,
                longitude: 10.75,
                speed: 2.5,
                timestamp: Utc::now(),
                distance: 0.02,
            }],
        };
        let v = serde_json::to_value(&update).unwrap();
        assert_eq!(v["distance_km"], 1.25);
        assert_eq!(v["calories"], 88.0);
        assert_eq!(v["route"][0]["speed"], 2.5);
    }
}
