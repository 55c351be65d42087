// core/src/location.rs
// Tolerant parsing av rå posisjons-payloads fra vertsplattformen. Verten
// leverer enten `{"locations": [...]}` eller et plattform-feilobjekt i
// stedet for data – feilobjektet skal kortslutte hele invokasjonen uten at
// tilstanden røres.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayloadError {
    /// Plattformen rapporterte en sensorfeil i stedet for posisjoner.
    #[error("location provider error: {0}")]
    Platform(String),
    /// Payloaden lot seg ikke dekode (med sti fra serde_path_to_error).
    #[error("undecodable location payload: {0}")]
    Decode(String),
}

/// Ett normalisert GPS-fix klart for akkumulatoren: endelige koordinater,
/// fart ≥ 0, tidsstempel som UTC-instant.
#[derive(Debug, Clone, Copy)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64, // m/s, aldri negativ
    pub timestamp: DateTime<Utc>,
}

impl LocationFix {
    /// Bygger et fix fra løse deler (forgrunns-callbacken leverer ett og ett).
    /// Negativ/manglende fart normaliseres til 0.
    pub fn from_parts(
        latitude: f64,
        longitude: f64,
        speed: Option<f64>,
        epoch_ms: i64,
    ) -> Result<Self, PayloadError> {
        if !(latitude.is_finite() && longitude.is_finite()) {
            return Err(PayloadError::Decode(format!(
                "ikke-endelige koordinater ({latitude}, {longitude})"
            )));
        }
        let timestamp = Utc
            .timestamp_millis_opt(epoch_ms)
            .single()
            .ok_or_else(|| PayloadError::Decode(format!("tidsstempel {epoch_ms} utenfor gyldig område")))?;
        Ok(Self {
            latitude,
            longitude,
            speed: normalize_speed(speed),
            timestamp,
        })
    }
}

/// Negativ, NaN eller manglende fart -> 0 (sensoren kan levere -1 uten fix).
#[inline]
pub fn normalize_speed(speed: Option<f64>) -> f64 {
    match speed {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

// Tolerant inngangsrepresentasjon – aksepter aliasene verten faktisk sender.
#[derive(Debug, Deserialize)]
struct RawPayload {
    #[serde(default)]
    locations: Vec<RawLocation>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawLocation {
    coords: RawCoords,
    // epoch-millis; verten sender både heltall og flyttall
    timestamp: f64,
}

#[derive(Debug, Deserialize)]
struct RawCoords {
    #[serde(alias = "lat")]
    latitude: f64,
    #[serde(alias = "lon", alias = "lng")]
    longitude: f64,
    #[serde(default)]
    speed: Option<f64>,
}

/// Parser en hel bakgrunns-payload til normaliserte fixes, i ankomstrekkefølge.
/// Et plattform-feilobjekt gir `PayloadError::Platform`; dekodefeil bærer
/// JSON-stien til feltet som feilet.
pub fn parse_payload(raw: &str) -> Result<Vec<LocationFix>, PayloadError> {
    let de = &mut serde_json::Deserializer::from_str(raw);
    let payload: RawPayload = serde_path_to_error::deserialize(de)
        .map_err(|e| PayloadError::Decode(format!("{}: {}", e.path(), e.inner())))?;

    if let Some(err) = payload.error {
        return Err(PayloadError::Platform(err.to_string()));
    }

    let mut fixes = Vec::with_capacity(payload.locations.len());
    for loc in payload.locations {
        if !(loc.coords.latitude.is_finite() && loc.coords.longitude.is_finite()) {
            // anomal fix: dropp punktet, behold resten av batchen
            log::warn!(target: "rungraph", "dropper fix med ikke-endelige koordinater");
            continue;
        }
        if !loc.timestamp.is_finite() {
            log::warn!(target: "rungraph", "dropper fix med ugyldig tidsstempel");
            continue;
        }
        let timestamp = Utc
            .timestamp_millis_opt(loc.timestamp as i64)
            .single()
            .ok_or_else(|| {
                PayloadError::Decode(format!("tidsstempel {} utenfor gyldig område", loc.timestamp))
            })?;
        fixes.push(LocationFix {
            latitude: loc.coords.latitude,
            longitude: loc.coords.longitude,
            speed: normalize_speed(loc.coords.speed),
            timestamp,
        });
    }
    Ok(fixes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negativ_fart_normaliseres() {
        assert_eq!(normalize_speed(Some(-1.0)), 0.0);
        assert_eq!(normalize_speed(None), 0.0);
        assert_eq!(normalize_speed(Some(2.5)), 2.5);
    }
}
