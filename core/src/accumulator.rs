// core/src/accumulator.rs
// Tilstandsmaskinen Idle -> Running -> Stopped. Forgrunn og bakgrunn deler
// samme fold-logikk; de skiller seg kun i hvem som eier sannheten:
//   - forgrunn: in-memory-kopien er autoritativ, lageret er best-effort-speil
//   - bakgrunn: lageret er eneste minne mellom invokasjoner

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::clock::Clock;
use crate::location::{LocationFix, PayloadError};
use crate::models::{LatLon, RunConfig, RunnerProfile, TrackPoint};
use crate::storage::{RunStateStore, StorageError};
use crate::telemetry::TelemetrySink;
use crate::types::{RunState, RunSummary};
use crate::{decimation, energy, geo, metrics, summary};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("location source error: {0}")]
    Sensor(String),
    #[error("run state storage failed: {0}")]
    Storage(#[from] StorageError),
    #[error("no active run")]
    NotRunning,
}

impl From<PayloadError> for RunError {
    fn from(e: PayloadError) -> Self {
        RunError::Sensor(e.to_string())
    }
}

/// Øyeblikksbilde for UI-laget. Akkumulatoren sender verdier ut; den kaller
/// aldri tilbake inn i rendering.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RunSnapshot {
    pub distance_km: f64,
    pub calories: f64,
    pub elapsed_sec: i64,
    pub route_len: usize,
    pub pending_sync: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Authority {
    /// Forgrunn: behold autoritativ kopi i prosessen, speil til lageret.
    Memory,
    /// Bakgrunn: les-modifiser-skriv mot lageret på hvert sample.
    Store,
}

pub struct RunAccumulator<S: RunStateStore, C: Clock> {
    store: S,
    clock: C,
    profile: RunnerProfile,
    cfg: RunConfig,
    telemetry: Arc<dyn TelemetrySink>,
    authority: Authority,
    live: Option<RunState>,
}

impl<S: RunStateStore, C: Clock> RunAccumulator<S, C> {
    pub fn foreground(
        store: S,
        clock: C,
        profile: RunnerProfile,
        cfg: RunConfig,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self {
            store,
            clock,
            profile,
            cfg,
            telemetry,
            authority: Authority::Memory,
            live: None,
        }
    }

    pub fn background(
        store: S,
        clock: C,
        profile: RunnerProfile,
        cfg: RunConfig,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self {
            store,
            clock,
            profile,
            cfg,
            telemetry,
            authority: Authority::Store,
            live: None,
        }
    }

    /// Idle -> Running. Nullstiller rute, batch, distanse og kalorier og
    /// setter starttidspunktet én gang.
    pub fn start(&mut self) -> Result<(), RunError> {
        let state = RunState::begin(self.clock.now());
        match self.authority {
            Authority::Memory => {
                if let Err(e) = self.store.save(&state) {
                    self.report_persist_failure("start", &e);
                }
                self.live = Some(state);
                Ok(())
            }
            Authority::Store => {
                self.store.save(&state)?;
                Ok(())
            }
        }
    }

    /// Running -> Running. Folder ett sample inn i tilstanden, i spesifisert
    /// rekkefølge: normaliser fart, delta-distanse, desimering, kalorier,
    /// append, totaler, persist.
    pub fn on_sample(&mut self, fix: &LocationFix) -> Result<RunSnapshot, RunError> {
        match self.authority {
            Authority::Memory => {
                if self.live.is_none() {
                    // rehydrer speilet etter en ev. restart; best-effort
                    match self.store.load() {
                        Ok(state) => self.live = state,
                        Err(e) => self.report_persist_failure("rehydrate", &e),
                    }
                }
                let weight = self.profile.weight_or(self.cfg.default_weight_kg);
                let state = self.live.as_mut().ok_or(RunError::NotRunning)?;
                fold_sample(state, fix, &self.cfg, weight);
                metrics::samples_total(metrics::global()).inc();
                let snap = snapshot_of(state, self.clock.now());
                if let Err(e) = self.store.save(state) {
                    // speilet er best-effort; kopien i minnet er fortsatt fasit
                    self.report_persist_failure("mirror", &e);
                }
                Ok(snap)
            }
            Authority::Store => {
                let mut state = self.store.load()?.ok_or(RunError::NotRunning)?;
                let weight = self.profile.weight_or(self.cfg.default_weight_kg);
                fold_sample(&mut state, fix, &self.cfg, weight);
                metrics::samples_total(metrics::global()).inc();
                let snap = snapshot_of(&state, self.clock.now());
                // uten annet minne er en feilet skriv fatal for dette samplet
                self.store.save(&state)?;
                Ok(snap)
            }
        }
    }

    /// Folder en kø av samples sekvensielt, ett og ett – aldri som én
    /// sammenslått delta. Returnerer siste øyeblikksbilde.
    pub fn on_batch(&mut self, fixes: &[LocationFix]) -> Result<Option<RunSnapshot>, RunError> {
        let mut last = None;
        for fix in fixes {
            last = Some(self.on_sample(fix)?);
        }
        Ok(last)
    }

    /// Running -> Stopped. Produserer sammendraget, tømmer persistert
    /// tilstand og går konseptuelt tilbake til Idle for neste økt.
    pub fn stop(&mut self) -> Result<RunSummary, RunError> {
        let state = match self.authority {
            Authority::Memory => match self.live.take() {
                Some(s) => Some(s),
                None => self.store.load()?,
            },
            Authority::Store => self.store.load()?,
        };
        let state = state.ok_or(RunError::NotRunning)?;

        let summary = summary::summarize(&state, self.clock.now());
        if let Err(e) = self.store.clear() {
            // sammendraget er allerede avledet; en hengende record overskrives
            // av neste start()
            self.report_persist_failure("clear", &e);
        }
        Ok(summary)
    }

    /// Kontrakten mot sync-samarbeidspartneren: "gi meg gjeldende batch og
    /// tøm den". Drenert tilstand persisteres før batchen leveres ut, slik at
    /// et krasj mellom drenering og opplasting ikke kan sende punkter dobbelt.
    pub fn take_sync_batch(&mut self) -> Result<Vec<TrackPoint>, RunError> {
        match self.authority {
            Authority::Memory => {
                let state = self.live.as_mut().ok_or(RunError::NotRunning)?;
                if state.route_to_send.is_empty() {
                    return Ok(Vec::new());
                }
                let batch = std::mem::take(&mut state.route_to_send);
                if let Err(e) = self.store.save(state) {
                    self.report_persist_failure("drain", &e);
                }
                metrics::sync_batches_total(metrics::global()).inc();
                Ok(batch)
            }
            Authority::Store => {
                let mut state = self.store.load()?.ok_or(RunError::NotRunning)?;
                if state.route_to_send.is_empty() {
                    return Ok(Vec::new());
                }
                let batch = std::mem::take(&mut state.route_to_send);
                // feiler skrivingen forblir batchen i lageret – ingen dobbeltsending
                self.store.save(&state)?;
                metrics::sync_batches_total(metrics::global()).inc();
                Ok(batch)
            }
        }
    }

    /// Legger en batch tilbake fremst i køen etter en feilet opplasting.
    pub fn requeue_sync_batch(&mut self, mut batch: Vec<TrackPoint>) -> Result<(), RunError> {
        if batch.is_empty() {
            return Ok(());
        }
        match self.authority {
            Authority::Memory => {
                let state = self.live.as_mut().ok_or(RunError::NotRunning)?;
                batch.append(&mut state.route_to_send);
                state.route_to_send = batch;
                if let Err(e) = self.store.save(state) {
                    self.report_persist_failure("requeue", &e);
                }
                Ok(())
            }
            Authority::Store => {
                let mut state = self.store.load()?.ok_or(RunError::NotRunning)?;
                batch.append(&mut state.route_to_send);
                state.route_to_send = batch;
                self.store.save(&state)?;
                Ok(())
            }
        }
    }

    /// Live-visning for forgrunns-UI. `None` når ingen økt pågår (eller i
    /// bakgrunnsmodus, som ikke holder noen kopi).
    pub fn snapshot(&self) -> Option<RunSnapshot> {
        self.live.as_ref().map(|s| snapshot_of(s, self.clock.now()))
    }

    fn report_persist_failure(&self, op: &str, e: &StorageError) {
        metrics::persist_failures_total(metrics::global()).inc();
        self.telemetry
            .report(&format!("run state persistence failed during {op}: {e}"));
    }
}

/// Selve foldingen, felles for begge konsumenter. Stegene (a)–(f) i fast
/// rekkefølge; persistering (g) eies av kalleren.
fn fold_sample(state: &mut RunState, fix: &LocationFix, cfg: &RunConfig, weight_kg: f64) {
    // (a) fart er normalisert ved grensen; vokt likevel mot rusk
    let speed = if fix.speed.is_finite() && fix.speed > 0.0 {
        fix.speed
    } else {
        0.0
    };

    // (b) delta mot forrige *lagrede* koordinat, 0 for øktas første punkt
    let inc_km = match &state.last_coordinate {
        Some(prev) => geo::distance_km(prev.latitude, prev.longitude, fix.latitude, fix.longitude),
        None => 0.0,
    };

    let point = TrackPoint {
        latitude: fix.latitude,
        longitude: fix.longitude,
        speed,
        timestamp: fix.timestamp,
        distance: inc_km,
    };

    // (c) desimering: terskelkryssing sender *gjeldende* punkt til batchen
    state.sync_acc_km += inc_km;
    if decimation::crosses_sync_threshold(state.sync_acc_km, cfg.sync_threshold_km) {
        state.route_to_send.push(point.clone());
        state.sync_acc_km = 0.0;
    }

    // (d) kalorier, kun innenfor akkumuleringsvinduet
    let elapsed_min = state
        .route
        .last()
        .map(|prev| ((fix.timestamp - prev.timestamp).num_milliseconds() as f64 / 60_000.0).max(0.0))
        .unwrap_or(0.0);
    if energy::within_accrual_band(inc_km, speed, cfg.min_distance_km, cfg.max_speed_ms) {
        state.calories += energy::incremental_kcal(speed, elapsed_min, weight_kg);
    }

    // (e) full oppløsning beholder alle aksepterte punkter
    state.route.push(point);

    // (f) totaler
    state.distance += inc_km;
    state.last_coordinate = Some(LatLon {
        latitude: fix.latitude,
        longitude: fix.longitude,
    });
}

fn snapshot_of(state: &RunState, now: chrono::DateTime<chrono::Utc>) -> RunSnapshot {
    RunSnapshot {
        distance_km: state.distance,
        calories: state.calories,
        elapsed_sec: state.elapsed_seconds(now),
        route_len: state.route.len(),
        pending_sync: state.route_to_send.len(),
    }
}
