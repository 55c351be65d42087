// core/src/session.rs
// Forgrunnskonsumenten: eier akkumulatoren i minne-autoritativ modus pluss
// 1 Hz-tickeren for visning av forløpt tid. Tickeren er rent kosmetisk –
// distanse/kalorier oppdateres av posisjons-callbacks, ikke av klokka.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::accumulator::{RunAccumulator, RunError, RunSnapshot};
use crate::clock::Clock;
use crate::models::{RunConfig, RunnerProfile, TrackPoint};
use crate::storage::RunStateStore;
use crate::sync::{RunUpdate, RunUploader};
use crate::telemetry::TelemetrySink;
use crate::types::RunSummary;
use crate::{decimation, metrics};

/// Periodisk tick-signal for UI-tid. Kanselleres deterministisk via `stop()`
/// og senest i `Drop`, så tråden aldri lever videre etter unmount.
pub struct Ticker {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn start(period: Duration) -> (Self, Receiver<u64>) {
        let stop = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::channel();
        let flag = Arc::clone(&stop);
        let handle = std::thread::spawn(move || {
            let mut tick = 0u64;
            loop {
                std::thread::sleep(period);
                if flag.load(Ordering::Relaxed) {
                    break;
                }
                tick += 1;
                // mottaker borte -> avslutt stille
                if tx.send(tick).is_err() {
                    break;
                }
            }
        });
        (
            Self {
                stop,
                handle: Some(handle),
            },
            rx,
        )
    }

    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

pub struct ForegroundSession<S: RunStateStore, C: Clock> {
    acc: RunAccumulator<S, C>,
    telemetry: Arc<dyn TelemetrySink>,
    cfg: RunConfig,
    ticker: Option<Ticker>,
    tick_period: Duration,
}

impl<S: RunStateStore, C: Clock> ForegroundSession<S, C> {
    pub fn new(
        store: S,
        clock: C,
        profile: RunnerProfile,
        cfg: RunConfig,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        let acc = RunAccumulator::foreground(
            store,
            clock,
            profile,
            cfg.clone(),
            Arc::clone(&telemetry),
        );
        Self {
            acc,
            telemetry,
            cfg,
            ticker: None,
            tick_period: Duration::from_secs(1),
        }
    }

    /// Kortere tick-periode i tester.
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    /// Starter økta og tick-kanalen UI-laget lytter på.
    pub fn start_run(&mut self) -> Result<Receiver<u64>, RunError> {
        self.acc.start()?;
        let (ticker, rx) = Ticker::start(self.tick_period);
        self.ticker = Some(ticker);
        Ok(rx)
    }

    /// Posisjons-callback fra verten; kan levere flere fixes per invokasjon.
    pub fn on_location(&mut self, fixes: &[crate::location::LocationFix]) -> Result<Option<RunSnapshot>, RunError> {
        self.acc.on_batch(fixes)
    }

    /// Rå payload-variant av posisjons-callbacken (samme leveranseformat som
    /// bakgrunnsoppgaven). Et plattform-feilobjekt gir `RunError::Sensor` og
    /// lar tilstanden stå urørt.
    pub fn on_location_payload(&mut self, raw: &str) -> Result<Option<RunSnapshot>, RunError> {
        let fixes = crate::location::parse_payload(raw)?;
        self.on_location(&fixes)
    }

    /// Live-tall for UI (distanse/kalorier/forløpt tid).
    pub fn live(&self) -> Option<RunSnapshot> {
        self.acc.snapshot()
    }

    /// Drenerer sync-batchen og poster den med kumulative totaler. En feilet
    /// opplasting re-køes; punktene går ikke tapt for neste flush.
    pub fn flush_to(&mut self, uploader: &dyn RunUploader) -> Result<usize, RunError> {
        let batch = self.acc.take_sync_batch()?;
        if batch.is_empty() {
            return Ok(0);
        }
        let (distance_km, calories) = match self.live() {
            Some(snap) => (snap.distance_km, snap.calories),
            None => (0.0, 0.0),
        };
        let update = RunUpdate {
            distance_km,
            calories,
            route: batch.clone(),
        };
        match uploader.push_update(&update) {
            Ok(()) => Ok(update.route.len()),
            Err(e) => {
                self.telemetry.report(&format!("run update upload failed: {e}"));
                self.acc.requeue_sync_batch(batch)?;
                Ok(0)
            }
        }
    }

    /// Stopp-rekkefølgen er bindende: (a) kanseller tickeren, (b) verten
    /// avslutter posisjons-abonnementet, (c) tøm persistert tilstand. Et
    /// sent sample etter dette treffer NotRunning og ignoreres trygt.
    pub fn stop_run(&mut self) -> Result<RunSummary, RunError> {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.stop();
        }
        let summary = self.acc.stop()?;
        self.telemetry.report(&format!(
            "run finished: {:.2} km, {:.0} kcal, {} s",
            summary.distance_km, summary.calories, summary.duration_sec
        ));
        Ok(summary)
    }

    /// Statisk polylinje for kartvisning av en ferdig økt.
    pub fn polyline_preview(&self, summary: &RunSummary) -> Vec<TrackPoint> {
        decimation::polyline_preview(&summary.route, self.cfg.max_polyline_points)
    }
}

/// Fristilt flush-hjelper for kall utenom en sesjon (f.eks. siste opplasting
/// etter stop, der sammendraget allerede eier batchen).
pub fn upload_final_batch(
    uploader: &dyn RunUploader,
    summary: &RunSummary,
    telemetry: &dyn TelemetrySink,
) -> bool {
    if summary.route_to_send.is_empty() {
        return true;
    }
    let update = RunUpdate {
        distance_km: summary.distance_km,
        calories: summary.calories,
        route: summary.route_to_send.clone(),
    };
    match uploader.push_update(&update) {
        Ok(()) => {
            metrics::sync_batches_total(metrics::global()).inc();
            true
        }
        Err(e) => {
            telemetry.report(&format!("final run upload failed: {e}"));
            false
        }
    }
}
