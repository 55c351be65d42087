// core/src/background.rs
// Bakgrunnsoppgaven: OS-et vekker prosessen kun for denne callbacken, uten
// garanti for delt minne med forrige invokasjon. Alt minne går via lageret,
// og ingen feil får slippe ut – en ukontrollert feil ville fått OS-et til å
// re-invokere en døende handler i det uendelige.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::accumulator::{RunAccumulator, RunError};
use crate::clock::Clock;
use crate::location::{parse_payload, PayloadError};
use crate::models::{RunConfig, RunnerProfile};
use crate::storage::RunStateStore;
use crate::telemetry::TelemetrySink;
use crate::metrics;

/// Hva verten skal gjøre med posisjons-abonnementet etter en invokasjon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskDirective {
    Continue,
    /// Defensiv stopp: ikke la OS-et fortsette å mate en handler som feiler.
    StopSubscription,
}

pub struct BackgroundTask<S: RunStateStore, C: Clock> {
    acc: RunAccumulator<S, C>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl<S: RunStateStore, C: Clock> BackgroundTask<S, C> {
    pub fn new(
        store: S,
        clock: C,
        profile: RunnerProfile,
        cfg: RunConfig,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        let acc =
            RunAccumulator::background(store, clock, profile, cfg, Arc::clone(&telemetry));
        Self { acc, telemetry }
    }

    /// Én OS-invokasjon med rå payload. Panikk-sikker: alt fanges, logges og
    /// oversettes til et direktiv.
    pub fn handle_invocation(&mut self, payload: &str) -> TaskDirective {
        metrics::background_invocations_total(metrics::global()).inc();

        let result = catch_unwind(AssertUnwindSafe(|| self.process(payload)));
        match result {
            Ok(directive) => directive,
            Err(_) => {
                self.telemetry
                    .report("background task panicked; stopping location subscription");
                TaskDirective::StopSubscription
            }
        }
    }

    fn process(&mut self, payload: &str) -> TaskDirective {
        let fixes = match parse_payload(payload) {
            Ok(fixes) => fixes,
            Err(PayloadError::Platform(msg)) => {
                // sensorfeil: hopp over denne invokasjonen, ingen tilstandsendring
                self.telemetry.report(&format!("location error: {msg}"));
                return TaskDirective::Continue;
            }
            Err(PayloadError::Decode(msg)) => {
                // udekodbar payload kommer til å gjenta seg – stopp abonnementet
                self.telemetry
                    .report(&format!("undecodable location payload: {msg}"));
                return TaskDirective::StopSubscription;
            }
        };

        // fold sekvensielt, sample for sample
        for fix in &fixes {
            match self.acc.on_sample(fix) {
                Ok(_) => {}
                Err(RunError::NotRunning) => {
                    // ingen aktiv økt (f.eks. sent sample etter stopp): trygt å ignorere
                    return TaskDirective::Continue;
                }
                Err(RunError::Storage(e)) => {
                    // durabiliteten for dette samplet er tapt; logg og fortsett
                    self.telemetry
                        .report(&format!("background sample not persisted: {e}"));
                }
                Err(e) => {
                    self.telemetry.report(&format!("background sample error: {e}"));
                }
            }
        }
        TaskDirective::Continue
    }
}
