use once_cell::sync::Lazy;
use prometheus::{IntCounter, Registry};

/// Prosessvide tellere for akkumuleringskjernen. Registreres i et eget
/// registry slik at verten kan scrape eller dumpe dem ved behov.
pub struct Metrics {
    pub registry: Registry,
    samples_total: IntCounter,
    persist_failures_total: IntCounter,
    sync_batches_total: IntCounter,
    background_invocations_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let samples_total = IntCounter::new(
            "rungraph_samples_total",
            "Antall aksepterte GPS-punkter foldet inn i tilstanden",
        )
        .expect("gyldig tellernavn");
        let persist_failures_total = IntCounter::new(
            "rungraph_persist_failures_total",
            "Antall feilede lagringsoperasjoner mot key-value-lageret",
        )
        .expect("gyldig tellernavn");
        let sync_batches_total = IntCounter::new(
            "rungraph_sync_batches_total",
            "Antall sync-batcher drenert for opplasting",
        )
        .expect("gyldig tellernavn");
        let background_invocations_total = IntCounter::new(
            "rungraph_background_invocations_total",
            "Antall invokasjoner av bakgrunnsoppgaven",
        )
        .expect("gyldig tellernavn");

        for c in [
            &samples_total,
            &persist_failures_total,
            &sync_batches_total,
            &background_invocations_total,
        ] {
            registry
                .register(Box::new(c.clone()))
                .expect("unik teller i eget registry");
        }

        Self {
            registry,
            samples_total,
            persist_failures_total,
            sync_batches_total,
            background_invocations_total,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL: Lazy<Metrics> = Lazy::new(Metrics::new);

pub fn global() -> &'static Metrics {
    &GLOBAL
}

pub fn samples_total(m: &Metrics) -> &IntCounter {
    &m.samples_total
}

pub fn persist_failures_total(m: &Metrics) -> &IntCounter {
    &m.persist_failures_total
}

pub fn sync_batches_total(m: &Metrics) -> &IntCounter {
    &m.sync_batches_total
}

pub fn background_invocations_total(m: &Metrics) -> &IntCounter {
    &m.background_invocations_total
}
