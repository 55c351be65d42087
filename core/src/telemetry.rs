use std::sync::{Arc, Mutex};

/// Fire-and-forget loggskipning (prod: LogTelemetry, test: RecordingTelemetry).
/// Kjernen rapporterer bakgrunnsfeil og livssyklushendelser hit; et kall skal
/// aldri kunne feile tilbake inn i akkumuleringen.
pub trait TelemetrySink: Send + Sync {
    fn report(&self, message: &str);
}

/// Produksjonssink via `log`-fasaden. Verten kobler på sin egen logger.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTelemetry;

impl TelemetrySink for LogTelemetry {
    fn report(&self, message: &str) {
        log::warn!(target: "rungraph", "{message}");
    }
}

/// Test-sink som samler meldingene for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingTelemetry {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
