pub mod accumulator;
pub mod background;
pub mod clock;
pub mod decimation;
pub mod energy;
pub mod geo;
pub mod location;
pub mod metrics;
pub mod models;
pub mod report;
pub mod session;
pub mod storage;
pub mod summary;
pub mod sync;
pub mod telemetry;
pub mod types;

pub use accumulator::{RunAccumulator, RunError, RunSnapshot};
pub use background::{BackgroundTask, TaskDirective};
pub use clock::{Clock, FixedClock, SystemClock};
pub use decimation::{crosses_sync_threshold, polyline_preview};
pub use energy::{incremental_kcal, met_for_speed, within_accrual_band};
pub use geo::{distance_km, RoundTo};
pub use location::{parse_payload, LocationFix, PayloadError};
pub use models::{LatLon, RunConfig, RunnerProfile, TrackPoint};
pub use report::print_run_report;
pub use session::{upload_final_batch, ForegroundSession, Ticker};
pub use storage::{FileStore, MemoryStore, RunStateStore, StorageError};
pub use summary::summarize;
pub use sync::{HttpRunUploader, RunUpdate, RunUploader, SyncError};
pub use telemetry::{LogTelemetry, RecordingTelemetry, TelemetrySink};
pub use types::{RunState, RunSummary};
