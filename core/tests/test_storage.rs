use chrono::{TimeZone, Utc};
use rungraph_core::{FileStore, LatLon, MemoryStore, RunState, RunStateStore, TrackPoint};

fn sample_state() -> RunState {
    let t0 = Utc.timestamp_millis_opt(1_700_000_000_000).single().unwrap();
    let mut state = RunState::begin(t0);
    state.route.push(TrackPoint {
        latitude: 59.91,
        longitude: 10.75,
        speed: 2.5,
        timestamp: t0,
        distance: 0.0,
    });
    state.distance = 1.25;
    state.calories = 88.5;
    state.sync_acc_km = 0.013;
    state.last_coordinate = Some(LatLon {
        latitude: 59.91,
        longitude: 10.75,
    });
    state
}

#[test]
fn test_lagre_og_lese_tilbake() {
    let store = FileStore::new("tests", "tmp_run_state");

    let state = sample_state();
    store.save(&state).expect("kunne ikke lagre tilstand");

    let loaded = store
        .load()
        .expect("kunne ikke lese tilstand")
        .expect("tilstand mangler");

    assert_eq!(loaded.route.len(), 1);
    assert_eq!(loaded.distance, 1.25);
    assert_eq!(loaded.calories, 88.5);
    assert_eq!(loaded.sync_acc_km, 0.013);
    assert_eq!(loaded.start_time, state.start_time);
    assert_eq!(
        loaded.last_coordinate,
        Some(LatLon {
            latitude: 59.91,
            longitude: 10.75
        })
    );

    // rydde opp
    store.clear().ok();
}

#[test]
fn test_manglende_fil_gir_none() {
    let store = FileStore::new("tests", "tmp_finnes_ikke");
    assert!(store.load().unwrap().is_none());
}

#[test]
fn test_clear_er_idempotent() {
    let store = FileStore::new("tests", "tmp_clear_state");
    store.save(&sample_state()).unwrap();
    store.clear().unwrap();
    assert!(store.load().unwrap().is_none());
    // clear på allerede tom nøkkel er ok
    store.clear().unwrap();
}

#[test]
fn test_memory_store_deler_record_ved_clone() {
    let a = MemoryStore::new();
    let b = a.clone();
    a.save(&sample_state()).unwrap();
    assert!(b.load().unwrap().is_some());
    b.clear().unwrap();
    assert!(a.load().unwrap().is_none());
}

#[test]
fn test_memory_store_feilmodus() {
    let store = MemoryStore::new();
    store.save(&sample_state()).unwrap();
    store.set_failing(true);
    assert!(store.load().is_err());
    assert!(store.save(&sample_state()).is_err());
    store.set_failing(false);
    assert!(store.load().unwrap().is_some()); // recorden overlevde feilmodus
}
