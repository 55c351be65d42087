use rungraph_core::{parse_payload, LocationFix, PayloadError};
use serde_json::json;

#[test]
fn test_batch_parses_i_ankomstrekkefolge() {
    let payload = json!({
        "locations": [
            {"coords": {"latitude": 0.0, "longitude": 0.0, "speed": 2.0}, "timestamp": 1_700_000_000_000i64},
            {"coords": {"latitude": 0.0, "longitude": 0.0002, "speed": 2.5}, "timestamp": 1_700_000_001_000i64}
        ]
    });

    let fixes = parse_payload(&payload.to_string()).unwrap();
    assert_eq!(fixes.len(), 2);
    assert_eq!(fixes[0].speed, 2.0);
    assert!(fixes[1].timestamp > fixes[0].timestamp);
}

#[test]
fn test_negativ_og_manglende_fart_normaliseres() {
    let payload = json!({
        "locations": [
            {"coords": {"latitude": 0.0, "longitude": 0.0, "speed": -1.0}, "timestamp": 1_700_000_000_000i64},
            {"coords": {"latitude": 0.0, "longitude": 0.0001}, "timestamp": 1_700_000_001_000i64},
            {"coords": {"latitude": 0.0, "longitude": 0.0002, "speed": null}, "timestamp": 1_700_000_002_000i64}
        ]
    });

    let fixes = parse_payload(&payload.to_string()).unwrap();
    assert_eq!(fixes.len(), 3);
    assert!(fixes.iter().all(|f| f.speed == 0.0));
}

#[test]
fn test_plattformfeil_kortslutter() {
    let payload = json!({
        "error": {"code": 1, "message": "Location provider unavailable"}
    });

    let err = parse_payload(&payload.to_string()).unwrap_err();
    match err {
        PayloadError::Platform(msg) => assert!(msg.contains("Location provider unavailable")),
        other => panic!("uventet feiltype: {other:?}"),
    }
}

#[test]
fn test_dekodefeil_baerer_json_sti() {
    let payload = r#"{"locations":[{"coords":{"latitude":"nord","longitude":10.75},"timestamp":0}]}"#;
    let err = parse_payload(payload).unwrap_err();
    match err {
        PayloadError::Decode(msg) => {
            assert!(msg.contains("coords.latitude"), "msg = {msg}");
        }
        other => panic!("uventet feiltype: {other:?}"),
    }
}

#[test]
fn test_alias_for_koordinatfelter() {
    let payload = json!({
        "locations": [
            {"coords": {"lat": 59.91, "lng": 10.75, "speed": 1.0}, "timestamp": 1_700_000_000_000i64}
        ]
    });
    let fixes = parse_payload(&payload.to_string()).unwrap();
    assert_eq!(fixes[0].latitude, 59.91);
    assert_eq!(fixes[0].longitude, 10.75);
}

#[test]
fn test_anomale_fixes_droppes_uten_aa_felle_batchen() {
    let payload = json!({
        "locations": [
            {"coords": {"latitude": null, "longitude": 10.75}, "timestamp": 1_700_000_000_000i64},
            {"coords": {"latitude": 59.91, "longitude": 10.75, "speed": 1.0}, "timestamp": 1_700_000_001_000i64}
        ]
    });
    // null latitude er en dekodefeil (feltet er påkrevd) – hele payloaden avvises
    assert!(parse_payload(&payload.to_string()).is_err());

    let payload = json!({
        "locations": [
            {"coords": {"latitude": 59.91, "longitude": 10.75, "speed": 1.0}, "timestamp": 1_700_000_001_000i64}
        ]
    });
    assert_eq!(parse_payload(&payload.to_string()).unwrap().len(), 1);
}

#[test]
fn test_from_parts_epoch_til_iso() {
    let fix = LocationFix::from_parts(59.91, 10.75, Some(2.0), 1_700_000_000_000).unwrap();
    // 1700000000000 ms = 2023-11-14T22:13:20Z
    assert!(fix.timestamp.to_rfc3339().starts_with("2023-11-14T22:13:20"));
}

#[test]
fn test_from_parts_avviser_nan() {
    assert!(LocationFix::from_parts(f64::NAN, 10.75, None, 0).is_err());
}
