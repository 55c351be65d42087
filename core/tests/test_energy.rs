use rungraph_core::energy::{incremental_kcal, met_for_speed, within_accrual_band};
use rungraph_core::models::{MAX_SPEED_MS, MIN_SEGMENT_KM};

#[test]
fn test_stillstand_gir_null_uansett_tid() {
    assert_eq!(incremental_kcal(0.0, 1.0, 75.0), 0.0);
    assert_eq!(incremental_kcal(0.0, 120.0, 75.0), 0.0);
    assert_eq!(incremental_kcal(-1.0, 1.0, 75.0), 0.0);
}

#[test]
fn test_formelverdi() {
    // MET = 1 + 1.7145·2 = 4.429; kcal = 4.429·3.5·75/200 · 1 min = 5.8130625
    let kcal = incremental_kcal(2.0, 1.0, 75.0);
    assert!((kcal - 5.8130625).abs() < 1e-9, "kcal = {kcal}");
}

#[test]
fn test_met_er_lineaer_i_fart() {
    assert!((met_for_speed(0.0) - 1.0).abs() < 1e-12);
    assert!((met_for_speed(2.0) - 4.429).abs() < 1e-12);
}

#[test]
fn test_degenerert_input_gir_null() {
    assert_eq!(incremental_kcal(f64::NAN, 1.0, 75.0), 0.0);
    assert_eq!(incremental_kcal(2.0, -0.5, 75.0), 0.0);
    assert_eq!(incremental_kcal(2.0, 1.0, 0.0), 0.0);
}

#[test]
fn test_akkumuleringsvindu() {
    // for kort segment
    assert!(!within_accrual_band(0.0005, 2.0, MIN_SEGMENT_KM, MAX_SPEED_MS));
    // GPS-spike over taket
    assert!(!within_accrual_band(0.02, 14.0, MIN_SEGMENT_KM, MAX_SPEED_MS));
    // stillstand
    assert!(!within_accrual_band(0.02, 0.0, MIN_SEGMENT_KM, MAX_SPEED_MS));
    // normalt løpesteg
    assert!(within_accrual_band(0.02, 2.0, MIN_SEGMENT_KM, MAX_SPEED_MS));
    // nøyaktig på taket teller
    assert!(within_accrual_band(0.02, 13.0, MIN_SEGMENT_KM, MAX_SPEED_MS));
}
