// tests/test_storage.rs
use biketime_core::{load_profile, save_profile, Profile};
use std::fs;

#[test]
fn profile_roundtrip() {
    let path = "tests/tmp_profile.json";

    // Sørg for ren start (slett hvis filen finnes)
    let _ = fs::remove_file(path);

    let profile = Profile {
        power_w: 320.0,
        rider_mass_kg: 73.0,
        cd: 0.5,
        frontal_area_m2: 0.5,
        crr: 0.004,
        ..Profile::default()
    };

    save_profile(&profile, path).expect("save_profile feilet");
    let loaded = load_profile(path).expect("load_profile feilet");

    assert_eq!(loaded.power_w, 320.0);
    assert_eq!(loaded.rider_mass_kg, 73.0);
    assert_eq!(loaded.cd, 0.5);
    assert_eq!(loaded.crr, 0.004);
    assert_eq!(loaded.bike_mass_kg, profile.bike_mass_kg);

    let _ = fs::remove_file(path);
}

#[test]
fn missing_file_yields_default_rig() {
    let loaded = load_profile("tests/finnes_ikke.json").expect("skulle gitt default");
    assert_eq!(loaded.power_w, Profile::default().power_w);
    assert_eq!(loaded.total_mass_kg(), Profile::default().total_mass_kg());
}

#[test]
fn invalid_json_reports_field_path() {
    let path = "tests/tmp_invalid_profile.json";
    fs::write(path, r#"{"power_w": "mye", "rider_mass_kg": 74.0}"#).unwrap();

    let err = load_profile(path).expect_err("ugyldig JSON skulle feilet");
    assert!(
        err.to_string().contains("power_w"),
        "feilen burde peke på feltet: {err}"
    );

    let _ = fs::remove_file(path);
}
