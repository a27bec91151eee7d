// tests/test_grid.rs
use biketime_core::grid::{GradeBin, PowerModulation, VelocityGrid, HEADING_BIN_DEG};
use biketime_core::models::{Profile, Weather};
use biketime_core::ModelError;

#[test]
fn grid_build_is_deterministic() {
    let profile = Profile::default();
    let weather = Weather {
        wind_ms: 4.0,
        wind_dir_deg: 90.0,
        ..Weather::default()
    };
    let a = VelocityGrid::build(&profile, &weather, PowerModulation::default()).unwrap();
    let b = VelocityGrid::build(&profile, &weather, PowerModulation::default()).unwrap();
    // Eksakt likhet, ikke toleranse: ingen tilfeldighet i byggingen
    assert_eq!(a, b);
}

#[test]
fn grid_is_fully_populated() {
    let profile = Profile::default();
    let weather = Weather::default();
    let grid = VelocityGrid::build(&profile, &weather, PowerModulation::default()).unwrap();

    for i in 0..24 {
        for bin in GradeBin::ALL {
            let v = grid
                .lookup(i as f64 * HEADING_BIN_DEG, bin)
                .expect("oppslag i gyldig binne feilet");
            assert!(v.is_finite(), "celle ({i}, {}) ikke endelig", bin.name());
        }
    }
}

#[test]
fn uphill_bins_are_slower_than_flat() {
    let profile = Profile::default();
    let weather = Weather::default();
    let grid = VelocityGrid::build(&profile, &weather, PowerModulation::default()).unwrap();

    let flat = grid.lookup(0.0, GradeBin::Flat).unwrap();
    let steep_up = grid.lookup(0.0, GradeBin::SteepUp).unwrap();
    let steep_down = grid.lookup(0.0, GradeBin::SteepDown).unwrap();
    assert!(steep_up < flat, "{steep_up} burde være under {flat}");
    assert!(steep_down > flat, "{steep_down} burde være over {flat}");
}

#[test]
fn lookup_rejects_degenerate_heading_bin() {
    let profile = Profile::default();
    let weather = Weather::default();
    let grid = VelocityGrid::build(&profile, &weather, PowerModulation::default()).unwrap();

    for bad in [7.5, 360.0, -15.0, f64::NAN] {
        match grid.lookup(bad, GradeBin::Flat) {
            Err(ModelError::DegenerateBin { .. }) => {}
            other => panic!("forventet DegenerateBin for {bad}, fikk {other:?}"),
        }
    }
}

#[test]
fn heading_bins() {
    assert_eq!(VelocityGrid::heading_bin(14.9), 0.0);
    assert_eq!(VelocityGrid::heading_bin(15.0), 15.0);
    assert_eq!(VelocityGrid::heading_bin(359.9), 345.0);
    assert_eq!(VelocityGrid::heading_bin(0.0), 0.0);
}

#[test]
fn grade_bins_are_monotone() {
    // Under nederste grense: bratteste nedover
    assert_eq!(GradeBin::from_slope_pct(-999.0), GradeBin::SteepDown);
    assert_eq!(GradeBin::from_slope_pct(-1000.0), GradeBin::SteepDown);
    // Over øverste: bratteste oppover
    assert_eq!(GradeBin::from_slope_pct(999.0), GradeBin::SteepUp);
    // Flat dekker (-1, 1]
    assert_eq!(GradeBin::from_slope_pct(0.0), GradeBin::Flat);
    assert_eq!(GradeBin::from_slope_pct(1.0), GradeBin::Flat);
    assert_eq!(GradeBin::from_slope_pct(-1.0), GradeBin::GentleDown);
    assert_eq!(GradeBin::from_slope_pct(1.5), GradeBin::GentleUp);
    assert_eq!(GradeBin::from_slope_pct(-6.5), GradeBin::SteepDown);
    assert_eq!(GradeBin::from_slope_pct(4.5), GradeBin::MajorUp);
}

#[test]
fn grade_bin_representatives() {
    let grades: Vec<f64> = GradeBin::ALL.iter().map(|b| b.grade_pct()).collect();
    assert_eq!(grades, vec![-8.0, -5.0, -3.0, -1.5, 0.0, 1.5, 3.0, 5.0, 8.0]);
}

#[test]
fn modulation_pushes_harder_uphill() {
    let m = PowerModulation::default();
    assert!((m.factor(0.0) - 1.0).abs() < 1e-12);
    assert!(m.factor(8.0) > 1.4);
    assert!(m.factor(-8.0) < 0.6);
}
