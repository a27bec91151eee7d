// tests/test_cli.rs
use biketime_core::cli::format_time;

#[test]
fn format_time_basics() {
    assert_eq!(format_time(0.0), "0:00:00");
    assert_eq!(format_time(61.0), "0:01:01");
    assert_eq!(format_time(3661.0), "1:01:01");
}

#[test]
fn format_time_is_sign_aware() {
    assert_eq!(format_time(-5.0), "-0:00:05");
    assert_eq!(format_time(-3600.0), "-1:00:00");
}
