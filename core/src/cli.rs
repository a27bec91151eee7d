use crate::models::Course;

/// Formatterer sekunder som t:mm:ss med fortegn.
pub fn format_time(seconds: f64) -> String {
    let sign = if seconds < 0.0 { "-" } else { "" };
    let total = seconds.abs() as i64;
    let (m, s) = (total / 60, total % 60);
    let (h, m) = (m / 60, m % 60);
    format!("{sign}{h}:{m:02}:{s:02}")
}

pub fn print_course_report(course: &Course) {
    let n = course.points.len();
    let v: Vec<f64> = course
        .points
        .iter()
        .take(5.min(n))
        .map(|p| (p.model_v_kmh * 10.0).round() / 10.0)
        .collect();

    println!("--- Course Report ---");
    println!("Points: {n}");
    println!("Sample v (km/h): {v:?}");
    println!("Distance: {:.1} km", course.distance_km());
    println!("Model time: {}", format_time(course.total_time_s()));
    println!("Mean v: {:.1} km/h", course.mean_v_kmh());
    if !course.corners.is_empty() {
        let names: Vec<&str> = course.corners.iter().map(|c| c.name.as_str()).collect();
        println!("Corners: {}", names.join(" "));
    }
}
