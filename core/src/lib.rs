pub mod cli;
pub mod corners;
pub mod course;
pub mod errors;
pub mod grid;
pub mod metrics;
pub mod models;
pub mod physics;
pub mod session;
pub mod smoothing;
pub mod storage;
pub mod weather;
pub mod weather_api;

#[cfg(feature = "python")]
pub mod py;

pub use corners::{adjusted_time_s, default_corners, interp_velocity, run_corners, Adjustment, Corner};
pub use course::{apply_grid, load_course, model_course, CourseConfig};
pub use errors::ModelError;
pub use grid::{GradeBin, PowerModulation, VelocityGrid};
pub use models::{CornerColumn, Course, CoursePoint, Profile, TrackPoint, Weather};
pub use physics::{air_density, sigmoid, solve_speed};
pub use session::{model_session, SessionInputs, SessionOutputs};
pub use storage::{load_profile, save_profile};

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn biketime_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py::solve_speed, m)?)?;
    m.add_function(wrap_pyfunction!(py::model_course_json, m)?)?;
    Ok(())
}
