//! View controllers holding the state a front end renders.
//!
//! A view is activated once when shown, which starts its fetches on
//! background workers. The owner calls [`View::poll`] to apply finished
//! results and [`View::teardown`] when the view goes away; results of work
//! still running at teardown are dropped.

pub mod add_employee;
pub mod employee_details;
mod jobs;
pub mod prefilled;
pub mod route;
pub mod session;
pub mod training;

use std::time::{Duration, Instant};

pub use add_employee::AddEmployeeView;
pub use employee_details::{EmployeeDetailsView, PredictionOutcome};
pub use prefilled::PrefilledView;
pub use route::{ActiveView, App, Route, RouteError};
pub use session::{LoginError, Session};
pub use training::{FEATURE_OPTIONS, TrainingFormError, TrainingOutcome, TrainingView};

const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Lifecycle shared by every view controller.
pub trait View {
    /// Start the fetches the view needs when it is shown.
    fn activate(&mut self);
    /// Apply finished background results. Returns true when state changed.
    fn poll(&mut self) -> bool;
    /// Whether any request started by this view is still running.
    fn is_busy(&self) -> bool;
    /// Stop delivering results to this view.
    fn teardown(&mut self);
}

/// Poll `view` until no request is running. Returns false on timeout.
pub fn wait_until_idle<V: View + ?Sized>(view: &mut V, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        view.poll();
        if !view.is_busy() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        std::thread::sleep(IDLE_POLL_INTERVAL);
    }
}
