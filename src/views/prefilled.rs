use crate::api::{ApiClient, PrefilledEmployee};

use super::View;
use super::jobs::ViewJobs;

/// List of employees already in the backend dataset.
///
/// `employees` stays `None` when the backend could not be reached.
pub struct PrefilledView {
    api: ApiClient,
    employees: Option<Vec<PrefilledEmployee>>,
    loaded: bool,
    jobs: ViewJobs<Option<Vec<PrefilledEmployee>>>,
}

impl PrefilledView {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            employees: None,
            loaded: false,
            jobs: ViewJobs::new(),
        }
    }

    pub fn employees(&self) -> Option<&[PrefilledEmployee]> {
        self.employees.as_deref()
    }

    /// Whether the activation fetch has finished, successfully or not.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Route of the details view for one listed employee.
    pub fn details_path(employee: &PrefilledEmployee) -> String {
        format!(
            "/prediction/prefilled-predictions/{}",
            employee.employee_number
        )
    }
}

impl View for PrefilledView {
    fn activate(&mut self) {
        if self.jobs.pending() > 0 {
            return;
        }
        let api = self.api.clone();
        self.jobs.spawn(move || api.list_prefilled_employees());
    }

    fn poll(&mut self) -> bool {
        let Some(employees) = self.jobs.drain().pop() else {
            return false;
        };
        self.employees = employees;
        self.loaded = true;
        true
    }

    fn is_busy(&self) -> bool {
        self.jobs.pending() > 0
    }

    fn teardown(&mut self) {
        self.jobs.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_path_targets_employee_route() {
        let employee = PrefilledEmployee {
            employee_number: 1451,
        };
        assert_eq!(
            PrefilledView::details_path(&employee),
            "/prediction/prefilled-predictions/1451"
        );
    }
}
