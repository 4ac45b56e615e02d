use crate::api::{AddEmployeeResponse, ApiClient, ApiError};
use crate::employee::{DraftError, EmployeeDraft, EmployeeField};

use super::View;
use super::jobs::ViewJobs;

/// Form for creating a new employee record.
pub struct AddEmployeeView {
    api: ApiClient,
    draft: EmployeeDraft,
    message: Option<String>,
    last_added: Option<u32>,
    submitting: bool,
    jobs: ViewJobs<Result<AddEmployeeResponse, ApiError>>,
}

impl AddEmployeeView {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            draft: EmployeeDraft::default(),
            message: None,
            last_added: None,
            submitting: false,
            jobs: ViewJobs::new(),
        }
    }

    pub fn draft(&self) -> &EmployeeDraft {
        &self.draft
    }

    pub fn set_field(&mut self, field: EmployeeField, value: &str) -> Result<(), DraftError> {
        self.draft.set(field, value)
    }

    pub fn set_field_by_name(&mut self, name: &str, value: &str) -> Result<(), DraftError> {
        self.draft.set_by_name(name, value)
    }

    /// Status line shown under the form.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Number assigned to the most recently created employee.
    pub fn last_added(&self) -> Option<u32> {
        self.last_added
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Normalize the draft and send it. Returns false if nothing was sent.
    pub fn submit(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        let record = match self.draft.normalize() {
            Ok(record) => record,
            Err(err) => {
                self.message = Some(format!("Error: {err}"));
                return false;
            }
        };
        self.message = None;
        self.submitting = true;
        let api = self.api.clone();
        self.jobs.spawn(move || api.submit_new_employee(&record));
        true
    }
}

impl View for AddEmployeeView {
    fn activate(&mut self) {}

    fn poll(&mut self) -> bool {
        let Some(result) = self.jobs.drain().pop() else {
            return false;
        };
        self.submitting = false;
        match result {
            Ok(response) => {
                self.message = Some(format!(
                    "Employee added successfully with number: {}",
                    response.employee_number
                ));
                self.last_added = Some(response.employee_number);
                self.draft.reset();
            }
            Err(err) => self.message = Some(format!("Error: {err}")),
        }
        true
    }

    fn is_busy(&self) -> bool {
        self.jobs.pending() > 0
    }

    fn teardown(&mut self) {
        self.jobs.cancel();
        self.submitting = false;
    }
}
