use serde::{Deserialize, Serialize};

/// One employee as exchanged with the backend, in its PascalCase attribute names.
///
/// Numeric attributes are `None` when unknown and serialize as `null`.
/// `EmployeeNumber` and `Attrition` are assigned by the backend and are only
/// present on fetched records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EmployeeRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attrition: Option<String>,
    pub age: Option<u32>,
    pub business_travel: String,
    pub daily_rate: Option<u32>,
    pub department: String,
    pub distance_from_home: Option<u32>,
    pub education: Option<u32>,
    pub education_field: String,
    pub employee_count: Option<u32>,
    pub environment_satisfaction: Option<u32>,
    pub gender: String,
    pub hourly_rate: Option<u32>,
    pub job_involvement: Option<u32>,
    pub job_level: Option<u32>,
    pub job_role: String,
    pub job_satisfaction: Option<u32>,
    pub marital_status: String,
    pub monthly_income: Option<u32>,
    pub monthly_rate: Option<u32>,
    pub num_companies_worked: Option<u32>,
    pub over18: String,
    pub over_time: String,
    pub percent_salary_hike: Option<u32>,
    pub performance_rating: Option<u32>,
    pub relationship_satisfaction: Option<u32>,
    pub standard_hours: Option<u32>,
    pub stock_option_level: Option<u32>,
    pub total_working_years: Option<u32>,
    pub training_times_last_year: Option<u32>,
    pub work_life_balance: Option<u32>,
    pub years_at_company: Option<u32>,
    pub years_in_current_role: Option<u32>,
    pub years_since_last_promotion: Option<u32>,
    pub years_with_curr_manager: Option<u32>,
}

impl EmployeeRecord {
    /// Copy without the backend-assigned identity, as sent when creating an employee.
    pub fn without_identity(&self) -> Self {
        Self {
            employee_number: None,
            attrition: None,
            ..self.clone()
        }
    }
}
