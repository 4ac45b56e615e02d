//! Employee records and the add-employee form that produces them.

mod draft;
mod fields;
mod record;

pub use draft::{DraftError, EmployeeDraft};
pub use fields::{
    BUSINESS_TRAVEL_OPTIONS, DEPARTMENT_OPTIONS, EDUCATION_FIELD_OPTIONS, EmployeeField,
    FieldKind, GENDER_OPTIONS, JOB_ROLE_OPTIONS, MARITAL_STATUS_OPTIONS, OVER_TIME_OPTIONS,
    OVER18_OPTIONS, RATING_OPTIONS, STOCK_OPTION_LEVELS,
};
pub use record::EmployeeRecord;
