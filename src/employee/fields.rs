//! Catalogue of employee form fields, their input kinds, and defaults.

/// Options for the 1–5 survey rating selects.
pub const RATING_OPTIONS: &[&str] = &["1", "2", "3", "4", "5"];
pub const STOCK_OPTION_LEVELS: &[&str] = &["0", "1", "2", "3"];
pub const BUSINESS_TRAVEL_OPTIONS: &[&str] = &["Non-Travel", "Travel_Rarely", "Travel_Frequently"];
pub const DEPARTMENT_OPTIONS: &[&str] = &["Research & Development", "Sales", "Human Resources"];
pub const EDUCATION_FIELD_OPTIONS: &[&str] = &[
    "Life Sciences",
    "Medical",
    "Marketing",
    "Technical Degree",
    "Other",
];
pub const GENDER_OPTIONS: &[&str] = &["Male", "Female"];
pub const JOB_ROLE_OPTIONS: &[&str] = &[
    "Research Scientist",
    "Laboratory Technician",
    "Sales Executive",
    "Manager",
];
pub const MARITAL_STATUS_OPTIONS: &[&str] = &["Single", "Married", "Divorced"];
pub const OVER18_OPTIONS: &[&str] = &["Y", "N"];
pub const OVER_TIME_OPTIONS: &[&str] = &["No", "Yes"];

/// How a field is entered and normalized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Free numeric text; empty means absent. `range` is inclusive.
    Number { range: Option<(u32, u32)> },
    /// Select whose options are integers; sent as a number.
    NumberChoice(&'static [&'static str]),
    /// Select over a fixed text vocabulary; sent as a string.
    Choice(&'static [&'static str]),
}

impl FieldKind {
    pub fn is_numeric(self) -> bool {
        !matches!(self, Self::Choice(_))
    }

    pub fn options(self) -> &'static [&'static str] {
        match self {
            Self::Number { .. } => &[],
            Self::NumberChoice(options) | Self::Choice(options) => options,
        }
    }
}

/// Every attribute the add-employee form collects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EmployeeField {
    Age,
    BusinessTravel,
    DailyRate,
    Department,
    DistanceFromHome,
    Education,
    EducationField,
    EmployeeCount,
    EnvironmentSatisfaction,
    Gender,
    HourlyRate,
    JobInvolvement,
    JobLevel,
    JobRole,
    JobSatisfaction,
    MaritalStatus,
    MonthlyIncome,
    MonthlyRate,
    NumCompaniesWorked,
    Over18,
    OverTime,
    PercentSalaryHike,
    PerformanceRating,
    RelationshipSatisfaction,
    StandardHours,
    StockOptionLevel,
    TotalWorkingYears,
    TrainingTimesLastYear,
    WorkLifeBalance,
    YearsAtCompany,
    YearsInCurrentRole,
    YearsSinceLastPromotion,
    YearsWithCurrManager,
}

impl EmployeeField {
    pub const ALL: [EmployeeField; 33] = [
        Self::Age,
        Self::BusinessTravel,
        Self::DailyRate,
        Self::Department,
        Self::DistanceFromHome,
        Self::Education,
        Self::EducationField,
        Self::EmployeeCount,
        Self::EnvironmentSatisfaction,
        Self::Gender,
        Self::HourlyRate,
        Self::JobInvolvement,
        Self::JobLevel,
        Self::JobRole,
        Self::JobSatisfaction,
        Self::MaritalStatus,
        Self::MonthlyIncome,
        Self::MonthlyRate,
        Self::NumCompaniesWorked,
        Self::Over18,
        Self::OverTime,
        Self::PercentSalaryHike,
        Self::PerformanceRating,
        Self::RelationshipSatisfaction,
        Self::StandardHours,
        Self::StockOptionLevel,
        Self::TotalWorkingYears,
        Self::TrainingTimesLastYear,
        Self::WorkLifeBalance,
        Self::YearsAtCompany,
        Self::YearsInCurrentRole,
        Self::YearsSinceLastPromotion,
        Self::YearsWithCurrManager,
    ];

    /// Backend attribute name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::BusinessTravel => "BusinessTravel",
            Self::DailyRate => "DailyRate",
            Self::Department => "Department",
            Self::DistanceFromHome => "DistanceFromHome",
            Self::Education => "Education",
            Self::EducationField => "EducationField",
            Self::EmployeeCount => "EmployeeCount",
            Self::EnvironmentSatisfaction => "EnvironmentSatisfaction",
            Self::Gender => "Gender",
            Self::HourlyRate => "HourlyRate",
            Self::JobInvolvement => "JobInvolvement",
            Self::JobLevel => "JobLevel",
            Self::JobRole => "JobRole",
            Self::JobSatisfaction => "JobSatisfaction",
            Self::MaritalStatus => "MaritalStatus",
            Self::MonthlyIncome => "MonthlyIncome",
            Self::MonthlyRate => "MonthlyRate",
            Self::NumCompaniesWorked => "NumCompaniesWorked",
            Self::Over18 => "Over18",
            Self::OverTime => "OverTime",
            Self::PercentSalaryHike => "PercentSalaryHike",
            Self::PerformanceRating => "PerformanceRating",
            Self::RelationshipSatisfaction => "RelationshipSatisfaction",
            Self::StandardHours => "StandardHours",
            Self::StockOptionLevel => "StockOptionLevel",
            Self::TotalWorkingYears => "TotalWorkingYears",
            Self::TrainingTimesLastYear => "TrainingTimesLastYear",
            Self::WorkLifeBalance => "WorkLifeBalance",
            Self::YearsAtCompany => "YearsAtCompany",
            Self::YearsInCurrentRole => "YearsInCurrentRole",
            Self::YearsSinceLastPromotion => "YearsSinceLastPromotion",
            Self::YearsWithCurrManager => "YearsWithCurrManager",
        }
    }

    /// Look a field up by its backend name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(name))
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Self::Age => FieldKind::Number {
                range: Some((18, 65)),
            },
            Self::DailyRate
            | Self::DistanceFromHome
            | Self::EmployeeCount
            | Self::HourlyRate
            | Self::MonthlyIncome
            | Self::MonthlyRate
            | Self::NumCompaniesWorked
            | Self::PercentSalaryHike
            | Self::StandardHours
            | Self::TotalWorkingYears
            | Self::TrainingTimesLastYear
            | Self::YearsAtCompany
            | Self::YearsInCurrentRole
            | Self::YearsSinceLastPromotion
            | Self::YearsWithCurrManager => FieldKind::Number { range: None },
            Self::Education
            | Self::EnvironmentSatisfaction
            | Self::JobInvolvement
            | Self::JobLevel
            | Self::JobSatisfaction
            | Self::PerformanceRating
            | Self::RelationshipSatisfaction
            | Self::WorkLifeBalance => FieldKind::NumberChoice(RATING_OPTIONS),
            Self::StockOptionLevel => FieldKind::NumberChoice(STOCK_OPTION_LEVELS),
            Self::BusinessTravel => FieldKind::Choice(BUSINESS_TRAVEL_OPTIONS),
            Self::Department => FieldKind::Choice(DEPARTMENT_OPTIONS),
            Self::EducationField => FieldKind::Choice(EDUCATION_FIELD_OPTIONS),
            Self::Gender => FieldKind::Choice(GENDER_OPTIONS),
            Self::JobRole => FieldKind::Choice(JOB_ROLE_OPTIONS),
            Self::MaritalStatus => FieldKind::Choice(MARITAL_STATUS_OPTIONS),
            Self::Over18 => FieldKind::Choice(OVER18_OPTIONS),
            Self::OverTime => FieldKind::Choice(OVER_TIME_OPTIONS),
        }
    }

    /// Value a fresh form starts with.
    pub fn default_value(self) -> &'static str {
        match self {
            Self::BusinessTravel => "Non-Travel",
            Self::Department => "Research & Development",
            Self::EducationField => "Life Sciences",
            Self::Gender => "Male",
            Self::JobRole => "Research Scientist",
            Self::MaritalStatus => "Single",
            Self::Over18 => "Y",
            Self::OverTime => "No",
            Self::EmployeeCount => "1",
            Self::PerformanceRating => "3",
            Self::StandardHours => "80",
            Self::StockOptionLevel | Self::TrainingTimesLastYear => "0",
            Self::Education
            | Self::EnvironmentSatisfaction
            | Self::JobInvolvement
            | Self::JobLevel
            | Self::JobSatisfaction
            | Self::RelationshipSatisfaction
            | Self::WorkLifeBalance => "1",
            _ => "",
        }
    }
}

impl std::fmt::Display for EmployeeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
