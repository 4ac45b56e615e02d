//! Plain-text rendering of backend payloads for the command line.

use std::fmt::Write;

use crate::api::{Metrics, ModelDetails, ModelSummary, PredictionResult, TrainingResult};
use crate::employee::EmployeeRecord;

const SHORT_ID_LEN: usize = 8;

/// First eight characters of a model id followed by an ellipsis.
pub fn short_model_id(model_id: &str) -> String {
    let short: String = model_id.chars().take(SHORT_ID_LEN).collect();
    format!("{short}...")
}

/// Registry table row: short id, creation time, accuracy and feature count.
pub fn model_row(model: &ModelSummary) -> String {
    format!(
        "{:<11}  {:<19}  {:.4}  {} features",
        short_model_id(&model.model_id),
        display_timestamp(&model.timestamp),
        model.metrics.accuracy,
        model.features.len()
    )
}

/// Label used when picking a model for a prediction.
pub fn model_choice_label(model: &ModelSummary) -> String {
    let date = model.timestamp.split('T').next().unwrap_or_default();
    format!(
        "Model ({date}) - Acc: {:.1}%",
        model.metrics.accuracy * 100.0
    )
}

pub fn metrics_lines(metrics: &Metrics) -> Vec<String> {
    vec![
        format!("Accuracy: {:.4}", metrics.accuracy),
        format!("Precision: {:.4}", metrics.precision),
        format!("Recall: {:.4}", metrics.recall),
        format!("F1 Score: {:.4}", metrics.f1_score),
    ]
}

pub fn training_result_lines(result: &TrainingResult) -> Vec<String> {
    let mut lines = Vec::with_capacity(6);
    if let Some(message) = &result.message {
        lines.push(message.clone());
    }
    lines.push(format!("Model ID: {}", result.model_id));
    lines.extend(metrics_lines(&result.metrics));
    lines
}

pub fn model_details_lines(details: &ModelDetails) -> Vec<String> {
    let mut lines = vec![format!("Model ID: {}", details.model_id)];
    if let Some(timestamp) = &details.timestamp {
        lines.push(format!("Created: {}", display_timestamp(timestamp)));
    }
    if let Some(metrics) = &details.metrics {
        lines.extend(metrics_lines(metrics));
    }
    if details.features.is_empty() {
        lines.push("Features: all".to_string());
    } else {
        lines.push(format!("Features: {}", details.features.join(", ")));
    }
    for (key, value) in &details.extra {
        lines.push(format!("{key}: {value}"));
    }
    lines
}

pub fn prediction_lines(result: &PredictionResult) -> Vec<String> {
    vec![
        format!("Attrition Risk: {}", result.prediction),
        format!("Probability: {:.1}%", result.probability * 100.0),
        format!("Confidence: {}", result.confidence),
        format!("Model ID: {}", result.model_id),
    ]
}

/// Employee card grouped into personal, job, compensation and satisfaction.
pub fn employee_sections(record: &EmployeeRecord) -> String {
    let sections: [(&str, Vec<(&str, String)>); 4] = [
        (
            "Personal Details",
            vec![
                ("Age", number(record.age)),
                ("Gender", text(&record.gender)),
                ("Marital Status", text(&record.marital_status)),
                ("Distance From Home", number(record.distance_from_home)),
            ],
        ),
        (
            "Job Details",
            vec![
                ("Department", text(&record.department)),
                ("Job Role", text(&record.job_role)),
                ("Job Level", number(record.job_level)),
                ("Years At Company", number(record.years_at_company)),
            ],
        ),
        (
            "Compensation",
            vec![
                ("Monthly Income", money(record.monthly_income)),
                ("Daily Rate", money(record.daily_rate)),
                ("Hourly Rate", money(record.hourly_rate)),
                (
                    "Percent Salary Hike",
                    record
                        .percent_salary_hike
                        .map_or_else(|| "-".to_string(), |value| format!("{value}%")),
                ),
            ],
        ),
        (
            "Satisfaction",
            vec![
                ("Job Satisfaction", rating(record.job_satisfaction)),
                (
                    "Environment Satisfaction",
                    rating(record.environment_satisfaction),
                ),
                (
                    "Relationship Satisfaction",
                    rating(record.relationship_satisfaction),
                ),
                ("Work Life Balance", rating(record.work_life_balance)),
            ],
        ),
    ];
    let mut out = String::new();
    for (title, rows) in sections {
        let _ = writeln!(out, "{title}");
        for (label, value) in rows {
            let _ = writeln!(out, "  {label}: {value}");
        }
    }
    out
}

fn display_timestamp(timestamp: &str) -> String {
    let trimmed = timestamp.split('.').next().unwrap_or_default();
    trimmed.replacen('T', " ", 1)
}

fn text(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

fn number(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |value| value.to_string())
}

fn rating(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |value| format!("{value}/4"))
}

fn money(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |value| format!("${}", group_thousands(value)))
}

fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
