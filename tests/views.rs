mod support;

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use attrition::api::{ApiClient, ModelParams};
use attrition::config::{HttpSettings, LoginSettings};
use attrition::employee::EmployeeField;
use attrition::views::{
    ActiveView, AddEmployeeView, App, EmployeeDetailsView, PredictionOutcome, PrefilledView,
    TrainingOutcome, TrainingView, View, wait_until_idle,
};
use serde_json::json;
use support::mock_backend::{MockBackend, Reply, Request, unreachable_base_url};

const WAIT: Duration = Duration::from_secs(10);

fn client(base_url: &str) -> ApiClient {
    ApiClient::with_base_url(base_url, &HttpSettings::default()).expect("client")
}

fn model(id: &str, accuracy: f64) -> serde_json::Value {
    json!({
        "model_id": id,
        "timestamp": "2025-03-01T10:15:42",
        "metrics": {"accuracy": accuracy, "precision": 0.8, "recall": 0.8, "f1_score": 0.8},
        "features": ["Age"]
    })
}

fn backend_routes(request: &Request) -> Reply {
    match (request.method.as_str(), request.path.as_str()) {
        ("GET", "/models/") => Reply::json(200, json!({"models": [model("m1", 0.9), model("m2", 0.8)]})),
        ("POST", "/training/") => Reply::json(
            200,
            json!({
                "response": "Model trained successfully",
                "model_id": "m3",
                "metrics": {"accuracy": 0.91, "precision": 0.9, "recall": 0.9, "f1_score": 0.9}
            }),
        ),
        ("GET", "/prediction/prefilled-predictions/") => {
            Reply::json(200, json!([{"employeeNumber": 1}, {"employeeNumber": 2}]))
        }
        ("GET", "/prediction/prefilled-predictions/1/") => Reply::json(
            200,
            json!({"EmployeeNumber": 1, "Attrition": "No", "Age": 41, "Department": "Sales"}),
        ),
        ("POST", "/prediction/") => {
            let model_id = request.json()["model_id"].clone();
            Reply::json(
                200,
                json!({"response": {
                    "prediction": "No",
                    "probability": 0.12,
                    "confidence": "High",
                    "model_id": model_id
                }}),
            )
        }
        ("POST", "/employees/add/") => {
            Reply::json(201, json!({"success": true, "employee_number": 1471}))
        }
        _ => Reply::json(404, json!({"error": "not found"})),
    }
}

#[test]
fn training_view_lists_models_and_refreshes_after_training() {
    let backend = MockBackend::start(backend_routes);
    let mut view = TrainingView::new(client(&backend.base_url()));
    view.activate();
    assert!(wait_until_idle(&mut view, WAIT));
    assert_eq!(view.models().len(), 2);

    view.set_params(ModelParams {
        n_estimators: 200,
        max_depth: 6,
        min_samples_leaf: 3,
    })
    .unwrap();
    view.toggle_feature("Age").unwrap();
    assert!(view.start_training());
    assert!(view.is_training());
    assert!(!view.start_training());
    assert!(wait_until_idle(&mut view, WAIT));

    match view.outcome() {
        Some(TrainingOutcome::Trained(result)) => assert_eq!(result.model_id, "m3"),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(!view.is_training());
    assert_eq!(backend.requests_to("/models/").len(), 2);
    let sent = backend.requests_to("/training/")[0].json();
    assert_eq!(sent["model_params"]["n_estimators"], 200);
    assert_eq!(sent["features"], json!(["Age"]));
}

#[test]
fn training_view_stores_failure_message_without_refreshing() {
    let backend = MockBackend::start(|request| match request.path.as_str() {
        "/training/" => Reply::json(500, json!({"response": "Exception during training"})),
        _ => Reply::json(200, json!({"models": []})),
    });
    let mut view = TrainingView::new(client(&backend.base_url()));
    view.start_training();
    assert!(wait_until_idle(&mut view, WAIT));
    assert_eq!(
        view.outcome(),
        Some(&TrainingOutcome::Failed("Exception during training".to_string()))
    );
    assert!(backend.requests_to("/models/").is_empty());
}

#[test]
fn prefilled_view_loads_employee_numbers() {
    let backend = MockBackend::start(backend_routes);
    let mut view = PrefilledView::new(client(&backend.base_url()));
    view.activate();
    assert!(wait_until_idle(&mut view, WAIT));
    let numbers: Vec<u32> = view
        .employees()
        .expect("employees")
        .iter()
        .map(|e| e.employee_number)
        .collect();
    assert_eq!(numbers, vec![1, 2]);
}

#[test]
fn prefilled_view_without_backend_stays_empty() {
    let mut view = PrefilledView::new(client(&unreachable_base_url()));
    view.activate();
    assert!(wait_until_idle(&mut view, WAIT));
    assert!(view.is_loaded());
    assert!(view.employees().is_none());
}

#[test]
fn torn_down_view_ignores_late_results() {
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let backend = MockBackend::start(move |_| {
        let _ = release_rx.recv_timeout(WAIT);
        Reply::json(200, json!([{"employeeNumber": 1}]))
    });
    let mut view = PrefilledView::new(client(&backend.base_url()));
    view.activate();
    assert!(view.is_busy());
    view.teardown();
    assert!(!view.is_busy());
    release_tx.send(()).unwrap();
    thread::sleep(Duration::from_millis(200));
    assert!(!view.poll());
    assert!(view.employees().is_none());
    assert!(!view.is_loaded());
}

#[test]
fn employee_details_view_loads_in_parallel_and_predicts() {
    let backend = MockBackend::start(backend_routes);
    let mut view = EmployeeDetailsView::new(client(&backend.base_url()), 1);
    view.activate();
    assert!(wait_until_idle(&mut view, WAIT));
    assert_eq!(view.details().and_then(|d| d.age), Some(41));
    assert_eq!(view.selected_model(), Some("m1"));
    assert_eq!(view.models().len(), 2);

    assert!(view.select_model("m2"));
    assert!(view.predict());
    assert!(wait_until_idle(&mut view, WAIT));
    match view.prediction() {
        Some(PredictionOutcome::Predicted(result)) => {
            assert_eq!(result.model_id, "m2");
            assert_eq!(result.prediction, "No");
        }
        other => panic!("unexpected prediction: {other:?}"),
    }
    let sent = backend.requests_to("/prediction/")[0].json();
    assert_eq!(sent["model_id"], "m2");
    assert_eq!(sent["data"]["EmployeeNumber"], 1);
    assert_eq!(sent["data"]["Department"], "Sales");
}

#[test]
fn employee_details_view_reports_missing_employee() {
    let backend = MockBackend::start(backend_routes);
    let mut view = EmployeeDetailsView::new(client(&backend.base_url()), 404);
    view.activate();
    assert!(wait_until_idle(&mut view, WAIT));
    assert_eq!(view.load_error(), Some("not found"));
    assert!(view.details().is_none());
    assert!(!view.predict());
}

#[test]
fn add_employee_view_resets_draft_after_success() {
    let backend = MockBackend::start(backend_routes);
    let mut view = AddEmployeeView::new(client(&backend.base_url()));
    view.set_field(EmployeeField::Age, "29").unwrap();
    view.set_field_by_name("Department", "Sales").unwrap();
    assert!(view.submit());
    assert!(wait_until_idle(&mut view, WAIT));
    assert_eq!(
        view.message(),
        Some("Employee added successfully with number: 1471")
    );
    assert_eq!(view.last_added(), Some(1471));
    assert_eq!(view.draft().get(EmployeeField::Age), "");
    assert_eq!(
        view.draft().get(EmployeeField::Department),
        "Research & Development"
    );
    let sent = backend.requests_to("/employees/add/")[0].json();
    assert_eq!(sent["Age"], 29);
    assert!(sent["MonthlyIncome"].is_null());
}

#[test]
fn add_employee_view_shows_backend_error() {
    let backend = MockBackend::start(|_| Reply::json(400, json!({"error": "Invalid data"})));
    let mut view = AddEmployeeView::new(client(&backend.base_url()));
    view.set_field(EmployeeField::Age, "29").unwrap();
    assert!(view.submit());
    assert!(wait_until_idle(&mut view, WAIT));
    assert_eq!(view.message(), Some("Error: Invalid data"));
    assert_eq!(view.last_added(), None);
    assert_eq!(view.draft().get(EmployeeField::Age), "29");
}

#[test]
fn app_navigation_activates_views() {
    let backend = MockBackend::start(backend_routes);
    let mut app = App::new(client(&backend.base_url()), LoginSettings::default());
    app.navigate("/prediction/prefilled-predictions").unwrap();
    for _ in 0..500 {
        app.poll();
        if !app.is_busy() {
            break;
        }
        thread::sleep(Duration::from_millis(10));
    }
    match app.view() {
        ActiveView::Prefilled(view) => assert_eq!(view.employees().map(|e| e.len()), Some(2)),
        _ => panic!("expected prefilled view"),
    }
    app.navigate("/training").unwrap();
    assert!(matches!(app.view(), ActiveView::Training(_)));
    assert!(app.navigate("/nowhere").is_err());
    assert!(matches!(app.view(), ActiveView::Training(_)));
}
